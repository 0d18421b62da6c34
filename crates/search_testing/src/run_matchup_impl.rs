// Copyright © Stratagem 2022-present

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//    https://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::{Context as _, Result};
use clap::{ArgEnum, Parser};
use tracing_subscriber::EnvFilter;

use search_core::game_logic::GameLogic;
use search_core::game_state::{GameStatus, Outcome, SearchState};
use search_core::primitives::DEFAULT_EXPLORE_CHANCE;
use search_core::search_context::SearchContext;

use crate::tictactoe::{TicTacToeLogic, TicTacToePlayer, TicTacToeState};
use crate::tictactoe_agents;

#[derive(Copy, Clone, PartialEq, Eq, ArgEnum)]
pub enum PlannerName {
    Mcts,
    FlatMcs,
    Nmcts,
    Lsi,
}

impl PlannerName {
    fn label(&self) -> &'static str {
        match self {
            PlannerName::Mcts => "MCTS",
            PlannerName::FlatMcs => "FLAT_MCS",
            PlannerName::Nmcts => "NMCTS",
            PlannerName::Lsi => "LSI",
        }
    }
}

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(arg_enum, value_parser)]
    pub player_x: PlannerName,
    #[clap(arg_enum, value_parser)]
    pub player_o: PlannerName,
    #[clap(long, value_parser, default_value_t = 10_000)]
    pub iterations: i32,
    #[clap(long, value_parser, default_value_t = 0)]
    pub seed: u64,
    #[clap(long, value_parser, default_value_t = 1)]
    pub matches: u64,
    /// Starting board as nine characters (X, O or -), row by row.
    #[clap(long, value_parser)]
    pub board: Option<String>,
}

pub fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut x_wins = 0;
    let mut o_wins = 0;
    let mut draws = 0;
    for game in 0..args.matches {
        let state = match &args.board {
            Some(board) => TicTacToeState::parse(board, TicTacToePlayer::X)?,
            None => TicTacToeState::empty(),
        };
        match run_game(&args, state, args.seed + game)? {
            Outcome::Winner(TicTacToePlayer::X) => x_wins += 1,
            Outcome::Winner(TicTacToePlayer::O) => o_wins += 1,
            Outcome::Draw => draws += 1,
        }
    }

    println!(
        "<<{}>> as X: {} wins / <<{}>> as O: {} wins / {} draws",
        args.player_x.label(),
        x_wins,
        args.player_o.label(),
        o_wins,
        draws
    );
    Ok(())
}

fn run_game(
    args: &Args,
    mut state: TicTacToeState,
    seed: u64,
) -> Result<Outcome<TicTacToePlayer>> {
    println!("{state}");
    loop {
        let active = match state.status() {
            GameStatus::Completed { outcome } => {
                match outcome {
                    Outcome::Winner(winner) => println!("Game over. {winner} wins!"),
                    Outcome::Draw => println!("Game over. Draw."),
                }
                let scores = TicTacToeLogic.scores(&state)?;
                println!("Final scores: X {} / O {}", scores[0], scores[1]);
                return Ok(outcome);
            }
            GameStatus::InProgress { active_player } => active_player,
        };

        let planner = match active {
            TicTacToePlayer::X => args.player_x,
            TicTacToePlayer::O => args.player_o,
        };
        let mut ctx = build_context(planner, state.make_copy(), args.iterations, seed)?;
        ctx.execute()?;
        let action = *ctx.solution().context("successful search must produce a solution")?;
        println!(
            "<<{}>> plays {} on cell {} ({} iterations, depth {})",
            planner.label(),
            active,
            action.cell,
            ctx.report().iterations,
            ctx.report().max_depth
        );
        state = TicTacToeLogic.apply(&state, &action)?;
        println!("{state}");
    }
}

fn build_context(
    planner: PlannerName,
    state: TicTacToeState,
    iterations: i32,
    seed: u64,
) -> Result<SearchContext<TicTacToeState>> {
    match planner {
        PlannerName::Mcts => tictactoe_agents::mcts_context(state, iterations, seed),
        PlannerName::FlatMcs => tictactoe_agents::flat_mcs_context(state, iterations, seed),
        PlannerName::Nmcts => tictactoe_agents::nmcts_context(
            state,
            iterations,
            0.0,
            DEFAULT_EXPLORE_CHANCE,
            seed,
        ),
        PlannerName::Lsi => tictactoe_agents::lsi_context(
            state,
            iterations.max(0) as usize,
            iterations.max(0) as usize,
            seed,
        ),
    }
}
