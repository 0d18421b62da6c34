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

//! Ready-made search contexts over Tic-Tac-Toe, one per planner, used by the
//! integration tests and the matchup harness.

use anyhow::{Context as _, Result};

use search_core::exploration::ChanceExploration;
use search_core::game_logic::GameLogic;
use search_core::game_state::{GameStatus, Outcome, SearchState};
use search_core::search_context::SearchContext;
use search_monte_carlo::flat_monte_carlo::FlatMcsPlanner;
use search_monte_carlo::linear_side_information::LsiPlanner;
use search_monte_carlo::mcts::MctsPlanner;
use search_monte_carlo::naive_monte_carlo::NmctsPlanner;

use crate::tictactoe::{TicTacToeLogic, TicTacToePlayer, TicTacToeState};

pub fn mcts_context(
    source: TicTacToeState,
    iterations: i32,
    seed: u64,
) -> Result<SearchContext<TicTacToeState>> {
    SearchContext::builder(source)
        .logic(TicTacToeLogic)
        .planner(MctsPlanner::builder().iterations(iterations).build())
        .seed(seed)
        .build()
}

pub fn flat_mcs_context(
    source: TicTacToeState,
    iterations: i32,
    seed: u64,
) -> Result<SearchContext<TicTacToeState>> {
    SearchContext::builder(source)
        .logic(TicTacToeLogic)
        .planner(FlatMcsPlanner::builder().iterations(iterations).build())
        .seed(seed)
        .build()
}

pub fn nmcts_context(
    source: TicTacToeState,
    iterations: i32,
    policy_global: f64,
    explore_chance: f64,
    seed: u64,
) -> Result<SearchContext<TicTacToeState>> {
    let planner = NmctsPlanner::builder()
        .iterations(iterations)
        .policy_global(policy_global)
        .exploration(ChanceExploration { chance: explore_chance })
        .build()?;
    SearchContext::builder(source).logic(TicTacToeLogic).planner(planner).seed(seed).build()
}

pub fn lsi_context(
    source: TicTacToeState,
    generation_samples: usize,
    evaluation_samples: usize,
    seed: u64,
) -> Result<SearchContext<TicTacToeState>> {
    SearchContext::builder(source)
        .logic(TicTacToeLogic)
        .planner(LsiPlanner::action_value(generation_samples, evaluation_samples))
        .seed(seed)
        .build()
}

/// Play a game to completion, both sides choosing moves through the context
/// returned by `contexts`. Returns the final outcome.
pub fn play_out(
    mut state: TicTacToeState,
    contexts: impl Fn(TicTacToeState) -> Result<SearchContext<TicTacToeState>>,
) -> Result<Outcome<TicTacToePlayer>> {
    loop {
        if let GameStatus::Completed { outcome } = state.status() {
            return Ok(outcome);
        }
        let mut ctx = contexts(state.make_copy())?;
        ctx.execute()?;
        let action = *ctx.solution().context("successful search must produce a solution")?;
        state = TicTacToeLogic.apply(&state, &action)?;
    }
}
