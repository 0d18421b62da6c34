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

use search_core::game_state::Outcome;
use search_testing::tictactoe::{TicTacToePlayer, TicTacToeState};
use search_testing::tictactoe_agents::{mcts_context, play_out};

const ITERATIONS: i32 = 10_000;

#[test]
fn finds_the_immediate_win() {
    // X completes the 0-4-8 diagonal; every other move loses to O on cell 8.
    let source = TicTacToeState::parse("X-O-XO---", TicTacToePlayer::X).unwrap();
    let mut ctx = mcts_context(source, ITERATIONS, 42).unwrap();
    ctx.execute().unwrap();
    assert_eq!(ctx.solution().unwrap().cell, 8);
}

#[test]
fn avoids_the_loss_and_draws() {
    // O to move with X threatening the 2-5-8 column; optimal play draws.
    let source = TicTacToeState::parse("--X-OX---", TicTacToePlayer::O).unwrap();
    let outcome = play_out(source, |state| mcts_context(state, ITERATIONS, 7)).unwrap();
    assert_eq!(outcome, Outcome::Draw);
}

#[test]
fn perfect_play_from_the_empty_board_is_a_draw() {
    let outcome =
        play_out(TicTacToeState::empty(), |state| mcts_context(state, ITERATIONS, 3)).unwrap();
    assert_eq!(outcome, Outcome::Draw);
}

#[test]
fn reports_depth_beyond_one_ply() {
    let mut ctx = mcts_context(TicTacToeState::empty(), ITERATIONS, 1).unwrap();
    ctx.execute().unwrap();
    assert!(ctx.report().max_depth > 1, "tree search should descend past the root ply");
}

#[test]
fn warm_start_accumulates_visits() {
    let source = TicTacToeState::parse("X-O-XO---", TicTacToePlayer::X).unwrap();
    let mut ctx = mcts_context(source, 200, 9).unwrap();
    ctx.execute().unwrap();
    let tree = ctx.start_tree().expect("search leaves its tree behind");
    let first_visits = tree.node(tree.root()).visits();

    ctx.reset(false);
    ctx.execute().unwrap();
    let tree = ctx.start_tree().unwrap();
    assert!(tree.node(tree.root()).visits() > first_visits);

    ctx.reset(true);
    assert!(ctx.start_tree().is_none());
}
