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
use search_testing::tictactoe_agents::{flat_mcs_context, play_out};

const ITERATIONS: i32 = 10_000;

#[test]
fn finds_the_immediate_win() {
    let source = TicTacToeState::parse("X-O-XO---", TicTacToePlayer::X).unwrap();
    let mut ctx = flat_mcs_context(source, ITERATIONS, 42).unwrap();
    ctx.execute().unwrap();
    assert_eq!(ctx.solution().unwrap().cell, 8);
}

#[test]
fn answering_a_center_opening_leads_to_a_draw() {
    // X has taken the center; flat search plays both sides to a draw.
    let source = TicTacToeState::parse("----X----", TicTacToePlayer::O).unwrap();
    let outcome = play_out(source, |state| flat_mcs_context(state, ITERATIONS, 11)).unwrap();
    assert_eq!(outcome, Outcome::Draw);
}

#[test]
fn never_descends_beyond_one_ply() {
    let mut ctx = flat_mcs_context(TicTacToeState::empty(), 500, 1).unwrap();
    ctx.execute().unwrap();
    assert_eq!(ctx.report().max_depth, 1);
    let tree = ctx.start_tree().expect("search leaves its tree behind");
    for &child in tree.children(tree.root()) {
        assert!(tree.children(child).is_empty(), "flat search must not grow grandchildren");
    }
}
