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

use search_core::game_logic::GameLogic;
use search_core::game_state::{GameStatus, Outcome, SearchState};
use search_testing::tictactoe::{TicTacToeLogic, TicTacToePlayer, TicTacToeState};
use search_testing::tictactoe_agents::nmcts_context;

#[test]
fn finds_the_immediate_win() {
    let source = TicTacToeState::parse("X-O-XO---", TicTacToePlayer::X).unwrap();
    let mut ctx = nmcts_context(source.make_copy(), 10_000, 0.0, 0.5, 42).unwrap();
    ctx.execute().unwrap();

    let action = *ctx.solution().unwrap();
    let end = TicTacToeLogic.apply(&source, &action).unwrap();
    assert_eq!(
        end.status(),
        GameStatus::Completed { outcome: Outcome::Winner(TicTacToePlayer::X) }
    );
}

#[test]
fn policy_global_outside_unit_interval_is_rejected() {
    let source = TicTacToeState::empty();
    assert!(nmcts_context(source, 100, 1.5, 0.5, 0).is_err());
}
