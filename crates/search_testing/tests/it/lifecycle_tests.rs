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

use search_core::search_context::{SearchContext, SearchStatus};
use search_testing::tictactoe::{TicTacToeLogic, TicTacToePlayer, TicTacToeState};
use search_testing::tictactoe_agents::mcts_context;

#[test]
fn success_lifecycle() {
    let mut ctx = mcts_context(TicTacToeState::empty(), 100, 0).unwrap();
    assert_eq!(ctx.status(), SearchStatus::Ready);
    assert_eq!(ctx.solution(), None);

    ctx.execute().unwrap();
    assert_eq!(ctx.status(), SearchStatus::Success);
    assert!(ctx.solution().is_some());

    // Executing again without a reset is a configuration error.
    assert!(ctx.execute().is_err());
    assert_eq!(ctx.status(), SearchStatus::Success);

    ctx.reset(true);
    assert_eq!(ctx.status(), SearchStatus::Ready);
    assert_eq!(ctx.solution(), None);
    assert_eq!(ctx.report().iterations, 0);
}

#[test]
fn searching_a_finished_game_fails() {
    let won = TicTacToeState::parse("XXX-OO---", TicTacToePlayer::O).unwrap();
    let mut ctx = mcts_context(won, 100, 0).unwrap();
    assert!(ctx.execute().is_err());
    assert_eq!(ctx.status(), SearchStatus::Failure);
    assert_eq!(ctx.solution(), None);
}

#[test]
fn missing_planner_fails_at_build_time() {
    let result = SearchContext::builder(TicTacToeState::empty()).logic(TicTacToeLogic).build();
    assert!(result.is_err());
}

#[test]
fn failed_context_can_be_reset_and_reused() {
    let won = TicTacToeState::parse("XXX-OO---", TicTacToePlayer::O).unwrap();
    let mut ctx = mcts_context(won, 100, 0).unwrap();
    let _ = ctx.execute();
    assert_eq!(ctx.status(), SearchStatus::Failure);

    ctx.reset(true);
    assert_eq!(ctx.status(), SearchStatus::Ready);
    // Still a terminal source; the search fails again rather than panicking.
    assert!(ctx.execute().is_err());
}
