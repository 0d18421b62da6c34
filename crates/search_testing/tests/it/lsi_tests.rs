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
use search_testing::tictactoe_agents::lsi_context;

#[test]
fn finds_the_immediate_win() {
    let source = TicTacToeState::parse("X-O-XO---", TicTacToePlayer::X).unwrap();
    let mut ctx = lsi_context(source.make_copy(), 1_000, 1_000, 42).unwrap();
    ctx.execute().unwrap();

    let action = *ctx.solution().unwrap();
    let end = TicTacToeLogic.apply(&source, &action).unwrap();
    assert_eq!(
        end.status(),
        GameStatus::Completed { outcome: Outcome::Winner(TicTacToePlayer::X) }
    );
}

#[test]
fn accounts_for_its_sample_budgets() {
    let source = TicTacToeState::parse("X-O-XO---", TicTacToePlayer::X).unwrap();
    let mut ctx = lsi_context(source, 1_000, 1_000, 5).unwrap();
    ctx.execute().unwrap();

    let report = ctx.report();
    assert_eq!(report.generation_samples_used, 1_000);
    assert!(report.evaluation_samples_used > 0);
    assert!(
        report.evaluation_samples_used <= 1_000,
        "evaluation used {} samples out of a budget of 1000",
        report.evaluation_samples_used
    );
}

#[test]
fn works_with_tiny_budgets() {
    // Budgets far below the candidate count force the one-sample-per-arm
    // floor; the search must still single out a survivor.
    let source = TicTacToeState::parse("X-O-XO---", TicTacToePlayer::X).unwrap();
    let mut ctx = lsi_context(source, 10, 4, 5).unwrap();
    ctx.execute().unwrap();
    assert!(ctx.solution().is_some());
}
