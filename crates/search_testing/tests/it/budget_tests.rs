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

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;

use search_core::budget::SearchBudget;
use search_core::playout::PlayoutStrategy;
use search_core::search_context::SearchContext;
use search_monte_carlo::mcts::MctsPlanner;
use search_monte_carlo::playout::RandomPlayout;
use search_testing::tictactoe::{TicTacToeLogic, TicTacToeState};
use search_testing::tictactoe_agents::{flat_mcs_context, mcts_context, nmcts_context};

/// Delegates to [RandomPlayout] while counting invocations.
struct CountingPlayout {
    calls: Rc<Cell<usize>>,
}

impl PlayoutStrategy<TicTacToeState> for CountingPlayout {
    fn playout(
        &self,
        ctx: &mut SearchContext<TicTacToeState>,
        state: TicTacToeState,
    ) -> Result<TicTacToeState> {
        self.calls.set(self.calls.get() + 1);
        RandomPlayout.playout(ctx, state)
    }
}

#[test]
fn mcts_runs_exactly_the_budgeted_iterations() {
    let calls = Rc::new(Cell::new(0));
    let planner = MctsPlanner::builder()
        .iterations(50)
        .playout(CountingPlayout { calls: Rc::clone(&calls) })
        .build();
    let mut ctx = SearchContext::builder(TicTacToeState::empty())
        .logic(TicTacToeLogic)
        .planner(planner)
        .seed(2)
        .build()
        .unwrap();
    ctx.execute().unwrap();

    assert_eq!(ctx.report().iterations, 50);
    assert!(calls.get() <= 50, "{} playouts exceeded the 50-iteration budget", calls.get());
}

#[test]
fn flat_mcs_runs_exactly_the_budgeted_iterations() {
    let mut ctx = flat_mcs_context(TicTacToeState::empty(), 75, 2).unwrap();
    ctx.execute().unwrap();
    assert_eq!(ctx.report().iterations, 75);
}

#[test]
fn nmcts_runs_exactly_the_budgeted_iterations() {
    let mut ctx = nmcts_context(TicTacToeState::empty(), 60, 0.0, 0.5, 2).unwrap();
    ctx.execute().unwrap();
    assert_eq!(ctx.report().iterations, 60);
}

#[test]
fn time_budget_permits_at_least_one_iteration() {
    let planner =
        MctsPlanner::builder().budget(SearchBudget::with_time_ms(50)).build();
    let mut ctx = SearchContext::builder(TicTacToeState::empty())
        .logic(TicTacToeLogic)
        .planner(planner)
        .seed(2)
        .build()
        .unwrap();
    ctx.execute().unwrap();
    assert!(ctx.report().iterations >= 1);
}
