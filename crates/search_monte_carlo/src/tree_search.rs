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

//! Shared skeleton of the tree-building planners.

use anyhow::{ensure, Result};

use search_core::back_propagation::{BackPropagationStrategy, EvaluateOnceAndColor};
use search_core::budget::SearchBudget;
use search_core::evaluation::{StateEvaluation, WinLossDrawEvaluation};
use search_core::final_selection::{BestRatioFinalSelection, FinalNodeSelectionStrategy};
use search_core::game_state::SearchState;
use search_core::playout::PlayoutStrategy;
use search_core::search_context::SearchContext;
use search_core::search_tree::SearchTree;
use search_core::solution::{ActionSolution, SolutionStrategy};

use crate::playout::RandomPlayout;

/// The strategies and budget every tree-building planner carries, whatever
/// its descent policy. Planner-specific strategies (selection, expansion,
/// bandit policies) live on the planners themselves.
pub struct TreeSearch<S: SearchState> {
    pub budget: SearchBudget,
    pub playout: Box<dyn PlayoutStrategy<S>>,
    pub evaluation: Box<dyn StateEvaluation<S>>,
    pub back_propagation: Box<dyn BackPropagationStrategy<S>>,
    pub final_node_selection: Box<dyn FinalNodeSelectionStrategy<S>>,
    pub solution: Box<dyn SolutionStrategy<S>>,
}

impl<S: SearchState> TreeSearch<S> {
    /// The stock strategy set: random playouts valued as win/loss/draw,
    /// evaluate-once-and-color back-propagation, best-ratio final selection,
    /// and an unlimited budget.
    pub fn with_defaults() -> Self {
        Self {
            budget: SearchBudget::default(),
            playout: Box::new(RandomPlayout),
            evaluation: Box::new(WinLossDrawEvaluation),
            back_propagation: Box::new(EvaluateOnceAndColor),
            final_node_selection: Box::new(BestRatioFinalSelection),
            solution: Box::new(ActionSolution),
        }
    }

    /// Final-node selection followed by the solution strategy. Errors on
    /// this path are never swallowed; the context surfaces them as a failed
    /// search.
    pub fn finalize(&self, ctx: &mut SearchContext<S>, tree: &SearchTree<S>) -> Result<S::Action> {
        let best = self.final_node_selection.select_final(ctx, tree, tree.root())?;
        self.solution.solution(ctx, tree, best)
    }
}

/// Guards shared by every planner before the first iteration: the source
/// must still be undecided and must offer at least one action. A generator
/// with no actions on a non-terminal position is a broken game model and
/// fails the search rather than spinning the budget.
pub fn ensure_searchable<S: SearchState>(ctx: &SearchContext<S>) -> Result<()> {
    ctx.source_active_player()?;
    let mut generator = ctx.logic().expand(ctx.source());
    ensure!(generator.has_next(), "game model produced no legal actions for the source position");
    Ok(())
}
