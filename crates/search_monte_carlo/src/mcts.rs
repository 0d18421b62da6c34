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

//! Monte-Carlo tree search.
//!
//! Each iteration clones the source position and runs the classic four
//! phases: descend through fully-expanded nodes via the selection strategy,
//! grow one child via the expansion strategy, play the position out, and
//! back-propagate the end state's value along the walked path. When the
//! budget runs out the final-node selection turns the accumulated statistics
//! into a single recommended action.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use search_core::back_propagation::BackPropagationStrategy;
use search_core::budget::SearchBudget;
use search_core::evaluation::StateEvaluation;
use search_core::expansion::{ExpansionStrategy, MinimumTExpansion};
use search_core::final_selection::FinalNodeSelectionStrategy;
use search_core::game_state::SearchState;
use search_core::playout::PlayoutStrategy;
use search_core::search_context::{Planner, SearchContext};
use search_core::search_tree::{NodeIndex, SearchTree};
use search_core::selection::{SelectionStrategy, UcbSelection};
use search_core::solution::SolutionStrategy;

use crate::tree_search::{ensure_searchable, TreeSearch};

pub struct MctsPlanner<S: SearchState> {
    pub(crate) tree_search: TreeSearch<S>,
    pub(crate) selection: Box<dyn SelectionStrategy<S>>,
    pub(crate) expansion: Box<dyn ExpansionStrategy<S>>,
}

impl<S: SearchState> MctsPlanner<S> {
    pub fn builder() -> MctsBuilder<S> {
        MctsBuilder::new()
    }

    /// Selection and expansion for one iteration: returns the frontier node
    /// reached and the position it corresponds to.
    fn descend(
        &self,
        ctx: &mut SearchContext<S>,
        tree: &mut SearchTree<S>,
    ) -> Result<(NodeIndex, S, u32)> {
        let mut state = ctx.source().make_copy();
        let mut node = tree.root();
        let mut depth = 0;

        while !ctx.goal_done(&state)
            && tree.is_fully_expanded(node)
            && !tree.children(node).is_empty()
        {
            node = self.selection.select_next(ctx, tree, node)?;
            let action =
                tree.node(node).action().cloned().context("non-root node carries no payload")?;
            state = ctx.apply_action(&state, &action)?;
            depth += 1;
        }

        if !ctx.goal_done(&state) {
            let expanded = self.expansion.expand(ctx, tree, node, &state)?;
            if expanded != node {
                let action = tree
                    .node(expanded)
                    .action()
                    .cloned()
                    .context("expanded node carries no payload")?;
                state = ctx.apply_action(&state, &action)?;
                node = expanded;
                depth += 1;
            }
        }

        Ok((node, state, depth))
    }
}

impl<S: SearchState> Planner<S> for MctsPlanner<S> {
    fn search(&self, ctx: &mut SearchContext<S>) -> Result<S::Action> {
        ensure_searchable(ctx)?;
        let mut tree = ctx
            .take_start_tree()
            .unwrap_or_else(|| SearchTree::with_root(Some(ctx.source().make_copy())));

        let budget = self.tree_search.budget;
        let deadline = budget.deadline(Instant::now());
        let mut iteration = 0;
        let mut max_depth = 0;
        while budget.allows(iteration, deadline) {
            match self.descend(ctx, &mut tree) {
                Ok((node, state, depth)) => {
                    max_depth = max_depth.max(depth);
                    let end = if ctx.goal_done(&state) {
                        state
                    } else {
                        self.tree_search.playout.playout(ctx, state)?
                    };
                    if let Err(error) = self.tree_search.back_propagation.back_propagate(
                        ctx,
                        &mut tree,
                        &*self.tree_search.evaluation,
                        node,
                        &end,
                    ) {
                        warn!(?error, "Back-propagation abandoned");
                    }
                }
                // Game model errors abandon the iteration, not the search.
                Err(error) => warn!(?error, "Search iteration abandoned"),
            }
            iteration += 1;
        }
        ctx.report_mut().iterations = iteration;
        ctx.report_mut().max_depth = max_depth;
        debug!(iterations = iteration, max_depth, nodes = tree.node_count(), "MCTS complete");

        let action = self.tree_search.finalize(ctx, &tree)?;
        ctx.store_start_tree(tree);
        Ok(action)
    }
}

/// Builder for [MctsPlanner]. Every strategy has a sensible default; most
/// callers only set a budget.
pub struct MctsBuilder<S: SearchState> {
    tree_search: TreeSearch<S>,
    selection: Box<dyn SelectionStrategy<S>>,
    expansion: Box<dyn ExpansionStrategy<S>>,
}

impl<S: SearchState> MctsBuilder<S> {
    pub fn new() -> Self {
        Self {
            tree_search: TreeSearch::with_defaults(),
            selection: Box::new(UcbSelection::default()),
            expansion: Box::new(MinimumTExpansion::default()),
        }
    }

    pub fn budget(mut self, budget: SearchBudget) -> Self {
        self.tree_search.budget = budget;
        self
    }

    pub fn iterations(self, iterations: i32) -> Self {
        self.budget(SearchBudget::with_iterations(iterations))
    }

    pub fn selection(mut self, selection: impl SelectionStrategy<S> + 'static) -> Self {
        self.selection = Box::new(selection);
        self
    }

    pub fn expansion(mut self, expansion: impl ExpansionStrategy<S> + 'static) -> Self {
        self.expansion = Box::new(expansion);
        self
    }

    pub fn playout(mut self, playout: impl PlayoutStrategy<S> + 'static) -> Self {
        self.tree_search.playout = Box::new(playout);
        self
    }

    pub fn evaluation(mut self, evaluation: impl StateEvaluation<S> + 'static) -> Self {
        self.tree_search.evaluation = Box::new(evaluation);
        self
    }

    pub fn back_propagation(
        mut self,
        back_propagation: impl BackPropagationStrategy<S> + 'static,
    ) -> Self {
        self.tree_search.back_propagation = Box::new(back_propagation);
        self
    }

    pub fn final_node_selection(
        mut self,
        final_node_selection: impl FinalNodeSelectionStrategy<S> + 'static,
    ) -> Self {
        self.tree_search.final_node_selection = Box::new(final_node_selection);
        self
    }

    pub fn solution(mut self, solution: impl SolutionStrategy<S> + 'static) -> Self {
        self.tree_search.solution = Box::new(solution);
        self
    }

    pub fn build(self) -> MctsPlanner<S> {
        MctsPlanner {
            tree_search: self.tree_search,
            selection: self.selection,
            expansion: self.expansion,
        }
    }
}

impl<S: SearchState> Default for MctsBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
