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

//! Flat Monte-Carlo search: a one-ply tree.
//!
//! Every iteration expands or selects a direct child of the root, plays the
//! resulting position out, and back-propagates. No descent happens beyond
//! depth one, which makes the planner cheap and surprisingly strong on games
//! where a single ply changes little.

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

pub struct FlatMcsPlanner<S: SearchState> {
    pub(crate) tree_search: TreeSearch<S>,
    pub(crate) selection: Box<dyn SelectionStrategy<S>>,
    pub(crate) expansion: Box<dyn ExpansionStrategy<S>>,
}

impl<S: SearchState> FlatMcsPlanner<S> {
    pub fn builder() -> FlatMcsBuilder<S> {
        FlatMcsBuilder::new()
    }

    /// Pick this iteration's child: expand a fresh action while any remain,
    /// select among the existing children otherwise.
    fn choose_child(
        &self,
        ctx: &mut SearchContext<S>,
        tree: &mut SearchTree<S>,
        state: &S,
    ) -> Result<NodeIndex> {
        let root = tree.root();
        if !tree.is_fully_expanded(root) {
            let expanded = self.expansion.expand(ctx, tree, root, state)?;
            if expanded != root {
                return Ok(expanded);
            }
        }
        self.selection.select_next(ctx, tree, root)
    }
}

impl<S: SearchState> Planner<S> for FlatMcsPlanner<S> {
    fn search(&self, ctx: &mut SearchContext<S>) -> Result<S::Action> {
        ensure_searchable(ctx)?;
        let mut tree = ctx
            .take_start_tree()
            .unwrap_or_else(|| SearchTree::with_root(Some(ctx.source().make_copy())));

        let budget = self.tree_search.budget;
        let deadline = budget.deadline(Instant::now());
        let mut iteration = 0;
        while budget.allows(iteration, deadline) {
            let state = ctx.source().make_copy();
            let descent = self.choose_child(ctx, &mut tree, &state).and_then(|child| {
                let action = tree
                    .node(child)
                    .action()
                    .cloned()
                    .context("root child carries no payload")?;
                Ok((child, ctx.apply_action(&state, &action)?))
            });
            match descent {
                Ok((child, state)) => {
                    let end = self.tree_search.playout.playout(ctx, state)?;
                    if let Err(error) = self.tree_search.back_propagation.back_propagate(
                        ctx,
                        &mut tree,
                        &*self.tree_search.evaluation,
                        child,
                        &end,
                    ) {
                        warn!(?error, "Back-propagation abandoned");
                    }
                }
                Err(error) => warn!(?error, "Search iteration abandoned"),
            }
            iteration += 1;
        }
        ctx.report_mut().iterations = iteration;
        ctx.report_mut().max_depth = 1;
        debug!(iterations = iteration, children = tree.children(tree.root()).len(),
            "Flat Monte-Carlo search complete");

        let action = self.tree_search.finalize(ctx, &tree)?;
        ctx.store_start_tree(tree);
        Ok(action)
    }
}

/// Builder for [FlatMcsPlanner], mirroring the MCTS defaults.
pub struct FlatMcsBuilder<S: SearchState> {
    tree_search: TreeSearch<S>,
    selection: Box<dyn SelectionStrategy<S>>,
    expansion: Box<dyn ExpansionStrategy<S>>,
}

impl<S: SearchState> FlatMcsBuilder<S> {
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

    pub fn build(self) -> FlatMcsPlanner<S> {
        FlatMcsPlanner {
            tree_search: self.tree_search,
            selection: self.selection,
            expansion: self.expansion,
        }
    }
}

impl<S: SearchState> Default for FlatMcsBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
