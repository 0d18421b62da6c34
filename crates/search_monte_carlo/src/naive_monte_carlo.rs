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

//! Naive Monte-Carlo tree search.
//!
//! Actions with combinatorial structure make classic expansion enumerate far
//! too many children. The naive approach instead samples actions and keeps
//! per-(state, action) reward statistics in a two-level bandit table: a
//! global map from state hash to the local arms tried from that state. The
//! exploration policy decides per sample whether to grow the arm set or
//! exploit it; exploitation returns the best arm, or an arm drawn uniformly
//! with probability `policy_global`.
//!
//! The table lives for a single search invocation, so independent contexts
//! never share bandit state.

use std::collections::HashMap;
use std::time::Instant;

use anyhow::{ensure, Context, Result};
use rand::Rng;
use tracing::{debug, warn};

use search_core::back_propagation::BackPropagationStrategy;
use search_core::budget::SearchBudget;
use search_core::evaluation::StateEvaluation;
use search_core::exploration::{ChanceExploration, ExplorationStrategy};
use search_core::final_selection::FinalNodeSelectionStrategy;
use search_core::game_state::{SearchAction, SearchState};
use search_core::hashing::fnv1_hash;
use search_core::playout::PlayoutStrategy;
use search_core::primitives::approx_eq;
use search_core::sampling::{RandomSampling, SamplingStrategy};
use search_core::search_context::{Planner, SearchContext};
use search_core::search_tree::{NodeIndex, SearchTree};
use search_core::solution::SolutionStrategy;

use crate::tree_search::{ensure_searchable, TreeSearch};

/// Reward statistics for one action sampled from one state.
#[derive(Debug, Clone)]
pub struct LocalArm<A> {
    action: A,
    total_reward: f64,
    visits: u64,
}

impl<A> LocalArm<A> {
    fn new(action: A) -> Self {
        Self { action, total_reward: 0.0, visits: 0 }
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    pub fn visits(&self) -> u64 {
        self.visits
    }

    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Mean reward; zero for an arm that has never been pulled.
    pub fn expected_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f64
        }
    }
}

/// Arms for one state. Arms are stored in insertion order and looked up
/// through an action-hash index, so iteration (and therefore tie-breaking)
/// is reproducible for a fixed seed.
#[derive(Debug)]
pub struct LocalMab<A> {
    arms: Vec<LocalArm<A>>,
    by_action: HashMap<u64, usize>,
}

impl<A> Default for LocalMab<A> {
    fn default() -> Self {
        Self { arms: Vec::new(), by_action: HashMap::new() }
    }
}

impl<A> LocalMab<A> {
    pub fn arms(&self) -> &[LocalArm<A>] {
        &self.arms
    }

    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    fn record(&mut self, action: A, action_hash: u64, reward: f64) {
        let index = *self.by_action.entry(action_hash).or_insert_with(|| {
            self.arms.push(LocalArm::new(action));
            self.arms.len() - 1
        });
        let arm = &mut self.arms[index];
        arm.total_reward += reward;
        arm.visits += 1;
    }
}

/// The global bandit table: state hash to local arms.
#[derive(Debug)]
pub struct GlobalMab<A> {
    states: HashMap<u64, LocalMab<A>>,
}

impl<A> Default for GlobalMab<A> {
    fn default() -> Self {
        Self { states: HashMap::new() }
    }
}

impl<A> GlobalMab<A> {
    pub fn local(&self, state_hash: u64) -> Option<&LocalMab<A>> {
        self.states.get(&state_hash)
    }

    pub fn has_arms(&self, state_hash: u64) -> bool {
        self.local(state_hash).map_or(false, |local| !local.is_empty())
    }

    /// Credit `reward` to the (state, action) arm, creating it on first use.
    pub fn record(&mut self, state_hash: u64, action: A, action_hash: u64, reward: f64) {
        self.states.entry(state_hash).or_default().record(action, action_hash, reward);
    }
}

pub struct NmctsPlanner<S: SearchState> {
    pub(crate) tree_search: TreeSearch<S>,
    pub(crate) exploration: Box<dyn ExplorationStrategy<S>>,
    pub(crate) sampling: Box<dyn SamplingStrategy<S>>,
    pub(crate) policy_global: f64,
}

impl<S: SearchState> NmctsPlanner<S> {
    pub fn builder() -> NmctsBuilder<S> {
        NmctsBuilder::new()
    }

    /// One naive-sampling step from `state`. Explores by drawing a fresh
    /// action, playing it out and crediting the arm; exploits by returning
    /// the best known arm (or, with probability `policy_global`, a uniformly
    /// random one).
    fn naive_sampling(
        &self,
        ctx: &mut SearchContext<S>,
        mab: &mut GlobalMab<S::Action>,
        state: &S,
        iteration: i32,
    ) -> Result<S::Action> {
        let state_hash = state.content_hash();
        if !mab.has_arms(state_hash) || self.exploration.explore(ctx, iteration) {
            let action = self.sampling.sample(ctx, state)?;
            let next = ctx.apply_action(state, &action)?;
            let end = self.tree_search.playout.playout(ctx, next)?;
            let reward = self.tree_search.evaluation.evaluate(ctx, &end, action.player())?;
            mab.record(state_hash, action.clone(), fnv1_hash(&action), reward);
            return Ok(action);
        }

        let exploit_uniformly = ctx.rng().gen::<f64>() < self.policy_global;
        let local = mab.local(state_hash).expect("has_arms checked above");
        let arms = local.arms();
        if exploit_uniformly {
            let index = ctx.rng().gen_range(0..arms.len());
            return Ok(arms[index].action().clone());
        }

        let best = arms
            .iter()
            .map(LocalArm::expected_reward)
            .fold(f64::NEG_INFINITY, f64::max);
        let tied: Vec<&LocalArm<S::Action>> =
            arms.iter().filter(|arm| approx_eq(arm.expected_reward(), best)).collect();
        let index = ctx.rng().gen_range(0..tied.len());
        Ok(tied[index].action().clone())
    }

    /// Walk the tree by naive sampling. Sampled actions that already have a
    /// child leading to the same active player continue the descent; a child
    /// that hands the turn over ends the segment; an unseen action becomes a
    /// new child.
    fn naive_select_and_expand(
        &self,
        ctx: &mut SearchContext<S>,
        tree: &mut SearchTree<S>,
        mab: &mut GlobalMab<S::Action>,
        iteration: i32,
    ) -> Result<NodeIndex> {
        let mut current = tree.root();
        loop {
            let state = tree
                .node(current)
                .state()
                .context("naive search nodes always cache their state")?
                .make_copy();
            if ctx.goal_done(&state) {
                return Ok(current);
            }
            let action = self.naive_sampling(ctx, mab, &state, iteration)?;
            if let Some(existing) = tree.find_child_by_action(current, &action) {
                let parent_player = state.status().active_player();
                let child_player =
                    tree.node(existing).state().and_then(|s| s.status().active_player());
                if child_player.is_some() && child_player == parent_player {
                    current = existing;
                    continue;
                }
                return Ok(existing);
            }
            let next = ctx.apply_action(&state, &action)?;
            return Ok(tree.add_child(current, action, Some(next)));
        }
    }
}

impl<S: SearchState> Planner<S> for NmctsPlanner<S> {
    fn search(&self, ctx: &mut SearchContext<S>) -> Result<S::Action> {
        ensure_searchable(ctx)?;
        let mut tree = ctx
            .take_start_tree()
            .unwrap_or_else(|| SearchTree::with_root(Some(ctx.source().make_copy())));
        let mut mab = GlobalMab::default();

        let budget = self.tree_search.budget;
        let deadline = budget.deadline(Instant::now());
        let mut iteration = 0;
        let mut max_depth = 0;
        while budget.allows(iteration, deadline) {
            match self.naive_select_and_expand(ctx, &mut tree, &mut mab, iteration) {
                Ok(leaf) => {
                    max_depth = max_depth.max(tree.depth(leaf));
                    let state = tree
                        .node(leaf)
                        .state()
                        .context("naive search nodes always cache their state")?
                        .make_copy();
                    let end = if ctx.goal_done(&state) {
                        state
                    } else {
                        self.tree_search.playout.playout(ctx, state)?
                    };
                    if let Err(error) = self.tree_search.back_propagation.back_propagate(
                        ctx,
                        &mut tree,
                        &*self.tree_search.evaluation,
                        leaf,
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
        ctx.report_mut().max_depth = max_depth;
        debug!(iterations = iteration, max_depth, nodes = tree.node_count(),
            "Naive Monte-Carlo search complete");

        let action = self.tree_search.finalize(ctx, &tree)?;
        ctx.store_start_tree(tree);
        Ok(action)
    }
}

/// Builder for [NmctsPlanner].
pub struct NmctsBuilder<S: SearchState> {
    tree_search: TreeSearch<S>,
    exploration: Box<dyn ExplorationStrategy<S>>,
    sampling: Box<dyn SamplingStrategy<S>>,
    policy_global: f64,
}

impl<S: SearchState> NmctsBuilder<S> {
    pub fn new() -> Self {
        Self {
            tree_search: TreeSearch::with_defaults(),
            exploration: Box::new(ChanceExploration::default()),
            sampling: Box::new(RandomSampling),
            policy_global: 0.0,
        }
    }

    pub fn budget(mut self, budget: SearchBudget) -> Self {
        self.tree_search.budget = budget;
        self
    }

    pub fn iterations(self, iterations: i32) -> Self {
        self.budget(SearchBudget::with_iterations(iterations))
    }

    pub fn exploration(mut self, exploration: impl ExplorationStrategy<S> + 'static) -> Self {
        self.exploration = Box::new(exploration);
        self
    }

    pub fn sampling(mut self, sampling: impl SamplingStrategy<S> + 'static) -> Self {
        self.sampling = Box::new(sampling);
        self
    }

    /// Probability that exploitation draws a uniformly random arm instead of
    /// the best one. Must lie in `[0, 1]`.
    pub fn policy_global(mut self, policy_global: f64) -> Self {
        self.policy_global = policy_global;
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

    pub fn build(self) -> Result<NmctsPlanner<S>> {
        ensure!(
            (0.0..=1.0).contains(&self.policy_global),
            "policy_global must lie in [0, 1], got {}",
            self.policy_global
        );
        Ok(NmctsPlanner {
            tree_search: self.tree_search,
            exploration: self.exploration,
            sampling: self.sampling,
            policy_global: self.policy_global,
        })
    }
}

impl<S: SearchState> Default for NmctsBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
