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

//! The search context: one search invocation's worth of wiring.
//!
//! A context binds a source position, the game logic, the ambient strategies
//! shared by every planner (goal, application), a seedable RNG and the
//! planner itself. Contexts are fully independent of each other; nothing in
//! the core touches process-wide mutable state, so any number of contexts may
//! run in parallel as long as each owns its own pieces.

use anyhow::{bail, ensure, Context as _, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::application::{ApplicationStrategy, DirectApplication};
use crate::game_logic::GameLogic;
use crate::game_state::{GameStatus, SearchState};
use crate::goal::{GoalStrategy, TerminalGoal};
use crate::search_tree::SearchTree;

/// Lifecycle of a [SearchContext]. A solution exists only in `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Ready,
    InProgress,
    Success,
    Failure,
}

/// Observability counters filled in by the planner during
/// [SearchContext::execute].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchReport {
    /// Iterations actually run, including abandoned ones.
    pub iterations: i32,
    /// Deepest tree node reached by any iteration.
    pub max_depth: u32,
    /// Samples spent building side information (linear side-information
    /// search only).
    pub generation_samples_used: usize,
    /// Playout samples spent evaluating candidates (linear side-information
    /// search only).
    pub evaluation_samples_used: usize,
}

/// A search algorithm: consumes the context's budgeted compute and returns
/// the recommended action. Implementations live in `search_monte_carlo`.
pub trait Planner<S: SearchState> {
    fn search(&self, ctx: &mut SearchContext<S>) -> Result<S::Action>;
}

pub struct SearchContext<S: SearchState> {
    source: S,
    logic: Box<dyn GameLogic<S>>,
    goal: Box<dyn GoalStrategy<S>>,
    application: Box<dyn ApplicationStrategy<S>>,
    planner: Option<Box<dyn Planner<S>>>,
    rng: StdRng,
    start_tree: Option<SearchTree<S>>,
    status: SearchStatus,
    solution: Option<S::Action>,
    report: SearchReport,
}

impl<S: SearchState> SearchContext<S> {
    pub fn builder(source: S) -> SearchContextBuilder<S> {
        SearchContextBuilder {
            source,
            logic: None,
            goal: Box::new(TerminalGoal),
            application: Box::new(DirectApplication),
            planner: None,
            seed: None,
        }
    }

    /// Run the planner. Requires `Ready`; on success the solution is stored
    /// and the status becomes `Success`, on error the status becomes
    /// `Failure` and the error is returned to the caller.
    pub fn execute(&mut self) -> Result<()> {
        ensure!(
            self.status == SearchStatus::Ready,
            "search context is not ready to execute (status {:?})",
            self.status
        );
        self.report = SearchReport::default();
        self.solution = None;
        self.status = SearchStatus::InProgress;

        let planner = match self.planner.take() {
            Some(planner) => planner,
            None => {
                self.status = SearchStatus::Failure;
                bail!("no planner configured on this search context");
            }
        };
        let result = planner.search(self);
        self.planner = Some(planner);

        match result {
            Ok(action) => {
                self.solution = Some(action);
                self.status = SearchStatus::Success;
                Ok(())
            }
            Err(error) => {
                self.solution = None;
                self.status = SearchStatus::Failure;
                Err(error)
            }
        }
    }

    /// Return to `Ready`, clearing the solution and report. The warm-start
    /// tree left behind by the previous search is dropped unless
    /// `clear_start_tree` is false.
    pub fn reset(&mut self, clear_start_tree: bool) {
        self.status = SearchStatus::Ready;
        self.solution = None;
        self.report = SearchReport::default();
        if clear_start_tree {
            self.start_tree = None;
        }
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// The recommended action. Defined only while [SearchContext::status] is
    /// `Success`.
    pub fn solution(&self) -> Option<&S::Action> {
        self.solution.as_ref()
    }

    pub fn report(&self) -> &SearchReport {
        &self.report
    }

    pub fn report_mut(&mut self) -> &mut SearchReport {
        &mut self.report
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The player to move at the source position, which is also the player
    /// the search optimizes for.
    pub fn source_active_player(&self) -> Result<S::Player> {
        match self.source.status() {
            GameStatus::InProgress { active_player } => Ok(active_player),
            GameStatus::Completed { .. } => bail!("source position is already terminal"),
        }
    }

    pub fn logic(&self) -> &dyn GameLogic<S> {
        &*self.logic
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Whether `state` satisfies the context's goal, e.g. reaching the end of
    /// the game or a turn cutoff relative to the source.
    pub fn goal_done(&self, state: &S) -> bool {
        self.goal.done(&self.source, state)
    }

    /// Apply an action through the configured application strategy.
    pub fn apply_action(&self, state: &S, action: &S::Action) -> Result<S> {
        self.application.apply(&*self.logic, state, action)
    }

    /// Detach the warm-start tree, if a previous search left one behind.
    pub fn take_start_tree(&mut self) -> Option<SearchTree<S>> {
        self.start_tree.take()
    }

    /// Store the search tree for inspection and for warm-starting the next
    /// search on this context.
    pub fn store_start_tree(&mut self, tree: SearchTree<S>) {
        self.start_tree = Some(tree);
    }

    pub fn start_tree(&self) -> Option<&SearchTree<S>> {
        self.start_tree.as_ref()
    }
}

pub struct SearchContextBuilder<S: SearchState> {
    source: S,
    logic: Option<Box<dyn GameLogic<S>>>,
    goal: Box<dyn GoalStrategy<S>>,
    application: Box<dyn ApplicationStrategy<S>>,
    planner: Option<Box<dyn Planner<S>>>,
    seed: Option<u64>,
}

impl<S: SearchState> SearchContextBuilder<S> {
    pub fn logic(mut self, logic: impl GameLogic<S> + 'static) -> Self {
        self.logic = Some(Box::new(logic));
        self
    }

    pub fn goal(mut self, goal: impl GoalStrategy<S> + 'static) -> Self {
        self.goal = Box::new(goal);
        self
    }

    pub fn application(mut self, application: impl ApplicationStrategy<S> + 'static) -> Self {
        self.application = Box::new(application);
        self
    }

    pub fn planner(mut self, planner: impl Planner<S> + 'static) -> Self {
        self.planner = Some(Box::new(planner));
        self
    }

    /// Seed for the context RNG. Searches with the same seed, source and
    /// strategies are fully reproducible; without a seed the RNG is
    /// initialized from OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<SearchContext<S>> {
        let logic = self.logic.context("search context requires game logic")?;
        let planner = self.planner.context("search context requires a planner")?;
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(SearchContext {
            source: self.source,
            logic,
            goal: self.goal,
            application: self.application,
            planner: Some(planner),
            rng,
            start_tree: None,
            status: SearchStatus::Ready,
            solution: None,
            report: SearchReport::default(),
        })
    }
}
