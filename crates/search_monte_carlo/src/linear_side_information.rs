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

//! Linear side-information search.
//!
//! Two phases over fixed sample budgets. Generation spends `Ng` playouts
//! building side information about which sub-decisions look promising, then
//! draws a candidate set from it. Evaluation runs sequential halving over the
//! candidates: every round splits the remaining per-arm budget evenly,
//! re-evaluates each survivor and discards the weaker half, until a single
//! action remains.
//!
//! What "side information" means is domain-specific; the planner is generic
//! over it. The bundled default treats each root action as its own
//! sub-decision and weighs it in an oddment table by random-playout value,
//! which is the right shape for games whose actions are atomic.

use anyhow::{ensure, Context, Result};
use ordered_float::OrderedFloat;
use tracing::debug;

use search_core::evaluation::{StateEvaluation, WinLossDrawEvaluation};
use search_core::game_state::SearchState;
use search_core::oddment::OddmentTable;
use search_core::playout::PlayoutStrategy;
use search_core::sampling::{RandomSampling, SamplingStrategy};
use search_core::search_context::{Planner, SearchContext};

use crate::playout::RandomPlayout;
use crate::tree_search::ensure_searchable;

/// Builds the side information consumed by candidate sampling. `R` is the
/// side-information type; implementations for games with combinatorial
/// actions typically keep one weight table per sub-decision dimension.
pub trait SideInformationStrategy<S: SearchState, R> {
    fn create(&self, ctx: &mut SearchContext<S>, samples: usize) -> Result<R>;
}

/// Draws one candidate action from the side information.
pub trait LsiSamplingStrategy<S: SearchState, R> {
    fn sample(&self, ctx: &mut SearchContext<S>, state: &S, side_information: &R)
        -> Result<S::Action>;
}

/// Default side information: one oddment table over the root actions, each
/// weighted by the value of random playouts that started with it. Values in
/// `[-1, 1]` are shifted to a non-negative scale so losses carry no weight
/// instead of a negative one.
pub struct ActionValueSideInformation<S: SearchState> {
    playout: Box<dyn PlayoutStrategy<S>>,
    evaluation: Box<dyn StateEvaluation<S>>,
    sampling: Box<dyn SamplingStrategy<S>>,
}

impl<S: SearchState> Default for ActionValueSideInformation<S> {
    fn default() -> Self {
        Self {
            playout: Box::new(RandomPlayout),
            evaluation: Box::new(WinLossDrawEvaluation),
            sampling: Box::new(RandomSampling),
        }
    }
}

impl<S: SearchState> SideInformationStrategy<S, OddmentTable<S::Action>>
    for ActionValueSideInformation<S>
{
    fn create(&self, ctx: &mut SearchContext<S>, samples: usize) -> Result<OddmentTable<S::Action>> {
        let source = ctx.source().make_copy();
        let perspective = ctx.source_active_player()?;
        // Insertion-ordered accumulation keeps the table, and therefore
        // sampling, deterministic for a fixed seed.
        let mut weights: Vec<(S::Action, f64)> = Vec::new();
        for _ in 0..samples {
            let action = self.sampling.sample(ctx, &source)?;
            let next = ctx.apply_action(&source, &action)?;
            let end = self.playout.playout(ctx, next)?;
            let value = self.evaluation.evaluate(ctx, &end, perspective)? + 1.0;
            match weights.iter_mut().find(|(seen, _)| *seen == action) {
                Some((_, weight)) => *weight += value,
                None => weights.push((action, value)),
            }
        }

        let mut table = OddmentTable::new();
        for (action, weight) in weights {
            table.add(action, weight);
        }
        table.recompute()?;
        Ok(table)
    }
}

/// Default candidate sampling: draw from the oddment table.
pub struct OddmentSampling;

impl<S: SearchState> LsiSamplingStrategy<S, OddmentTable<S::Action>> for OddmentSampling {
    fn sample(
        &self,
        ctx: &mut SearchContext<S>,
        _state: &S,
        side_information: &OddmentTable<S::Action>,
    ) -> Result<S::Action> {
        Ok(side_information.sample(ctx.rng())?.clone())
    }
}

pub struct LsiPlanner<S: SearchState, R> {
    pub(crate) side_information: Box<dyn SideInformationStrategy<S, R>>,
    pub(crate) sampling: Box<dyn LsiSamplingStrategy<S, R>>,
    pub(crate) playout: Box<dyn PlayoutStrategy<S>>,
    pub(crate) evaluation: Box<dyn StateEvaluation<S>>,
    pub(crate) generation_samples: usize,
    pub(crate) evaluation_samples: usize,
}

impl<S: SearchState> LsiPlanner<S, OddmentTable<S::Action>> {
    /// The planner with the bundled action-value side information, suitable
    /// for games with atomic actions.
    pub fn action_value(generation_samples: usize, evaluation_samples: usize) -> Self {
        Self::builder(ActionValueSideInformation::default(), OddmentSampling)
            .generation_samples(generation_samples)
            .evaluation_samples(evaluation_samples)
            .build()
    }
}

impl<S: SearchState, R> LsiPlanner<S, R> {
    pub fn builder(
        side_information: impl SideInformationStrategy<S, R> + 'static,
        sampling: impl LsiSamplingStrategy<S, R> + 'static,
    ) -> LsiBuilder<S, R> {
        LsiBuilder {
            side_information: Box::new(side_information),
            sampling: Box::new(sampling),
            playout: Box::new(RandomPlayout),
            evaluation: Box::new(WinLossDrawEvaluation),
            generation_samples: 1_000,
            evaluation_samples: 1_000,
        }
    }
}

/// Number of halving rounds for a candidate set: `ceil(log2 n)`, at least
/// one.
fn round_count(candidates: usize) -> usize {
    if candidates <= 2 {
        1
    } else {
        (usize::BITS - (candidates - 1).leading_zeros()) as usize
    }
}

impl<S: SearchState, R> Planner<S> for LsiPlanner<S, R> {
    fn search(&self, ctx: &mut SearchContext<S>) -> Result<S::Action> {
        ensure_searchable(ctx)?;
        let source = ctx.source().make_copy();
        let perspective = ctx.source_active_player()?;

        // Generation: build side information, then draw the candidate set.
        let side_information = self.side_information.create(ctx, self.generation_samples)?;
        ctx.report_mut().generation_samples_used = self.generation_samples;
        let mut candidates: Vec<S::Action> = Vec::new();
        for _ in 0..self.evaluation_samples {
            let action = self.sampling.sample(ctx, &source, &side_information)?;
            if !candidates.contains(&action) {
                candidates.push(action);
            }
        }
        ensure!(!candidates.is_empty(), "side information produced no candidate actions");

        // Evaluation: sequential halving over the candidate set.
        let rounds = round_count(candidates.len());
        let mut remaining = candidates;
        let mut samples_used = 0;
        for _ in 0..rounds {
            let per_arm = 1.max(self.evaluation_samples / (remaining.len() * rounds));
            let mut valued: Vec<(S::Action, OrderedFloat<f64>)> =
                Vec::with_capacity(remaining.len());
            for action in remaining {
                let next = ctx.apply_action(&source, &action)?;
                let mut reward = 0.0;
                for _ in 0..per_arm {
                    let end = self.playout.playout(ctx, next.make_copy())?;
                    reward += self.evaluation.evaluate(ctx, &end, perspective)?;
                }
                samples_used += per_arm;
                valued.push((action, OrderedFloat(reward)));
            }
            valued.sort_by(|a, b| b.1.cmp(&a.1));
            let keep = (valued.len() + 1) / 2;
            remaining = valued.into_iter().take(keep).map(|(action, _)| action).collect();
        }
        ctx.report_mut().evaluation_samples_used = samples_used;
        debug!(
            generation_samples = self.generation_samples,
            evaluation_samples = samples_used,
            "Linear side-information search complete"
        );

        remaining.into_iter().next().context("sequential halving eliminated every candidate")
    }
}

/// Builder for [LsiPlanner]. The side-information and sampling strategies
/// define the planner, so they are constructor arguments rather than
/// optional setters.
pub struct LsiBuilder<S: SearchState, R> {
    side_information: Box<dyn SideInformationStrategy<S, R>>,
    sampling: Box<dyn LsiSamplingStrategy<S, R>>,
    playout: Box<dyn PlayoutStrategy<S>>,
    evaluation: Box<dyn StateEvaluation<S>>,
    generation_samples: usize,
    evaluation_samples: usize,
}

impl<S: SearchState, R> LsiBuilder<S, R> {
    /// Sample budget for the generation phase (`Ng`).
    pub fn generation_samples(mut self, samples: usize) -> Self {
        self.generation_samples = samples;
        self
    }

    /// Sample budget for the evaluation phase (`Ne`).
    pub fn evaluation_samples(mut self, samples: usize) -> Self {
        self.evaluation_samples = samples;
        self
    }

    pub fn playout(mut self, playout: impl PlayoutStrategy<S> + 'static) -> Self {
        self.playout = Box::new(playout);
        self
    }

    pub fn evaluation(mut self, evaluation: impl StateEvaluation<S> + 'static) -> Self {
        self.evaluation = Box::new(evaluation);
        self
    }

    pub fn build(self) -> LsiPlanner<S, R> {
        LsiPlanner {
            side_information: self.side_information,
            sampling: self.sampling,
            playout: self.playout,
            evaluation: self.evaluation,
            generation_samples: self.generation_samples,
            evaluation_samples: self.evaluation_samples,
        }
    }
}
