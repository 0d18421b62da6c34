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

use anyhow::{ensure, Result};
use rand::Rng;

use crate::game_state::SearchState;
use crate::search_context::SearchContext;

/// Draws a single action from a position, used by planners that sample the
/// action space instead of enumerating it into a tree.
pub trait SamplingStrategy<S: SearchState> {
    fn sample(&self, ctx: &mut SearchContext<S>, state: &S) -> Result<S::Action>;
}

/// Uniform choice over the legal actions, drawn from the context RNG.
pub struct RandomSampling;

impl<S: SearchState> SamplingStrategy<S> for RandomSampling {
    fn sample(&self, ctx: &mut SearchContext<S>, state: &S) -> Result<S::Action> {
        let mut generator = ctx.logic().expand(state);
        let mut actions = Vec::new();
        while generator.advance() {
            actions.push(generator.current().clone());
        }
        ensure!(!actions.is_empty(), "no legal actions to sample from");
        let index = ctx.rng().gen_range(0..actions.len());
        Ok(actions.swap_remove(index))
    }
}
