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

use rand::Rng;

use crate::game_state::SearchState;
use crate::primitives::DEFAULT_EXPLORE_CHANCE;
use crate::search_context::SearchContext;

/// Chooses between exploring new actions and exploiting known ones, consulted
/// by the naive Monte-Carlo planner on every sampling step.
pub trait ExplorationStrategy<S: SearchState> {
    fn explore(&self, ctx: &mut SearchContext<S>, iteration: i32) -> bool;
}

/// Flips a biased coin on the context RNG.
pub struct ChanceExploration {
    pub chance: f64,
}

impl Default for ChanceExploration {
    fn default() -> Self {
        Self { chance: DEFAULT_EXPLORE_CHANCE }
    }
}

impl<S: SearchState> ExplorationStrategy<S> for ChanceExploration {
    fn explore(&self, ctx: &mut SearchContext<S>, _iteration: i32) -> bool {
        ctx.rng().gen::<f64>() < self.chance
    }
}
