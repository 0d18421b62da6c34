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

use search_core::game_state::SearchState;
use search_core::playout::PlayoutStrategy;
use search_core::search_context::SearchContext;

/// Plays uniformly random legal actions until the context's goal is
/// satisfied. The workhorse default playout; embedding applications
/// substitute heuristic playouts through the same interface.
pub struct RandomPlayout;

impl<S: SearchState> PlayoutStrategy<S> for RandomPlayout {
    fn playout(&self, ctx: &mut SearchContext<S>, state: S) -> Result<S> {
        let mut state = state;
        while !ctx.goal_done(&state) {
            let mut generator = ctx.logic().expand(&state);
            let mut actions = Vec::new();
            while generator.advance() {
                actions.push(generator.current().clone());
            }
            ensure!(
                !actions.is_empty(),
                "playout reached a non-terminal position with no legal actions"
            );
            let index = ctx.rng().gen_range(0..actions.len());
            let action = actions.swap_remove(index);
            state = ctx.apply_action(&state, &action)?;
        }
        Ok(state)
    }
}
