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

use anyhow::Result;

use crate::game_state::SearchState;
use crate::search_context::SearchContext;

/// Drives a position forward until the context's goal is satisfied and
/// returns the end state. The strategy body belongs to the embedding
/// application; `search_monte_carlo` ships a uniformly random default.
pub trait PlayoutStrategy<S: SearchState> {
    fn playout(&self, ctx: &mut SearchContext<S>, state: S) -> Result<S>;
}
