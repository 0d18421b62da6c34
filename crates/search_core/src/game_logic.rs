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
use crate::position_generator::PositionGenerator;

/// The rules of the game being searched, implemented by the embedding
/// application. The search core never inspects positions directly; every
/// transition goes through this interface.
pub trait GameLogic<S: SearchState> {
    /// Apply `action` to `state`, producing the successor position. Must not
    /// mutate `state`; the search hands out independent copies.
    fn apply(&self, state: &S, action: &S::Action) -> Result<S>;

    /// Enumerate the legal actions of the active player. The generator must
    /// be deterministic for an unchanged `state` and must own everything it
    /// needs, since it outlives the borrow of `state`.
    fn expand(&self, state: &S) -> PositionGenerator<S::Action>;

    /// Whether the game has ended in this position.
    fn done(&self, state: &S) -> bool {
        state.status().is_terminal()
    }

    /// Per-player scores for this position, indexed in the game's fixed
    /// player order. Used for reporting; the search itself ranks positions
    /// through a
    /// [StateEvaluation](crate::evaluation::StateEvaluation) strategy.
    fn scores(&self, state: &S) -> Result<Vec<f64>>;
}
