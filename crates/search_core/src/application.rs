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

use crate::game_logic::GameLogic;
use crate::game_state::SearchState;

/// How the search applies an action to a position. Usually this just
/// delegates to the game logic, but an embedding can layer side effects
/// (instrumentation, transposition recording) over every transition without
/// touching the rules themselves.
pub trait ApplicationStrategy<S: SearchState> {
    fn apply(&self, logic: &dyn GameLogic<S>, state: &S, action: &S::Action) -> Result<S>;
}

/// Applies actions through [GameLogic::apply] unchanged.
pub struct DirectApplication;

impl<S: SearchState> ApplicationStrategy<S> for DirectApplication {
    fn apply(&self, logic: &dyn GameLogic<S>, state: &S, action: &S::Action) -> Result<S> {
        logic.apply(state, action)
    }
}
