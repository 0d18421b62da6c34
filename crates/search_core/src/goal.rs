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

use crate::game_state::SearchState;
use crate::primitives::TurnNumber;

/// Decides when a playout or tree descent stops. Implementations must
/// eventually report done on any reachable state, or playouts will not
/// terminate.
pub trait GoalStrategy<S: SearchState> {
    fn done(&self, source: &S, state: &S) -> bool;
}

/// Stop only at the end of the game.
pub struct TerminalGoal;

impl<S: SearchState> GoalStrategy<S> for TerminalGoal {
    fn done(&self, _source: &S, state: &S) -> bool {
        state.status().is_terminal()
    }
}

/// Stop at the end of the game, or once a fixed number of turns has elapsed
/// past the source position. Useful for games too long to play out in full.
pub struct TurnCutoffGoal {
    pub turn_cutoff: TurnNumber,
}

impl<S: SearchState> GoalStrategy<S> for TurnCutoffGoal {
    fn done(&self, source: &S, state: &S) -> bool {
        state.status().is_terminal()
            || state.turn().saturating_sub(source.turn()) >= self.turn_cutoff
    }
}
