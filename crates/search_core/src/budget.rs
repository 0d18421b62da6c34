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

use std::time::{Duration, Instant};

use crate::primitives::{NO_LIMIT_ON_ITERATIONS, NO_LIMIT_ON_THINKING_TIME};

/// Compute budget for one search: an iteration count, a wall-clock limit, or
/// both. Either bound may be the `-1` sentinel for "unlimited"; when both are
/// set, whichever trips first ends the search. The check happens at iteration
/// boundaries only, so a single in-flight iteration may overrun the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    pub iterations: i32,
    pub time_ms: i64,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self { iterations: NO_LIMIT_ON_ITERATIONS, time_ms: NO_LIMIT_ON_THINKING_TIME }
    }
}

impl SearchBudget {
    pub fn with_iterations(iterations: i32) -> Self {
        Self { iterations, ..Self::default() }
    }

    pub fn with_time_ms(time_ms: i64) -> Self {
        Self { time_ms, ..Self::default() }
    }

    /// The wall-clock deadline for a search starting at `start`, if any.
    pub fn deadline(&self, start: Instant) -> Option<Instant> {
        if self.time_ms == NO_LIMIT_ON_THINKING_TIME {
            None
        } else {
            Some(start + Duration::from_millis(self.time_ms.max(0) as u64))
        }
    }

    /// Whether iteration number `iteration` (zero-based) may still run.
    pub fn allows(&self, iteration: i32, deadline: Option<Instant>) -> bool {
        (self.iterations == NO_LIMIT_ON_ITERATIONS || iteration < self.iterations)
            && deadline.map_or(true, |deadline| Instant::now() < deadline)
    }
}
