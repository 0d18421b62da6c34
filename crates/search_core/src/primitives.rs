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

//! Fundamental constants and numeric helpers shared by the search crates

pub type TurnNumber = u32;

/// Sentinel for a search without an iteration budget.
pub const NO_LIMIT_ON_ITERATIONS: i32 = -1;

/// Sentinel for a search without a wall-clock budget, in milliseconds.
pub const NO_LIMIT_ON_THINKING_TIME: i64 = -1;

/// Tolerance under which two floating-point scores are considered equal, used
/// when collecting tied candidates for a random tie-break.
pub const DOUBLE_EQUALITY_TOLERANCE: f64 = 1e-7;

/// Guards divisions by the visit count of a node that has never been visited.
pub const VISITS_EPSILON: f64 = 1e-7;

/// Default probability with which [crate::exploration::ChanceExploration]
/// chooses to explore.
pub const DEFAULT_EXPLORE_CHANCE: f64 = 0.5;

/// Default exploration constant `C` for the UCB child score.
pub const DEFAULT_UCB_EXPLORATION: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Default minimum visit count before a node is expanded, and the per-child
/// factor before UCB ranking replaces round-robin child selection.
pub const DEFAULT_MINIMUM_VISITS: u64 = 20;

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < DOUBLE_EQUALITY_TOLERANCE
}

/// UCB1-style child score: exploitation ratio plus an exploration bonus that
/// shrinks as the child accumulates visits. `parent_visits` must be at least
/// one; both divisions are guarded by [VISITS_EPSILON] so that unvisited
/// children receive a very large bonus rather than dividing by zero.
pub fn ucb(score: f64, visits: f64, parent_visits: f64, c: f64) -> f64 {
    score / (visits + VISITS_EPSILON)
        + 2.0 * c * (parent_visits.ln() / (visits + VISITS_EPSILON)).sqrt()
}

/// Scales `weights` to sum to one. Weights that sum to zero normalize to all
/// zeroes rather than dividing by zero.
pub fn normalize(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        weights.iter().map(|w| w / total).collect()
    } else {
        vec![0.0; weights.len()]
    }
}

/// Shannon entropy (in nats) of the distribution obtained by normalizing
/// `weights`.
pub fn shannon_entropy(weights: &[f64]) -> f64 {
    normalize(weights)
        .into_iter()
        .filter(|p| *p > 0.0)
        .map(|p| -p * p.ln())
        .sum()
}
