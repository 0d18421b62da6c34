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

//! Monte-Carlo planners built on the `search_core` strategy interfaces.
//!
//! Four planners share the same budget and finalization machinery: flat
//! Monte-Carlo search over one ply, full Monte-Carlo tree search, naive
//! Monte-Carlo tree search driven by global/local bandit tables, and linear
//! side-information search with sequential-halving candidate evaluation.

pub mod flat_monte_carlo;
pub mod linear_side_information;
pub mod mcts;
pub mod naive_monte_carlo;
pub mod playout;
pub mod tree_search;
