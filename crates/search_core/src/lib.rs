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

//! Core data types and strategy interfaces for Monte-Carlo game search.
//!
//! The search algorithms themselves live in the `search_monte_carlo` crate;
//! this crate defines the vocabulary they share: the game-state abstraction,
//! the lazily-expanded search tree, the pluggable strategy interfaces, and the
//! [search_context::SearchContext] which wires everything together for a
//! single search invocation.

pub mod application;
pub mod back_propagation;
pub mod budget;
pub mod evaluation;
pub mod expansion;
pub mod exploration;
pub mod final_selection;
pub mod game_logic;
pub mod game_state;
pub mod goal;
pub mod hashing;
pub mod oddment;
pub mod playout;
pub mod position_generator;
pub mod primitives;
pub mod sampling;
pub mod search_context;
pub mod search_tree;
pub mod selection;
pub mod solution;

#[cfg(test)]
pub mod take_away;
