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

//! Tools for testing the search planners.
//!
//! The planners are generic, so correctness checks run against Tic-Tac-Toe:
//! tiny enough that optimal play is known, rich enough to expose planners
//! that fail to see wins, losses and forced draws.

pub mod run_matchup_impl;
pub mod tictactoe;
pub mod tictactoe_agents;
