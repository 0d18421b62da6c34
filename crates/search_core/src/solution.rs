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

use anyhow::{Context, Result};

use crate::game_state::SearchState;
use crate::search_context::SearchContext;
use crate::search_tree::{NodeIndex, SearchTree};

/// Converts the finally-selected node into the action the search recommends.
pub trait SolutionStrategy<S: SearchState> {
    fn solution(
        &self,
        ctx: &mut SearchContext<S>,
        tree: &SearchTree<S>,
        node: NodeIndex,
    ) -> Result<S::Action>;
}

/// The node's own payload action.
pub struct ActionSolution;

impl<S: SearchState> SolutionStrategy<S> for ActionSolution {
    fn solution(
        &self,
        _ctx: &mut SearchContext<S>,
        tree: &SearchTree<S>,
        node: NodeIndex,
    ) -> Result<S::Action> {
        tree.node(node).action().cloned().context("solution node carries no payload action")
    }
}
