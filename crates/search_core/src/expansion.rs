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
use crate::primitives::DEFAULT_MINIMUM_VISITS;
use crate::search_context::SearchContext;
use crate::search_tree::{NodeIndex, SearchTree};

/// Grows the tree at the frontier of a descent. Returns the newly created
/// child, or the input node unchanged when expansion is skipped or the node
/// has no unexpanded actions left.
pub trait ExpansionStrategy<S: SearchState> {
    fn expand(
        &self,
        ctx: &mut SearchContext<S>,
        tree: &mut SearchTree<S>,
        node: NodeIndex,
        state: &S,
    ) -> Result<NodeIndex>;
}

/// Expands one action per call, but only once a node has collected
/// `minimum_visits` visits. The root is always expanded: refusing to grow
/// the first ply would leave the search with nothing to recommend.
pub struct MinimumTExpansion {
    pub minimum_visits: u64,
}

impl Default for MinimumTExpansion {
    fn default() -> Self {
        Self { minimum_visits: DEFAULT_MINIMUM_VISITS }
    }
}

impl<S: SearchState> ExpansionStrategy<S> for MinimumTExpansion {
    fn expand(
        &self,
        ctx: &mut SearchContext<S>,
        tree: &mut SearchTree<S>,
        node: NodeIndex,
        state: &S,
    ) -> Result<NodeIndex> {
        if !tree.node(node).is_root() && tree.node(node).visits() < self.minimum_visits {
            return Ok(node);
        }
        if tree.node(node).generator().is_none() {
            let generator = ctx.logic().expand(state);
            tree.install_generator(node, generator);
        }
        Ok(match tree.next_unexpanded_action(node) {
            Some(action) => tree.add_child(node, action, None),
            None => node,
        })
    }
}
