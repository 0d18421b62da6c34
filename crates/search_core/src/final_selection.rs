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

use anyhow::{ensure, Result};
use ordered_float::OrderedFloat;
use rand::Rng;

use crate::game_state::SearchState;
use crate::primitives::approx_eq;
use crate::search_context::SearchContext;
use crate::search_tree::{NodeIndex, SearchTree};

/// Picks the child of the root that becomes the search's answer once the
/// budget is spent.
pub trait FinalNodeSelectionStrategy<S: SearchState> {
    fn select_final(
        &self,
        ctx: &mut SearchContext<S>,
        tree: &SearchTree<S>,
        root: NodeIndex,
    ) -> Result<NodeIndex>;
}

/// Highest score-per-visit among the children that were visited at all, with
/// ties broken uniformly by the context RNG. Visit counts are ignored beyond
/// the visited/unvisited distinction: a rarely-visited child with a great
/// average still wins.
pub struct BestRatioFinalSelection;

impl<S: SearchState> FinalNodeSelectionStrategy<S> for BestRatioFinalSelection {
    fn select_final(
        &self,
        ctx: &mut SearchContext<S>,
        tree: &SearchTree<S>,
        root: NodeIndex,
    ) -> Result<NodeIndex> {
        let visited: Vec<(NodeIndex, f64)> = tree
            .children(root)
            .iter()
            .copied()
            .filter(|&child| tree.node(child).visits() > 0)
            .map(|child| {
                let node = tree.node(child);
                (child, node.score() / node.visits() as f64)
            })
            .collect();
        ensure!(!visited.is_empty(), "no visited children to select a final node from");

        let best = visited.iter().map(|(_, ratio)| OrderedFloat(*ratio)).max().expect("non-empty");
        let tied: Vec<NodeIndex> = visited
            .iter()
            .filter(|(_, ratio)| approx_eq(*ratio, best.0))
            .map(|(child, _)| *child)
            .collect();
        Ok(tied[ctx.rng().gen_range(0..tied.len())])
    }
}
