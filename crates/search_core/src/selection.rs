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

use crate::evaluation::{NodeEvaluation, ScoreUcb};
use crate::game_state::SearchState;
use crate::primitives::{DEFAULT_MINIMUM_VISITS, DEFAULT_UCB_EXPLORATION};
use crate::search_context::SearchContext;
use crate::search_tree::{NodeIndex, SearchTree};

/// Picks which child of a fully-expanded node the descent continues into.
pub trait SelectionStrategy<S: SearchState> {
    fn select_next(
        &self,
        ctx: &mut SearchContext<S>,
        tree: &mut SearchTree<S>,
        node: NodeIndex,
    ) -> Result<NodeIndex>;
}

/// UCB selection with a warm-up threshold.
///
/// While the parent has fewer than `threshold_factor * children` visits the
/// children are cycled in insertion order, guaranteeing every child at least
/// one visit before its score means anything. When the threshold is reached
/// the child list is sorted by score once; afterwards only the front child is
/// re-scored per call and swapped one position down if it fell behind, which
/// keeps the list approximately sorted without a full re-sort.
pub struct UcbSelection<S: SearchState> {
    pub evaluation: Box<dyn NodeEvaluation<S>>,
    pub threshold_factor: u64,
}

impl<S: SearchState> UcbSelection<S> {
    pub fn with_exploration(exploration: f64) -> Self {
        Self {
            evaluation: Box::new(ScoreUcb { exploration }),
            threshold_factor: DEFAULT_MINIMUM_VISITS,
        }
    }
}

impl<S: SearchState> Default for UcbSelection<S> {
    fn default() -> Self {
        Self::with_exploration(DEFAULT_UCB_EXPLORATION)
    }
}

impl<S: SearchState> SelectionStrategy<S> for UcbSelection<S> {
    fn select_next(
        &self,
        _ctx: &mut SearchContext<S>,
        tree: &mut SearchTree<S>,
        node: NodeIndex,
    ) -> Result<NodeIndex> {
        let child_count = tree.children(node).len() as u64;
        ensure!(child_count > 0, "selection requires a node with at least one child");

        let parent_visits = tree.node(node).visits();
        let threshold = self.threshold_factor * child_count;
        if parent_visits < threshold {
            let index = (parent_visits % child_count) as usize;
            return Ok(tree.children(node)[index]);
        }
        if parent_visits == threshold {
            tree.sort_children_by_score(node, &*self.evaluation);
            return Ok(tree.children(node)[0]);
        }

        let first = tree.children(node)[0];
        let first_score = tree.calculate_score(first, &*self.evaluation);
        if child_count > 1 {
            let second = tree.children(node)[1];
            if first_score < tree.node(second).evaluated_score() {
                tree.swap_children(node, 0, 1);
            }
        }
        Ok(tree.children(node)[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::take_away::{fixture_context, take, TakeAwayState};

    fn selection_fixture(
        children: u32,
    ) -> (SearchContext<TakeAwayState>, SearchTree<TakeAwayState>, Vec<NodeIndex>) {
        let ctx = fixture_context(TakeAwayState::new(10), 17);
        let mut tree = SearchTree::with_root(Some(TakeAwayState::new(10)));
        let root = tree.root();
        let indices =
            (1..=children).map(|n| tree.add_child(root, take(n), None)).collect();
        (ctx, tree, indices)
    }

    #[test]
    fn cycles_children_below_threshold() {
        let (mut ctx, mut tree, children) = selection_fixture(3);
        let selection = UcbSelection::default();
        for visit in 0..6u64 {
            let root = tree.root();
            let selected = selection.select_next(&mut ctx, &mut tree, root).unwrap();
            assert_eq!(selected, children[(visit % 3) as usize]);
            tree.visit(tree.root(), 0.0);
        }
    }

    #[test]
    fn sorts_once_at_threshold_then_prefers_best() {
        let (mut ctx, mut tree, children) = selection_fixture(2);
        let root = tree.root();
        let selection = UcbSelection::default();

        // Drive the parent to the sort threshold with one clearly better child.
        for _ in 0..20 {
            tree.visit(children[0], -1.0);
            tree.visit(children[1], 1.0);
            tree.visit(root, 0.0);
        }
        for _ in 0..20 {
            tree.visit(root, 0.0);
        }
        let selected = selection.select_next(&mut ctx, &mut tree, root).unwrap();
        assert_eq!(selected, children[1]);
        assert_eq!(tree.children(root)[0], children[1]);
    }

    #[test]
    fn front_child_swaps_down_when_it_falls_behind() {
        let (mut ctx, mut tree, children) = selection_fixture(2);
        let root = tree.root();
        let selection = UcbSelection::default();
        for _ in 0..20 {
            tree.visit(children[0], 1.0);
            tree.visit(children[1], 0.9);
            tree.visit(root, 0.0);
        }
        for _ in 0..20 {
            tree.visit(root, 0.0);
        }
        assert_eq!(selection.select_next(&mut ctx, &mut tree, root).unwrap(), children[0]);

        // Losing streak for the front child; the next selection re-scores it
        // and bubbles it down one position.
        for _ in 0..40 {
            tree.visit(children[0], -1.0);
            tree.visit(root, 0.0);
        }
        let selected = selection.select_next(&mut ctx, &mut tree, root).unwrap();
        assert_eq!(selected, children[1]);
        assert_eq!(tree.children(root), &[children[1], children[0]]);
    }

    #[test]
    fn childless_node_is_an_error() {
        let (mut ctx, mut tree, _) = selection_fixture(0);
        let selection = UcbSelection::default();
        let root = tree.root();
        assert!(selection.select_next(&mut ctx, &mut tree, root).is_err());
    }
}
