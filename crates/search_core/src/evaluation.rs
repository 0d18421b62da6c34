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

use crate::game_state::{GameStatus, Outcome, SearchState};
use crate::primitives::{ucb, VISITS_EPSILON};
use crate::search_context::SearchContext;
use crate::search_tree::{NodeIndex, SearchTree};

/// Values a position from the perspective of a given player. Which player
/// that is gets decided by the caller: back-propagation strategies resolve it
/// from a node's payload, the naive planner from the sampled action.
pub trait StateEvaluation<S: SearchState> {
    fn evaluate(
        &self,
        ctx: &mut SearchContext<S>,
        state: &S,
        perspective: S::Player,
    ) -> Result<f64>;
}

/// +1 for a win, -1 for a loss, 0 for a draw or an unfinished position.
pub struct WinLossDrawEvaluation;

impl<S: SearchState> StateEvaluation<S> for WinLossDrawEvaluation {
    fn evaluate(
        &self,
        _ctx: &mut SearchContext<S>,
        state: &S,
        perspective: S::Player,
    ) -> Result<f64> {
        Ok(match state.status() {
            GameStatus::Completed { outcome: Outcome::Winner(winner) } => {
                if winner == perspective {
                    1.0
                } else {
                    -1.0
                }
            }
            GameStatus::Completed { outcome: Outcome::Draw } => 0.0,
            GameStatus::InProgress { .. } => 0.0,
        })
    }
}

/// Scores a tree node from its accumulators. Consulted through
/// [SearchTree::calculate_score] so results are cached until the node is
/// visited again.
pub trait NodeEvaluation<S: SearchState> {
    fn evaluate_node(&self, tree: &SearchTree<S>, node: NodeIndex) -> f64;
}

/// Average back-propagated value per visit.
pub struct ScoreRatio;

impl<S: SearchState> NodeEvaluation<S> for ScoreRatio {
    fn evaluate_node(&self, tree: &SearchTree<S>, node: NodeIndex) -> f64 {
        let node = tree.node(node);
        node.score() / (node.visits() as f64 + VISITS_EPSILON)
    }
}

/// UCB child score: the visit ratio plus an exploration bonus derived from
/// the parent's visit count. Falls back to the plain ratio at the root,
/// which has no parent to draw a bonus from.
pub struct ScoreUcb {
    pub exploration: f64,
}

impl<S: SearchState> NodeEvaluation<S> for ScoreUcb {
    fn evaluate_node(&self, tree: &SearchTree<S>, node: NodeIndex) -> f64 {
        let target = tree.node(node);
        match target.parent() {
            Some(parent) => ucb(
                target.score(),
                target.visits() as f64,
                tree.node(parent).visits() as f64,
                self.exploration,
            ),
            None => target.score() / (target.visits() as f64 + VISITS_EPSILON),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::DEFAULT_UCB_EXPLORATION;
    use crate::take_away::{take, TakeAwayState};

    #[test]
    fn score_ucb_matches_formula() {
        let mut tree = SearchTree::with_root(Some(TakeAwayState::new(5)));
        let child = tree.add_child(tree.root(), take(1), None);
        for _ in 0..50 {
            tree.visit(tree.root(), 0.0);
        }
        for _ in 0..10 {
            tree.visit(child, 0.6);
        }
        let evaluation = ScoreUcb { exploration: DEFAULT_UCB_EXPLORATION };
        let expected = ucb(6.0, 10.0, 50.0, DEFAULT_UCB_EXPLORATION);
        assert!((evaluation.evaluate_node(&tree, child) - expected).abs() < 1e-12);
    }

    #[test]
    fn score_ratio_of_unvisited_node_is_zero() {
        let mut tree = SearchTree::with_root(Some(TakeAwayState::new(5)));
        let child = tree.add_child(tree.root(), take(1), None);
        assert_eq!(ScoreRatio.evaluate_node(&tree, child), 0.0);
    }
}
