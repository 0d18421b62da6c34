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

//! The search tree: an arena of [SearchNode]s indexed by [NodeIndex] handles.
//!
//! Nodes never hold references to each other; parents and children are
//! recorded as handles into the arena, so the whole tree is dropped in O(1)
//! at the end of a search and no cycles exist for the borrow checker to
//! object to.

use std::hash::Hash;

use petgraph::graph::DiGraph;
pub use petgraph::graph::NodeIndex;

use crate::evaluation::NodeEvaluation;
use crate::game_state::SearchState;
use crate::hashing::Fnv1Hasher;
use crate::position_generator::PositionGenerator;

/// A single node in the search tree. Wraps an optional payload action (absent
/// only at the root), score and visit accumulators, and the lazily-created
/// generator of child actions.
pub struct SearchNode<S: SearchState> {
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
    action: Option<S::Action>,
    state: Option<S>,
    score: f64,
    visits: u64,
    generator: Option<PositionGenerator<S::Action>>,
    dirty: bool,
    evaluated_score: f64,
    min_child_score: f64,
    max_child_score: f64,
}

impl<S: SearchState> SearchNode<S> {
    fn new(parent: Option<NodeIndex>, action: Option<S::Action>, state: Option<S>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            action,
            state,
            score: 0.0,
            visits: 0,
            generator: None,
            dirty: true,
            evaluated_score: 0.0,
            min_child_score: f64::INFINITY,
            max_child_score: f64::NEG_INFINITY,
        }
    }

    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn action(&self) -> Option<&S::Action> {
        self.action.as_ref()
    }

    pub fn state(&self) -> Option<&S> {
        self.state.as_ref()
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn visits(&self) -> u64 {
        self.visits
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// The most recently cached result of
    /// [SearchTree::calculate_score]. Stale while [SearchNode::dirty] is set.
    pub fn evaluated_score(&self) -> f64 {
        self.evaluated_score
    }

    /// Smallest evaluated score observed among this node's children.
    pub fn min_child_score(&self) -> f64 {
        self.min_child_score
    }

    /// Largest evaluated score observed among this node's children.
    pub fn max_child_score(&self) -> f64 {
        self.max_child_score
    }

    pub fn generator(&self) -> Option<&PositionGenerator<S::Action>> {
        self.generator.as_ref()
    }

    /// Content hash folding the payload action and cached state with FNV-1.
    /// Node equality is defined over this hash; restricting it to payload
    /// and state is sufficient for the bandit-key de-duplication it serves.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = Fnv1Hasher::default();
        if let Some(action) = &self.action {
            action.hash(&mut hasher);
        }
        if let Some(state) = &self.state {
            std::hash::Hasher::write_u64(&mut hasher, state.content_hash());
        }
        std::hash::Hasher::finish(&hasher)
    }
}

impl<S: SearchState> PartialEq for SearchNode<S> {
    fn eq(&self, other: &Self) -> bool {
        self.content_hash() == other.content_hash()
    }
}

/// Arena-backed tree of [SearchNode]s. All structural mutation goes through
/// the tree so the accumulator invariants cannot be broken from outside:
/// [SearchTree::visit] is the only mutator of scores and visit counts, and
/// [SearchTree::calculate_score] is the only writer of the score cache.
pub struct SearchTree<S: SearchState> {
    graph: DiGraph<SearchNode<S>, ()>,
    root: NodeIndex,
}

impl<S: SearchState> SearchTree<S> {
    pub fn with_root(state: Option<S>) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(SearchNode::new(None, None, state));
        Self { graph, root }
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn node(&self, index: NodeIndex) -> &SearchNode<S> {
        &self.graph[index]
    }

    fn node_mut(&mut self, index: NodeIndex) -> &mut SearchNode<S> {
        &mut self.graph[index]
    }

    /// Create a new child of `parent` wrapping `action`, appended at the end
    /// of the parent's child list.
    pub fn add_child(
        &mut self,
        parent: NodeIndex,
        action: S::Action,
        state: Option<S>,
    ) -> NodeIndex {
        let child = self.graph.add_node(SearchNode::new(Some(parent), Some(action), state));
        self.graph.add_edge(parent, child, ());
        self.node_mut(parent).children.push(child);
        child
    }

    /// Children in their current order: insertion order until a selection
    /// strategy reorders them.
    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.node(index).children
    }

    pub fn find_child_by_action(
        &self,
        parent: NodeIndex,
        action: &S::Action,
    ) -> Option<NodeIndex> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&child| self.node(child).action() == Some(action))
    }

    /// Record a back-propagated value: accumulates the score, bumps the visit
    /// count and marks the cached evaluation stale.
    pub fn visit(&mut self, index: NodeIndex, delta: f64) {
        let node = self.node_mut(index);
        node.score += delta;
        node.visits += 1;
        node.dirty = true;
    }

    /// Evaluate the node through `evaluation`, caching the result until the
    /// next [SearchTree::visit]. On recomputation the parent's running
    /// min/max child scores are widened in O(1).
    pub fn calculate_score(&mut self, index: NodeIndex, evaluation: &dyn NodeEvaluation<S>) -> f64 {
        if !self.node(index).dirty {
            return self.node(index).evaluated_score;
        }
        let score = evaluation.evaluate_node(self, index);
        let node = self.node_mut(index);
        node.evaluated_score = score;
        node.dirty = false;
        if let Some(parent) = node.parent {
            let parent = self.node_mut(parent);
            parent.min_child_score = parent.min_child_score.min(score);
            parent.max_child_score = parent.max_child_score.max(score);
        }
        score
    }

    /// A node is fully expanded once its generator exists and is exhausted.
    /// Nodes that have never created a generator are not fully expanded even
    /// when the underlying position has no legal actions.
    pub fn is_fully_expanded(&mut self, index: NodeIndex) -> bool {
        match &mut self.node_mut(index).generator {
            Some(generator) => !generator.has_next(),
            None => false,
        }
    }

    /// Install the action generator for a node's first expansion. Replacing
    /// an existing generator would forget which actions already have child
    /// nodes, so later installs are ignored.
    pub fn install_generator(&mut self, index: NodeIndex, generator: PositionGenerator<S::Action>) {
        let node = self.node_mut(index);
        if node.generator.is_none() {
            node.generator = Some(generator);
        }
    }

    /// Advance the node's generator one step, returning the next unexpanded
    /// action if one remains.
    pub fn next_unexpanded_action(&mut self, index: NodeIndex) -> Option<S::Action> {
        let generator = self.node_mut(index).generator.as_mut()?;
        if generator.advance() {
            Some(generator.current().clone())
        } else {
            None
        }
    }

    /// Parent-chain length; the root has depth zero.
    pub fn depth(&self, index: NodeIndex) -> u32 {
        let mut depth = 0;
        let mut current = index;
        while let Some(parent) = self.node(current).parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Re-evaluate every child of `parent` and sort the child list by score,
    /// best first.
    pub fn sort_children_by_score(&mut self, parent: NodeIndex, evaluation: &dyn NodeEvaluation<S>) {
        let children = self.node(parent).children.clone();
        let mut scored = Vec::with_capacity(children.len());
        for child in children {
            let score = self.calculate_score(child, evaluation);
            scored.push((child, ordered_float::OrderedFloat(score)));
        }
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        self.node_mut(parent).children = scored.into_iter().map(|(child, _)| child).collect();
    }

    pub fn swap_children(&mut self, parent: NodeIndex, a: usize, b: usize) {
        self.node_mut(parent).children.swap(a, b);
    }
}
