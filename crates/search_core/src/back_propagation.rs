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

use crate::evaluation::StateEvaluation;
use crate::game_state::{SearchAction, SearchState};
use crate::search_context::SearchContext;
use crate::search_tree::{NodeIndex, SearchTree};

/// Distributes the value of a finished playout along the leaf-to-root path.
pub trait BackPropagationStrategy<S: SearchState> {
    fn back_propagate(
        &self,
        ctx: &mut SearchContext<S>,
        tree: &mut SearchTree<S>,
        evaluation: &dyn StateEvaluation<S>,
        leaf: NodeIndex,
        end_state: &S,
    ) -> Result<()>;
}

/// Evaluates the end state once from the perspective of the player to move at
/// the source position, then walks the parent chain crediting `+value` to
/// nodes whose payload belongs to that player and `-value` to opponent nodes.
/// The root carries no payload and counts as the searching player's own.
pub struct EvaluateOnceAndColor;

impl<S: SearchState> BackPropagationStrategy<S> for EvaluateOnceAndColor {
    fn back_propagate(
        &self,
        ctx: &mut SearchContext<S>,
        tree: &mut SearchTree<S>,
        evaluation: &dyn StateEvaluation<S>,
        leaf: NodeIndex,
        end_state: &S,
    ) -> Result<()> {
        let root_player = ctx.source_active_player()?;
        let value = evaluation.evaluate(ctx, end_state, root_player)?;
        let mut current = Some(leaf);
        while let Some(index) = current {
            let delta = match tree.node(index).action().map(SearchAction::player) {
                Some(player) if player != root_player => -value,
                _ => value,
            };
            tree.visit(index, delta);
            current = tree.node(index).parent();
        }
        Ok(())
    }
}

/// Re-evaluates the end state at every node on the path, each time from the
/// perspective of that node's own payload player. Costs one evaluation per
/// ancestor but supports evaluators that are not symmetric between players.
pub struct EvaluateEachNode;

impl<S: SearchState> BackPropagationStrategy<S> for EvaluateEachNode {
    fn back_propagate(
        &self,
        ctx: &mut SearchContext<S>,
        tree: &mut SearchTree<S>,
        evaluation: &dyn StateEvaluation<S>,
        leaf: NodeIndex,
        end_state: &S,
    ) -> Result<()> {
        let root_player = ctx.source_active_player()?;
        let mut current = Some(leaf);
        while let Some(index) = current {
            let perspective =
                tree.node(index).action().map(SearchAction::player).unwrap_or(root_player);
            let value = evaluation.evaluate(ctx, end_state, perspective)?;
            tree.visit(index, value);
            current = tree.node(index).parent();
        }
        Ok(())
    }
}
