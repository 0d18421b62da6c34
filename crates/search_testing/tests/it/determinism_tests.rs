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

use search_core::search_context::SearchContext;
use search_testing::tictactoe::{TicTacToeAction, TicTacToePlayer, TicTacToeState};
use search_testing::tictactoe_agents::{lsi_context, mcts_context, nmcts_context};

fn root_child_visits(ctx: &SearchContext<TicTacToeState>) -> Vec<(TicTacToeAction, u64)> {
    let tree = ctx.start_tree().expect("search leaves its tree behind");
    tree.children(tree.root())
        .iter()
        .map(|&child| {
            let node = tree.node(child);
            (*node.action().expect("children carry payloads"), node.visits())
        })
        .collect()
}

#[test]
fn mcts_is_reproducible_under_a_fixed_seed() {
    let source = TicTacToeState::parse("--X-OX---", TicTacToePlayer::O).unwrap();
    let mut runs = Vec::new();
    for _ in 0..2 {
        let mut ctx = mcts_context(source.clone(), 2_000, 99).unwrap();
        ctx.execute().unwrap();
        runs.push((*ctx.solution().unwrap(), *ctx.report(), root_child_visits(&ctx)));
    }
    assert_eq!(runs[0], runs[1]);
}

#[test]
fn nmcts_is_reproducible_under_a_fixed_seed() {
    let source = TicTacToeState::parse("--X-OX---", TicTacToePlayer::O).unwrap();
    let mut runs = Vec::new();
    for _ in 0..2 {
        let mut ctx = nmcts_context(source.clone(), 2_000, 0.25, 0.5, 31).unwrap();
        ctx.execute().unwrap();
        runs.push((*ctx.solution().unwrap(), *ctx.report(), root_child_visits(&ctx)));
    }
    assert_eq!(runs[0], runs[1]);
}

#[test]
fn lsi_is_reproducible_under_a_fixed_seed() {
    let source = TicTacToeState::parse("--X-OX---", TicTacToePlayer::O).unwrap();
    let mut runs = Vec::new();
    for _ in 0..2 {
        let mut ctx = lsi_context(source.clone(), 500, 500, 13).unwrap();
        ctx.execute().unwrap();
        runs.push((*ctx.solution().unwrap(), *ctx.report()));
    }
    assert_eq!(runs[0], runs[1]);
}
