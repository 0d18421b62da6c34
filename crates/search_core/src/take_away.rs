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

//! Minimal take-away game used as a unit-test fixture.
//!
//! Two players alternate removing one or two stones from a single pile;
//! whoever takes the last stone wins. Just enough game to exercise the tree,
//! the strategies and the context lifecycle without dragging a real game
//! model into this crate.

use anyhow::{bail, ensure, Result};

use crate::game_logic::GameLogic;
use crate::game_state::{GameStatus, Outcome, SearchAction, SearchState};
use crate::hashing::fnv1_hash;
use crate::position_generator::PositionGenerator;
use crate::primitives::TurnNumber;
use crate::search_context::{Planner, SearchContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TakeAwayPlayer {
    One,
    Two,
}

impl TakeAwayPlayer {
    pub fn opponent(&self) -> Self {
        match self {
            TakeAwayPlayer::One => TakeAwayPlayer::Two,
            TakeAwayPlayer::Two => TakeAwayPlayer::One,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TakeAwayAction {
    pub amount: u32,
    pub player: TakeAwayPlayer,
}

impl SearchAction for TakeAwayAction {
    type Player = TakeAwayPlayer;

    fn player(&self) -> TakeAwayPlayer {
        self.player
    }
}

/// Action taking `amount` stones as player One.
pub fn take(amount: u32) -> TakeAwayAction {
    take_for(amount, TakeAwayPlayer::One)
}

pub fn take_for(amount: u32, player: TakeAwayPlayer) -> TakeAwayAction {
    TakeAwayAction { amount, player }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TakeAwayState {
    remaining: u32,
    active: TakeAwayPlayer,
    moves: u32,
    winner: Option<TakeAwayPlayer>,
}

impl TakeAwayState {
    pub fn new(remaining: u32) -> Self {
        Self { remaining, active: TakeAwayPlayer::One, moves: 0, winner: None }
    }

    /// A finished game won by `player`.
    pub fn won_by(player: TakeAwayPlayer) -> Self {
        Self { remaining: 0, active: player.opponent(), moves: 1, winner: Some(player) }
    }

    pub fn after_taking(&self, amount: u32) -> Self {
        let remaining = self.remaining - amount;
        Self {
            remaining,
            active: self.active.opponent(),
            moves: self.moves + 1,
            winner: (remaining == 0).then_some(self.active),
        }
    }
}

impl SearchState for TakeAwayState {
    type Player = TakeAwayPlayer;
    type Action = TakeAwayAction;

    fn make_copy(&self) -> Self {
        self.clone()
    }

    fn status(&self) -> GameStatus<TakeAwayPlayer> {
        if self.remaining == 0 {
            GameStatus::Completed {
                outcome: self.winner.map_or(Outcome::Draw, Outcome::Winner),
            }
        } else {
            GameStatus::InProgress { active_player: self.active }
        }
    }

    fn turn(&self) -> TurnNumber {
        self.moves
    }

    fn content_hash(&self) -> u64 {
        fnv1_hash(self)
    }
}

pub struct TakeAwayLogic;

impl GameLogic<TakeAwayState> for TakeAwayLogic {
    fn apply(&self, state: &TakeAwayState, action: &TakeAwayAction) -> Result<TakeAwayState> {
        ensure!(action.player == state.active, "it is not {:?}'s turn", action.player);
        ensure!(
            action.amount >= 1 && action.amount <= state.remaining.min(2),
            "cannot take {} from a pile of {}",
            action.amount,
            state.remaining
        );
        Ok(state.after_taking(action.amount))
    }

    fn expand(&self, state: &TakeAwayState) -> PositionGenerator<TakeAwayAction> {
        let player = state.active;
        let limit = state.remaining.min(2);
        PositionGenerator::new((1..=limit).map(move |amount| take_for(amount, player)))
    }

    fn scores(&self, state: &TakeAwayState) -> Result<Vec<f64>> {
        Ok(match state.status() {
            GameStatus::Completed { outcome: Outcome::Winner(TakeAwayPlayer::One) } => {
                vec![1.0, 0.0]
            }
            GameStatus::Completed { outcome: Outcome::Winner(TakeAwayPlayer::Two) } => {
                vec![0.0, 1.0]
            }
            _ => vec![0.5, 0.5],
        })
    }
}

/// Planner stub recommending the first legal action. Lets context and
/// strategy tests run without the real planners, which live downstream of
/// this crate.
pub struct FirstActionPlanner;

impl Planner<TakeAwayState> for FirstActionPlanner {
    fn search(&self, ctx: &mut SearchContext<TakeAwayState>) -> Result<TakeAwayAction> {
        let mut generator = ctx.logic().expand(ctx.source());
        if generator.advance() {
            Ok(generator.current().clone())
        } else {
            bail!("no legal actions at the source position");
        }
    }
}

/// Planner stub that always fails.
pub struct FailingPlanner;

impl Planner<TakeAwayState> for FailingPlanner {
    fn search(&self, _ctx: &mut SearchContext<TakeAwayState>) -> Result<TakeAwayAction> {
        bail!("this planner always fails");
    }
}

pub fn fixture_context(source: TakeAwayState, seed: u64) -> SearchContext<TakeAwayState> {
    SearchContext::builder(source)
        .logic(TakeAwayLogic)
        .planner(FirstActionPlanner)
        .seed(seed)
        .build()
        .expect("fixture context")
}
