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

use std::fmt::Debug;
use std::hash::Hash;

use crate::primitives::TurnNumber;

/// Result of a finished game. A draw is distinct from every player, so a
/// search can never mistake "nobody won" for a victory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome<P> {
    Winner(P),
    Draw,
}

impl<P: Copy + Eq> Outcome<P> {
    pub fn winner(&self) -> Option<P> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }

    pub fn is_win_for(&self, player: P) -> bool {
        self.winner() == Some(player)
    }
}

/// Whether a game is ongoing, and if so whose turn it is. Once a state
/// reports `Completed` its outcome never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus<P> {
    InProgress { active_player: P },
    Completed { outcome: Outcome<P> },
}

impl<P: Copy + Eq> GameStatus<P> {
    pub fn active_player(&self) -> Option<P> {
        match self {
            GameStatus::InProgress { active_player } => Some(*active_player),
            GameStatus::Completed { .. } => None,
        }
    }

    pub fn outcome(&self) -> Option<Outcome<P>> {
        match self {
            GameStatus::InProgress { .. } => None,
            GameStatus::Completed { outcome } => Some(*outcome),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Completed { .. })
    }
}

/// An operation transforming one position into another, tagged with the
/// player performing it. Actions are compared and hashed by content; the
/// naive Monte-Carlo bandit tables rely on this.
pub trait SearchAction: Clone + Eq + Hash + Debug + 'static {
    type Player: Copy + Eq + Hash + Debug + 'static;

    fn player(&self) -> Self::Player;
}

/// A generic game position used by the search algorithms.
///
/// Keeping the search implementation generic is useful for testing: a much
/// simpler game with a known-optimal strategy can sanity-check that the
/// planners are doing broadly correct things before they are pointed at a
/// real game.
pub trait SearchState: Sized + 'static {
    type Player: Copy + Eq + Hash + Debug + 'static;
    type Action: SearchAction<Player = Self::Player>;

    /// Create an independent copy of this position to be mutated by the
    /// search. A basic implementation simply calls `.clone()`, but sometimes
    /// parts of a game state are only for display and can be skipped.
    fn make_copy(&self) -> Self;

    fn status(&self) -> GameStatus<Self::Player>;

    /// How many turns have elapsed from the start of the game. Consumed by
    /// cutoff goals that stop playouts a fixed number of turns past the
    /// source position.
    fn turn(&self) -> TurnNumber;

    /// A stable 64-bit hash of the position's content. Two copies of the
    /// same position must hash identically within a process.
    fn content_hash(&self) -> u64;
}
