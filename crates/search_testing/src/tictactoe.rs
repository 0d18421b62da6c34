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

//! 3x3 Tic-Tac-Toe as a [SearchState] implementation.
//!
//! Boards are written as nine characters, row by row: `X`, `O` or `-` for an
//! empty cell, so `"X-O-XO---"` has X on cells 0 and 4 and O on cells 2 and
//! 5. Cells are indexed 0 through 8.

use std::fmt;

use anyhow::{bail, ensure, Result};
use enum_iterator::{all, Sequence};

use search_core::game_logic::GameLogic;
use search_core::game_state::{GameStatus, Outcome, SearchAction, SearchState};
use search_core::hashing::fnv1_hash;
use search_core::position_generator::PositionGenerator;
use search_core::primitives::TurnNumber;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Sequence)]
pub enum TicTacToePlayer {
    X,
    O,
}

impl TicTacToePlayer {
    pub fn opponent(&self) -> Self {
        match self {
            TicTacToePlayer::X => TicTacToePlayer::O,
            TicTacToePlayer::O => TicTacToePlayer::X,
        }
    }
}

impl fmt::Display for TicTacToePlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicTacToePlayer::X => write!(f, "X"),
            TicTacToePlayer::O => write!(f, "O"),
        }
    }
}

/// Claim `cell` (0..9) for `player`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicTacToeAction {
    pub cell: usize,
    pub player: TicTacToePlayer,
}

impl SearchAction for TicTacToeAction {
    type Player = TicTacToePlayer;

    fn player(&self) -> TicTacToePlayer {
        self.player
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicTacToeState {
    cells: [Option<TicTacToePlayer>; 9],
    active: TicTacToePlayer,
}

impl TicTacToeState {
    /// The empty board with X to move.
    pub fn empty() -> Self {
        Self { cells: [None; 9], active: TicTacToePlayer::X }
    }

    /// Parse a nine-character board description with an explicit player to
    /// move.
    pub fn parse(board: &str, active: TicTacToePlayer) -> Result<Self> {
        ensure!(board.len() == 9, "board must be exactly 9 characters, got {:?}", board);
        let mut cells = [None; 9];
        for (index, symbol) in board.chars().enumerate() {
            cells[index] = match symbol {
                'X' => Some(TicTacToePlayer::X),
                'O' => Some(TicTacToePlayer::O),
                '-' => None,
                other => bail!("unexpected board character {other:?}"),
            };
        }
        Ok(Self { cells, active })
    }

    pub fn cell(&self, index: usize) -> Option<TicTacToePlayer> {
        self.cells[index]
    }

    pub fn winner(&self) -> Option<TicTacToePlayer> {
        LINES.iter().find_map(|line| {
            let first = self.cells[line[0]]?;
            (line.iter().all(|&cell| self.cells[cell] == Some(first))).then_some(first)
        })
    }

    fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for column in 0..3 {
                match self.cells[row * 3 + column] {
                    Some(player) => write!(f, "{player}")?,
                    None => write!(f, "-")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl SearchState for TicTacToeState {
    type Player = TicTacToePlayer;
    type Action = TicTacToeAction;

    fn make_copy(&self) -> Self {
        self.clone()
    }

    fn status(&self) -> GameStatus<TicTacToePlayer> {
        if let Some(winner) = self.winner() {
            GameStatus::Completed { outcome: Outcome::Winner(winner) }
        } else if self.occupied() == 9 {
            GameStatus::Completed { outcome: Outcome::Draw }
        } else {
            GameStatus::InProgress { active_player: self.active }
        }
    }

    fn turn(&self) -> TurnNumber {
        self.occupied() as TurnNumber
    }

    fn content_hash(&self) -> u64 {
        fnv1_hash(self)
    }
}

pub struct TicTacToeLogic;

impl GameLogic<TicTacToeState> for TicTacToeLogic {
    fn apply(&self, state: &TicTacToeState, action: &TicTacToeAction) -> Result<TicTacToeState> {
        ensure!(!state.status().is_terminal(), "cannot play on a finished board");
        ensure!(action.player == state.active, "it is not {}'s turn", action.player);
        ensure!(action.cell < 9, "cell {} is off the board", action.cell);
        ensure!(state.cells[action.cell].is_none(), "cell {} is already taken", action.cell);

        let mut next = state.clone();
        next.cells[action.cell] = Some(action.player);
        next.active = action.player.opponent();
        Ok(next)
    }

    fn expand(&self, state: &TicTacToeState) -> PositionGenerator<TicTacToeAction> {
        if state.status().is_terminal() {
            return PositionGenerator::new(std::iter::empty());
        }
        let cells = state.cells;
        let player = state.active;
        PositionGenerator::new(
            (0..9)
                .filter(move |&cell| cells[cell].is_none())
                .map(move |cell| TicTacToeAction { cell, player }),
        )
    }

    fn scores(&self, state: &TicTacToeState) -> Result<Vec<f64>> {
        Ok(all::<TicTacToePlayer>()
            .map(|player| match state.status() {
                GameStatus::Completed { outcome: Outcome::Winner(winner) } => {
                    if winner == player {
                        1.0
                    } else {
                        0.0
                    }
                }
                _ => 0.5,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TicTacToePlayer::{O, X};

    #[test]
    fn parse_and_display_round_trip() {
        let state = TicTacToeState::parse("X-O-XO---", X).unwrap();
        assert_eq!(state.cell(0), Some(X));
        assert_eq!(state.cell(2), Some(O));
        assert_eq!(state.cell(4), Some(X));
        assert_eq!(state.cell(5), Some(O));
        assert_eq!(state.to_string(), "X-O\n-XO\n---\n");
    }

    #[test]
    fn parse_rejects_bad_boards() {
        assert!(TicTacToeState::parse("X", X).is_err());
        assert!(TicTacToeState::parse("Q--------", X).is_err());
    }

    #[test]
    fn winner_detection() {
        let row = TicTacToeState::parse("XXX-OO---", O).unwrap();
        assert_eq!(row.winner(), Some(X));
        let diagonal = TicTacToeState::parse("X-O-XO--X", O).unwrap();
        assert_eq!(diagonal.winner(), Some(X));
        assert_eq!(TicTacToeState::empty().winner(), None);
    }

    #[test]
    fn status_progression() {
        let empty = TicTacToeState::empty();
        assert_eq!(empty.status(), GameStatus::InProgress { active_player: X });

        let won = TicTacToeState::parse("XXX-OO---", O).unwrap();
        assert_eq!(won.status(), GameStatus::Completed { outcome: Outcome::Winner(X) });

        let drawn = TicTacToeState::parse("XOXXOOOXX", X).unwrap();
        assert_eq!(drawn.status(), GameStatus::Completed { outcome: Outcome::Draw });
    }

    #[test]
    fn apply_places_and_alternates() {
        let state = TicTacToeState::empty();
        let next = TicTacToeLogic.apply(&state, &TicTacToeAction { cell: 4, player: X }).unwrap();
        assert_eq!(next.cell(4), Some(X));
        assert_eq!(next.status(), GameStatus::InProgress { active_player: O });
        assert_eq!(next.turn(), 1);
    }

    #[test]
    fn apply_rejects_illegal_moves() {
        let state = TicTacToeState::parse("X--------", O).unwrap();
        assert!(TicTacToeLogic.apply(&state, &TicTacToeAction { cell: 0, player: O }).is_err());
        assert!(TicTacToeLogic.apply(&state, &TicTacToeAction { cell: 1, player: X }).is_err());
        let finished = TicTacToeState::parse("XXX-OO---", O).unwrap();
        assert!(TicTacToeLogic.apply(&finished, &TicTacToeAction { cell: 8, player: O }).is_err());
    }

    #[test]
    fn expand_lists_empty_cells_for_active_player() {
        let state = TicTacToeState::parse("X-O-XO---", X).unwrap();
        let mut generator = TicTacToeLogic.expand(&state);
        let mut cells = Vec::new();
        while generator.advance() {
            assert_eq!(generator.current().player, X);
            cells.push(generator.current().cell);
        }
        assert_eq!(cells, vec![1, 3, 6, 7, 8]);

        let finished = TicTacToeState::parse("XXX-OO---", O).unwrap();
        assert!(!TicTacToeLogic.expand(&finished).has_next());
    }

    #[test]
    fn scores_reward_the_winner() {
        let won = TicTacToeState::parse("XXX-OO---", O).unwrap();
        assert_eq!(TicTacToeLogic.scores(&won).unwrap(), vec![1.0, 0.0]);
        assert_eq!(TicTacToeLogic.scores(&TicTacToeState::empty()).unwrap(), vec![0.5, 0.5]);
    }

    #[test]
    fn content_hash_distinguishes_positions() {
        let a = TicTacToeState::parse("X--------", O).unwrap();
        let b = TicTacToeState::parse("-X-------", O).unwrap();
        assert_ne!(a.content_hash(), b.content_hash());
        assert_eq!(a.content_hash(), a.make_copy().content_hash());
    }
}
