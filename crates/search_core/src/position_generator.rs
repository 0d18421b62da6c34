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

/// A lazy, restartable, finite sequence of legal actions from a position.
///
/// Items are pulled from the underlying iterator on demand and buffered, so
/// restarting via [PositionGenerator::reset] replays the same sequence
/// without recomputing it. The initial cursor is before the first item;
/// [PositionGenerator::advance] must succeed before
/// [PositionGenerator::current] may be called.
pub struct PositionGenerator<A> {
    source: Box<dyn Iterator<Item = A>>,
    buffered: Vec<A>,
    cursor: Option<usize>,
}

impl<A> PositionGenerator<A> {
    pub fn new(source: impl Iterator<Item = A> + 'static) -> Self {
        Self { source: Box::new(source), buffered: Vec::new(), cursor: None }
    }

    /// Move to the next action, returning whether one is available. Once the
    /// sequence is exhausted further calls keep returning false.
    pub fn advance(&mut self) -> bool {
        let next = self.cursor.map_or(0, |cursor| cursor + 1);
        if self.fill_to(next) {
            self.cursor = Some(next);
            true
        } else {
            false
        }
    }

    /// The action the cursor is on. Calling this before a successful
    /// [PositionGenerator::advance] is a programmer error and panics.
    pub fn current(&self) -> &A {
        let cursor = self.cursor.expect("current() called before a successful advance()");
        &self.buffered[cursor]
    }

    /// Non-destructive peek: would another [PositionGenerator::advance]
    /// succeed? May pull one item from the underlying iterator into the
    /// buffer, but does not move the cursor.
    pub fn has_next(&mut self) -> bool {
        let next = self.cursor.map_or(0, |cursor| cursor + 1);
        self.fill_to(next)
    }

    /// Return to the position before the first action.
    pub fn reset(&mut self) {
        self.cursor = None;
    }

    fn fill_to(&mut self, index: usize) -> bool {
        while self.buffered.len() <= index {
            match self.source.next() {
                Some(item) => self.buffered.push(item),
                None => return false,
            }
        }
        true
    }
}
