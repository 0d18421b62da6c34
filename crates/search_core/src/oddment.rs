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
use rand::rngs::StdRng;
use rand::Rng;

use crate::primitives::shannon_entropy;

/// A discrete weighted distribution. Weights are added incrementally;
/// [OddmentTable::recompute] must run after the last weight change to refresh
/// the cumulative buckets before [OddmentTable::sample] may be called.
/// Entries keep their insertion order, so sampling is reproducible for a
/// fixed RNG.
pub struct OddmentTable<T> {
    entries: Vec<(T, f64)>,
    cumulative: Vec<f64>,
    total: f64,
    stale: bool,
}

impl<T> Default for OddmentTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OddmentTable<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new(), cumulative: Vec::new(), total: 0.0, stale: false }
    }

    pub fn add(&mut self, item: T, weight: f64) {
        self.entries.push((item, weight));
        self.stale = true;
    }

    /// Rebuild the cumulative buckets. Fails on negative weights.
    pub fn recompute(&mut self) -> Result<()> {
        let mut running = 0.0;
        self.cumulative.clear();
        for (_, weight) in &self.entries {
            ensure!(*weight >= 0.0, "oddment weights must be non-negative, got {weight}");
            running += weight;
            self.cumulative.push(running);
        }
        self.total = running;
        self.stale = false;
        Ok(())
    }

    /// Draw one item in proportion to its weight.
    pub fn sample(&self, rng: &mut StdRng) -> Result<&T> {
        ensure!(!self.stale, "oddment table must be recomputed after weight changes");
        ensure!(!self.entries.is_empty(), "cannot sample from an empty oddment table");
        ensure!(self.total > 0.0, "cannot sample from an oddment table whose weights are all zero");
        let roll = rng.gen::<f64>() * self.total;
        let index = self.cumulative.partition_point(|&bucket| bucket <= roll);
        Ok(&self.entries[index.min(self.entries.len() - 1)].0)
    }

    /// Entropy of the normalized weight distribution, in nats.
    pub fn entropy(&self) -> f64 {
        let weights: Vec<f64> = self.entries.iter().map(|(_, weight)| *weight).collect();
        shannon_entropy(&weights)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.total
    }
}
