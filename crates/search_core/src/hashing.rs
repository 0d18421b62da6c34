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

//! FNV-1 hashing for action and node keys.
//!
//! The bandit tables in naive Monte-Carlo search key their arms by content
//! hashes of states and actions, so the hash must be stable across search
//! invocations within a process. The std `DefaultHasher` offers no such
//! guarantee, hence this fixed-parameter implementation.

use std::hash::{Hash, Hasher};

pub const HASH_OFFSET_BASIS: u32 = 2_166_136_261;
pub const HASH_FNV_PRIME: u32 = 16_777_619;

/// 32-bit FNV-1 (multiply then xor, not the 1a variant) exposed through the
/// std [Hasher] interface.
pub struct Fnv1Hasher {
    state: u32,
}

impl Default for Fnv1Hasher {
    fn default() -> Self {
        Self { state: HASH_OFFSET_BASIS }
    }
}

impl Hasher for Fnv1Hasher {
    fn finish(&self) -> u64 {
        self.state as u64
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.state = self.state.wrapping_mul(HASH_FNV_PRIME) ^ (*byte as u32);
        }
    }
}

/// Content hash of any [Hash] value using [Fnv1Hasher].
pub fn fnv1_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = Fnv1Hasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}
