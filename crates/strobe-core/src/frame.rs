// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The process-lifetime frame counter that throttling decisions key off.

/// A monotonically increasing simulation-tick counter.
///
/// Incremented exactly once per tick, before any throttling decision for
/// that tick is made. Unlike the metric snapshot it is never reset; it
/// wraps only at `u64` overflow, which is not a practical concern at real
/// frame rates.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameCounter {
    count: u64,
}

impl FrameCounter {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the counter by exactly one and returns the new value.
    #[inline]
    pub fn tick(&mut self) -> u64 {
        self.count = self.count.wrapping_add(1);
        self.count
    }

    /// Returns the current frame number.
    #[inline]
    pub fn current(&self) -> u64 {
        self.count
    }
}
