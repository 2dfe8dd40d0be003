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

//! The per-tick view of profiler state handed to the dispatch wrappers.

use crate::config::SettingsCache;
use crate::metrics::MetricSnapshot;
use crate::throttle::ThrottleState;

/// Borrowed profiler state for one tick.
///
/// Everything a dispatch wrapper needs to decide and record: the mutable
/// metric snapshot, the current settings, the frame number fixed at the
/// top of the tick, and the spawn-gate state. An explicit context instead
/// of globals; the borrow checker enforces the single-writer tick model
/// that the host guarantees by calling from one thread.
pub struct TickContext<'a> {
    /// Interval aggregate every wrapper writes into.
    pub metrics: &'a mut MetricSnapshot,
    /// Settings as of the last cache refresh.
    pub settings: &'a SettingsCache,
    /// Frame number for this tick; constant across the tick.
    pub frame: u64,
    /// Spawn-gate state shared by all spawn call sites.
    pub throttle: &'a mut ThrottleState,
}

impl<'a> TickContext<'a> {
    /// Whether the profiler is recording this tick.
    #[inline]
    pub fn enabled(&self) -> bool {
        self.metrics.enabled
    }
}
