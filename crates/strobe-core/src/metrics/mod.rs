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

//! The mutable aggregate state every instrumented call site reads or writes.
//!
//! This module defines the "common language" of the profiler: a fixed set of
//! named accumulators and scalars mutated from many call sites within one
//! tick, and drained on the report cadence. The report compiler in
//! `strobe-telemetry` is the only component allowed to reset it.

pub mod snapshot;

pub use self::snapshot::{
    MetricSnapshot, FRAME_HISTORY_CAPACITY, SEVERE_SPIKE_THRESHOLD_MS, SPIKE_THRESHOLD_MS,
    WALL_MIN_SENTINEL_MS,
};
