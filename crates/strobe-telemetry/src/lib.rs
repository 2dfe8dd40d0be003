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

//! # Strobe Telemetry
//!
//! Turns the raw per-interval metric snapshot into human-readable overlay
//! reports, and owns the profiler lifecycle: the [`ProfilerService`] is
//! the single object the host drives from its tick callback, and the
//! `report` module compiles its state into graded summaries on the
//! half-second cadence.

#![warn(missing_docs)]

pub mod report;
pub mod service;

pub use report::{percent_of, render_breakdown, render_summary, PerfGrade, ReportStats, SpikeStatus};
pub use service::ProfilerService;
