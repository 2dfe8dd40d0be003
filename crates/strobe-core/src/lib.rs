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

//! # Strobe Core
//!
//! Foundational crate containing traits, core types, and interface contracts
//! for the Strobe frame profiler: the metric snapshot, the settings cache,
//! the throttle policy, and the capability traits that decouple the
//! instrumentation layer from any concrete host engine binding.
//!
//! Everything here runs synchronously inside one simulation-tick callback.
//! The host guarantees non-reentrant, single-threaded tick delivery; that
//! precondition is documented rather than guarded.

#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod display;
pub mod frame;
pub mod hooks;
pub mod metrics;
pub mod scene;
pub mod throttle;
pub mod time;

pub use config::{ConfigSource, SettingsCache};
pub use context::TickContext;
pub use frame::FrameCounter;
pub use metrics::MetricSnapshot;
pub use scene::SceneStats;
pub use throttle::ThrottleState;
pub use time::Stopwatch;
