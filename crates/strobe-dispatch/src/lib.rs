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

//! # Strobe Dispatch
//!
//! Instrumented decorators around the host subsystem traits from
//! `strobe-core`. Each wrapper owns a real implementation and, per call,
//! decides to forward, time, or skip according to the settings snapshot
//! and the throttle policy carried in the tick context.
//!
//! Wrappers never swallow what the inner call returns and never run the
//! real work twice. Skips are silent except where a counter in the metric
//! snapshot is the contract.

#![warn(missing_docs)]

pub mod effects;
pub mod stage;

pub use effects::{
    InstrumentedEffectManager, InstrumentedLabelNode, InstrumentedParticleSystem,
    InstrumentedSceneObject, InstrumentedStreak, InstrumentedTrailEffect, InstrumentedTrigger,
};
pub use stage::{InstrumentedGameStage, InstrumentedPlayStage, InstrumentedShaderLayer};
