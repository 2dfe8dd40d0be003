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

//! On-screen overlay abstraction for the profiler labels.
//!
//! The report compiler emits text; how that text ends up on screen is the
//! host's business. The sink is called at most twice per report interval
//! (summary and detail text) plus the one-time lazy creation of each
//! label, so implementations need not be fast.

use serde::{Deserialize, Serialize};

/// Opaque handle to a label owned by the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelId(
    /// Sink-assigned index; meaningful only to the sink that issued it.
    pub u32,
);

/// Where a label anchors relative to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    /// Top-left corner, text flowing right and down.
    TopLeft,
    /// Top-right corner, text flowing left and down.
    TopRight,
}

/// Placement and appearance of an overlay label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LabelStyle {
    /// Screen anchor.
    pub anchor: Anchor,
    /// Offset from the anchor, in points.
    pub position: (f32, f32),
    /// Text scale factor.
    pub scale: f32,
    /// Opacity, 0..=255.
    pub opacity: u8,
    /// Draw order relative to the host scene.
    pub z_order: i32,
}

impl LabelStyle {
    /// Style of the main summary label.
    pub fn summary() -> Self {
        Self {
            anchor: Anchor::TopLeft,
            position: (5.0, -5.0),
            scale: 0.4,
            opacity: 200,
            z_order: 1000,
        }
    }

    /// Style of the detailed breakdown label.
    pub fn detail() -> Self {
        Self {
            anchor: Anchor::TopRight,
            position: (-5.0, -5.0),
            scale: 0.35,
            opacity: 200,
            z_order: 1000,
        }
    }
}

/// The host-side overlay surface the profiler writes labels to.
pub trait DisplaySink {
    /// Creates a label and returns its handle.
    fn create_label(&mut self, style: LabelStyle) -> LabelId;
    /// Replaces a label's text.
    fn set_text(&mut self, id: LabelId, text: &str);
    /// Shows or hides a label without destroying it.
    fn set_visible(&mut self, id: LabelId, visible: bool);
}
