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

//! Per-tick scene statistics sampled from the host.

use serde::{Deserialize, Serialize};

/// A snapshot of scene-graph counts, filled by the host once per tick.
///
/// These are observations, not measurements: the host reads them off its
/// own scene state and hands them to the profiler, which copies them into
/// the metric snapshot and derives the draw-call estimate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SceneStats {
    /// Total objects in the level.
    pub total_objects: u32,
    /// Objects counted visible by the primary visibility pass.
    pub visible_primary: u32,
    /// Objects counted visible by the secondary visibility pass.
    pub visible_secondary: u32,
    /// Gradient layers currently animating.
    pub active_gradients: u32,
    /// Whether a fullscreen shader layer is attached.
    pub shader_active: bool,
    /// Leftmost active section column.
    pub section_left: i32,
    /// Rightmost active section column.
    pub section_right: i32,
    /// Topmost active section row.
    pub section_top: i32,
    /// Bottommost active section row.
    pub section_bottom: i32,
    /// Sprite batch nodes in the draw list.
    pub batch_nodes: u32,
}
