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

//! The per-interval metric snapshot and its record/reset operations.

use crate::scene::SceneStats;
use serde::Serialize;
use std::collections::VecDeque;
use std::time::Instant;

/// Bound on the recent wall-frame history used for spike inspection.
pub const FRAME_HISTORY_CAPACITY: usize = 60;
/// Wall-frame duration (ms) above which a frame counts as a mild spike.
pub const SPIKE_THRESHOLD_MS: f64 = 20.0;
/// Wall-frame duration (ms) above which a frame counts as a severe spike
/// (below 30 FPS territory).
pub const SEVERE_SPIKE_THRESHOLD_MS: f64 = 33.33;
/// Sentinel the wall-frame minimum resets to; any real frame beats it.
pub const WALL_MIN_SENTINEL_MS: f64 = 999.0;

/// The mutable aggregate the whole instrumentation layer writes into.
///
/// Fields come in two write flavors, and the distinction is load-bearing
/// for displayed magnitudes:
///
/// - *overwrite*: one producer per tick, latest sample wins
///   (`update_ms`, `shader_visit_ms`, `collision_ms`, ...);
/// - *accumulate*: several producers per tick sum into the field across
///   the whole report interval (`particle_ms`, `transform_actions_ms`,
///   `effect_ms`, every skip/trigger counter).
///
/// Between resets, fields only grow or get overwritten, never decremented.
/// [`MetricSnapshot::reset_interval`] is called exactly once per report
/// interval by the report compiler and nowhere else.
#[derive(Debug, Clone, Serialize)]
pub struct MetricSnapshot {
    /// Whether the profiler was enabled for the current tick.
    pub enabled: bool,

    // Wall-frame timing (real elapsed time between consecutive ticks).
    /// Sum of wall-frame durations this interval, in ms.
    pub wall_frame_total_ms: f64,
    /// Largest wall frame this interval, in ms.
    pub wall_frame_max_ms: f64,
    /// Smallest wall frame this interval, in ms (sentinel when empty).
    pub wall_frame_min_ms: f64,
    /// Number of wall frames recorded this interval.
    pub wall_frame_count: u32,
    #[serde(skip)]
    last_frame_ts: Option<Instant>,

    // Simulated-time accumulator.
    /// Sum of simulated frame durations this interval, in ms.
    pub sim_frame_total_ms: f64,
    /// Largest simulated frame this interval, in ms.
    pub sim_frame_max_ms: f64,
    /// Number of simulated frames recorded this interval.
    pub sim_frame_count: u32,

    /// Rolling window of the most recent wall-frame durations (ms).
    /// FIFO, bounded at [`FRAME_HISTORY_CAPACITY`]; survives interval
    /// resets.
    pub frame_history: VecDeque<f64>,
    /// Wall frames above [`SPIKE_THRESHOLD_MS`] this interval.
    pub frame_spikes: u32,
    /// Wall frames above [`SEVERE_SPIKE_THRESHOLD_MS`] this interval.
    pub frame_severe_spikes: u32,

    // Component timings in ms. Overwrite unless noted.
    /// Main game-layer update.
    pub update_ms: f64,
    /// Shader layer visit.
    pub shader_visit_ms: f64,
    /// Shader uniform calculations.
    pub shader_calc_ms: f64,
    /// Particle system updates (accumulate, one sample per system).
    pub particle_ms: f64,
    /// Effect manager total (accumulate: pulse + opacity samples).
    pub effect_ms: f64,
    /// Pulse effect pass.
    pub pulse_effect_ms: f64,
    /// Opacity effect pass.
    pub opacity_effect_ms: f64,
    /// Visibility update pass.
    pub visibility_ms: f64,
    /// Collision checks.
    pub collision_ms: f64,
    /// Camera update.
    pub camera_ms: f64,
    /// Move action processing.
    pub move_actions_ms: f64,
    /// Rotation action processing.
    pub rotation_actions_ms: f64,
    /// Transform action processing (accumulate: the follow pass shares
    /// this bucket).
    pub transform_actions_ms: f64,
    /// Area action processing.
    pub area_actions_ms: f64,
    /// Audio trigger processing.
    pub audio_ms: f64,
    /// Post-update pass.
    pub post_update_ms: f64,

    // Scene counts, overwritten each tick from a [`SceneStats`] sample.
    /// Total objects in the level.
    pub total_objects: u32,
    /// Primary visibility-pass count.
    pub visible_objects_primary: u32,
    /// Secondary visibility-pass count.
    pub visible_objects_secondary: u32,
    /// Animating gradient layers.
    pub active_gradients: u32,
    /// Whether a shader layer is attached.
    pub shaders_active: bool,
    /// Leftmost active section column.
    pub section_left: i32,
    /// Rightmost active section column.
    pub section_right: i32,
    /// Topmost active section row.
    pub section_top: i32,
    /// Bottommost active section row.
    pub section_bottom: i32,
    /// Sprite batch nodes in the draw list.
    pub batch_node_count: u32,
    /// Particle-system update calls this interval (accumulate).
    pub particle_system_count: u32,
    /// Derived draw-call estimate, recomputed on every scene sample.
    pub estimated_draw_calls: u32,

    // Optimization counters (accumulate).
    /// Particle updates skipped by throttle or hard disable.
    pub particles_skipped: u32,
    /// Glow sprites force-hidden.
    pub glows_disabled: u32,
    /// High-detail object activations skipped.
    pub high_detail_skipped: u32,
    /// Trail snapshots skipped.
    pub trail_snapshots_skipped: u32,
    /// Camera shakes skipped.
    pub shakes_skipped: u32,
    /// Particle-system update calls, including skipped ones.
    pub particle_update_calls: u32,
    /// Particle emission calls, including refused ones.
    pub particle_add_calls: u32,

    // Trigger counters (accumulate).
    /// All trigger activations.
    pub triggers_activated: u32,
    /// Pulse trigger activations.
    pub pulse_triggers: u32,
    /// Shake trigger activations.
    pub shake_triggers: u32,
    /// Move trigger activations.
    pub move_triggers: u32,
    /// Spawn trigger activations (spawn-group requests included).
    pub spawn_triggers: u32,
}

impl MetricSnapshot {
    /// Creates an empty snapshot with the min field at its sentinel.
    pub fn new() -> Self {
        Self {
            enabled: false,
            wall_frame_total_ms: 0.0,
            wall_frame_max_ms: 0.0,
            wall_frame_min_ms: WALL_MIN_SENTINEL_MS,
            wall_frame_count: 0,
            last_frame_ts: None,
            sim_frame_total_ms: 0.0,
            sim_frame_max_ms: 0.0,
            sim_frame_count: 0,
            frame_history: VecDeque::with_capacity(FRAME_HISTORY_CAPACITY),
            frame_spikes: 0,
            frame_severe_spikes: 0,
            update_ms: 0.0,
            shader_visit_ms: 0.0,
            shader_calc_ms: 0.0,
            particle_ms: 0.0,
            effect_ms: 0.0,
            pulse_effect_ms: 0.0,
            opacity_effect_ms: 0.0,
            visibility_ms: 0.0,
            collision_ms: 0.0,
            camera_ms: 0.0,
            move_actions_ms: 0.0,
            rotation_actions_ms: 0.0,
            transform_actions_ms: 0.0,
            area_actions_ms: 0.0,
            audio_ms: 0.0,
            post_update_ms: 0.0,
            total_objects: 0,
            visible_objects_primary: 0,
            visible_objects_secondary: 0,
            active_gradients: 0,
            shaders_active: false,
            section_left: 0,
            section_right: 0,
            section_top: 0,
            section_bottom: 0,
            batch_node_count: 0,
            particle_system_count: 0,
            estimated_draw_calls: 0,
            particles_skipped: 0,
            glows_disabled: 0,
            high_detail_skipped: 0,
            trail_snapshots_skipped: 0,
            shakes_skipped: 0,
            particle_update_calls: 0,
            particle_add_calls: 0,
            triggers_activated: 0,
            pulse_triggers: 0,
            shake_triggers: 0,
            move_triggers: 0,
            spawn_triggers: 0,
        }
    }

    /// Records one wall-frame boundary.
    ///
    /// The very first call only stores the timestamp; every subsequent call
    /// measures the delta to the previous one, folds it into
    /// sum/count/max/min, pushes it into the bounded history (evicting the
    /// oldest past capacity), and bumps the spike counters.
    pub fn record_wall_frame(&mut self, now: Instant) {
        if let Some(prev) = self.last_frame_ts {
            let ms = now.duration_since(prev).as_secs_f64() * 1000.0;
            self.wall_frame_total_ms += ms;
            self.wall_frame_count += 1;
            if ms > self.wall_frame_max_ms {
                self.wall_frame_max_ms = ms;
            }
            if ms < self.wall_frame_min_ms {
                self.wall_frame_min_ms = ms;
            }

            self.frame_history.push_back(ms);
            if self.frame_history.len() > FRAME_HISTORY_CAPACITY {
                self.frame_history.pop_front();
            }
            if ms > SPIKE_THRESHOLD_MS {
                self.frame_spikes += 1;
            }
            if ms > SEVERE_SPIKE_THRESHOLD_MS {
                self.frame_severe_spikes += 1;
            }
        }
        self.last_frame_ts = Some(now);
    }

    /// Records one simulated frame of `dt_secs` simulated seconds.
    pub fn record_sim_frame(&mut self, dt_secs: f32) {
        let ms = dt_secs as f64 * 1000.0;
        self.sim_frame_total_ms += ms;
        self.sim_frame_count += 1;
        if ms > self.sim_frame_max_ms {
            self.sim_frame_max_ms = ms;
        }
    }

    /// Copies a scene sample in and refreshes the draw-call estimate.
    pub fn record_scene(&mut self, stats: &SceneStats) {
        self.total_objects = stats.total_objects;
        self.visible_objects_primary = stats.visible_primary;
        self.visible_objects_secondary = stats.visible_secondary;
        self.active_gradients = stats.active_gradients;
        self.shaders_active = stats.shader_active;
        self.section_left = stats.section_left;
        self.section_right = stats.section_right;
        self.section_top = stats.section_top;
        self.section_bottom = stats.section_bottom;
        self.batch_node_count = stats.batch_nodes;
        self.estimated_draw_calls = self.batch_node_count
            + self.particle_system_count
            + if self.shaders_active { 5 } else { 0 }
            + self.active_gradients;
    }

    /// Resets every accumulating field for the next report interval.
    ///
    /// The frame-pairing timestamp and the rolling frame history are kept:
    /// the first is lifetime state, the second is a cross-interval window.
    pub fn reset_interval(&mut self) {
        self.wall_frame_total_ms = 0.0;
        self.wall_frame_max_ms = 0.0;
        self.wall_frame_min_ms = WALL_MIN_SENTINEL_MS;
        self.wall_frame_count = 0;
        self.sim_frame_total_ms = 0.0;
        self.sim_frame_max_ms = 0.0;
        self.sim_frame_count = 0;
        self.frame_spikes = 0;
        self.frame_severe_spikes = 0;

        self.update_ms = 0.0;
        self.shader_visit_ms = 0.0;
        self.shader_calc_ms = 0.0;
        self.particle_ms = 0.0;
        self.effect_ms = 0.0;
        self.pulse_effect_ms = 0.0;
        self.opacity_effect_ms = 0.0;
        self.visibility_ms = 0.0;
        self.collision_ms = 0.0;
        self.camera_ms = 0.0;
        self.move_actions_ms = 0.0;
        self.rotation_actions_ms = 0.0;
        self.transform_actions_ms = 0.0;
        self.area_actions_ms = 0.0;
        self.audio_ms = 0.0;
        self.post_update_ms = 0.0;

        self.particle_system_count = 0;
        self.particles_skipped = 0;
        self.glows_disabled = 0;
        self.high_detail_skipped = 0;
        self.trail_snapshots_skipped = 0;
        self.shakes_skipped = 0;
        self.particle_update_calls = 0;
        self.particle_add_calls = 0;
        self.triggers_activated = 0;
        self.pulse_triggers = 0;
        self.shake_triggers = 0;
        self.move_triggers = 0;
        self.spawn_triggers = 0;
    }
}

impl Default for MetricSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::time::Duration;

    fn instants_at_ms(offsets: &[u64]) -> Vec<Instant> {
        let base = Instant::now();
        offsets
            .iter()
            .map(|ms| base + Duration::from_millis(*ms))
            .collect()
    }

    #[test]
    fn test_first_wall_frame_only_stores_timestamp() {
        let mut snap = MetricSnapshot::new();
        snap.record_wall_frame(Instant::now());
        assert_eq!(snap.wall_frame_count, 0);
        assert_eq!(snap.frame_history.len(), 0);
    }

    #[test]
    fn test_wall_frame_count_is_n_minus_one() {
        let mut snap = MetricSnapshot::new();
        for ts in instants_at_ms(&[0, 16, 32, 48, 64]) {
            snap.record_wall_frame(ts);
        }
        assert_eq!(snap.wall_frame_count, 4);
    }

    #[test]
    fn test_wall_frame_min_max_bound_all_deltas() {
        let mut snap = MetricSnapshot::new();
        // Deltas: 10ms, 30ms, 5ms.
        for ts in instants_at_ms(&[0, 10, 40, 45]) {
            snap.record_wall_frame(ts);
        }
        assert_relative_eq!(snap.wall_frame_max_ms, 30.0, epsilon = 0.01);
        assert_relative_eq!(snap.wall_frame_min_ms, 5.0, epsilon = 0.01);
        assert!(snap.wall_frame_max_ms >= snap.wall_frame_min_ms);
        assert_relative_eq!(snap.wall_frame_total_ms, 45.0, epsilon = 0.01);
    }

    #[test]
    fn test_frame_history_is_bounded_fifo() {
        let mut snap = MetricSnapshot::new();
        let base = Instant::now();
        // 62 timestamps, 1ms apart except the first delta (2ms) so the
        // eviction is observable.
        snap.record_wall_frame(base);
        snap.record_wall_frame(base + Duration::from_millis(2));
        for i in 1..=60u64 {
            snap.record_wall_frame(base + Duration::from_millis(2 + i));
        }
        assert_eq!(snap.frame_history.len(), FRAME_HISTORY_CAPACITY);
        // The 2ms delta was the oldest entry and must have been evicted.
        assert!(snap.frame_history.iter().all(|ms| *ms < 1.5));
    }

    #[test]
    fn test_spike_counters_are_independent_thresholds() {
        let mut snap = MetricSnapshot::new();
        // Deltas: 10ms, 21ms, 34ms.
        for ts in instants_at_ms(&[0, 10, 31, 65]) {
            snap.record_wall_frame(ts);
        }
        assert_eq!(snap.frame_spikes, 2, "21 and 34 exceed 20ms");
        assert_eq!(snap.frame_severe_spikes, 1, "only 34 exceeds 33.33ms");
    }

    #[test]
    fn test_sim_frame_accumulates_and_tracks_max() {
        let mut snap = MetricSnapshot::new();
        snap.record_sim_frame(0.016);
        snap.record_sim_frame(0.033);
        snap.record_sim_frame(0.008);
        assert_eq!(snap.sim_frame_count, 3);
        assert_relative_eq!(snap.sim_frame_max_ms, 33.0, epsilon = 0.01);
        assert_relative_eq!(snap.sim_frame_total_ms, 57.0, epsilon = 0.01);
    }

    #[test]
    fn test_reset_interval_restores_zero_state() {
        let mut snap = MetricSnapshot::new();
        for ts in instants_at_ms(&[0, 25]) {
            snap.record_wall_frame(ts);
        }
        snap.record_sim_frame(0.016);
        snap.update_ms = 4.2;
        snap.particle_ms += 1.5;
        snap.particles_skipped += 7;
        snap.spawn_triggers += 3;

        snap.reset_interval();

        assert_eq!(snap.wall_frame_count, 0);
        assert_eq!(snap.wall_frame_total_ms, 0.0);
        assert_eq!(snap.wall_frame_max_ms, 0.0);
        assert_eq!(snap.wall_frame_min_ms, WALL_MIN_SENTINEL_MS);
        assert_eq!(snap.sim_frame_count, 0);
        assert_eq!(snap.frame_spikes, 0);
        assert_eq!(snap.update_ms, 0.0);
        assert_eq!(snap.particle_ms, 0.0);
        assert_eq!(snap.particles_skipped, 0);
        assert_eq!(snap.spawn_triggers, 0);
        // Rolling window and frame pairing survive the reset.
        assert_eq!(snap.frame_history.len(), 1);
        assert!(snap.last_frame_ts.is_some());
    }

    #[test]
    fn test_write_after_reset_matches_fresh_snapshot() {
        let mut reset = MetricSnapshot::new();
        reset.record_sim_frame(0.02);
        reset.collision_ms = 3.0;
        reset.reset_interval();
        reset.record_sim_frame(0.016);
        reset.collision_ms = 1.25;

        let mut fresh = MetricSnapshot::new();
        fresh.record_sim_frame(0.016);
        fresh.collision_ms = 1.25;

        assert_eq!(reset.sim_frame_count, fresh.sim_frame_count);
        assert_relative_eq!(reset.sim_frame_total_ms, fresh.sim_frame_total_ms);
        assert_relative_eq!(reset.collision_ms, fresh.collision_ms);
    }

    #[test]
    fn test_scene_sample_derives_draw_call_estimate() {
        let mut snap = MetricSnapshot::new();
        snap.particle_system_count = 12;
        let stats = SceneStats {
            total_objects: 500,
            visible_primary: 120,
            visible_secondary: 118,
            active_gradients: 3,
            shader_active: true,
            batch_nodes: 9,
            ..Default::default()
        };
        snap.record_scene(&stats);
        assert_eq!(snap.total_objects, 500);
        assert_eq!(snap.estimated_draw_calls, 9 + 12 + 5 + 3);
    }
}
