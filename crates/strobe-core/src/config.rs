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

//! The batched snapshot of external boolean configuration.
//!
//! The external store is assumed cheap but not free (a lookup by string
//! key), and it sits on the hot path otherwise, so all keys are re-read in
//! one pass at most every [`SETTINGS_REFRESH_INTERVAL_SECS`] simulated
//! seconds instead of on every access.

use log::trace;
use serde::{Deserialize, Serialize};

/// How often (simulated seconds) the settings snapshot is refreshed.
pub const SETTINGS_REFRESH_INTERVAL_SECS: f32 = 0.25;

/// The external key→bool configuration store.
///
/// The only contract: given a fixed key, return its current value.
pub trait ConfigSource {
    /// Reads the current value of a boolean option.
    fn read_bool(&self, key: &str) -> bool;
}

/// The fixed option keys the profiler reads.
pub mod keys {
    /// Master switch for the profiler overlay.
    pub const SHOW_PROFILER: &str = "show-profiler";
    /// Secondary detailed-breakdown panel.
    pub const SHOW_DETAILED_PROFILER: &str = "show-detailed-profiler";
    /// Hard-disable the fullscreen shader layer.
    pub const DISABLE_SHADERS: &str = "disable-shaders";
    /// Hard-disable player trail snapshots.
    pub const DISABLE_TRAILS: &str = "disable-trails";
    /// Hard-disable particle systems.
    pub const DISABLE_PARTICLES: &str = "disable-particles";
    /// Hard-disable glow sprites.
    pub const DISABLE_GLOW: &str = "disable-glow";
    /// Hard-disable pulse effects and pulse triggers.
    pub const DISABLE_PULSE: &str = "disable-pulse";
    /// Hard-disable camera shake and shake triggers.
    pub const DISABLE_SHAKE: &str = "disable-shake";
    /// Skip activation of high-detail objects.
    pub const DISABLE_HIGH_DETAIL: &str = "disable-high-detail";
    /// Hard-disable opacity/move effect passes.
    pub const DISABLE_MOVE_EFFECTS: &str = "disable-move-effects";
    /// Update particles at half rate instead of disabling them.
    pub const REDUCED_PARTICLES: &str = "reduced-particles";
    /// Run move/rotation action passes at half rate.
    pub const EXP_THROTTLE_ACTIONS: &str = "exp-throttle-actions";
    /// Skip the area-action pass entirely.
    pub const EXP_SKIP_AREA_EFFECTS: &str = "exp-skip-area-effects";
    /// Skip transform actions on non-visible frames.
    pub const EXP_THROTTLE_TRANSFORMS: &str = "exp-throttle-transforms";
    /// Enforce minimum spacing between spawn-group requests.
    pub const EXP_THROTTLE_SPAWNS: &str = "exp-throttle-spawns";
    /// Reserved: reduce collision checking rate.
    pub const EXP_REDUCE_COLLISIONS: &str = "exp-reduce-collisions";
    /// Reserved: cull more aggressively.
    pub const EXP_AGGRESSIVE_CULLING: &str = "exp-aggressive-culling";
    /// Skip the follow-action pass entirely.
    pub const EXP_SKIP_FOLLOW_ACTIONS: &str = "exp-skip-follow-actions";
    /// Reserved: reduce per-object color update rate.
    pub const EXP_REDUCE_COLOR_UPDATES: &str = "exp-reduce-color-updates";
    /// Update gradient layers one frame in three.
    pub const EXP_THROTTLE_GRADIENTS: &str = "exp-throttle-gradients";
    /// Update wave-trail strokes at half rate.
    pub const EXP_REDUCE_WAVE_TRAIL: &str = "exp-reduce-wave-trail";
    /// Run advanced-follow processing at half rate.
    pub const EXP_THROTTLE_ADVANCED_FOLLOW: &str = "exp-throttle-advanced-follow";
    /// Run dynamic-object processing at half rate.
    pub const EXP_THROTTLE_DYNAMIC_OBJECTS: &str = "exp-throttle-dynamic-objects";
    /// Run player-follow processing at half rate.
    pub const EXP_THROTTLE_PLAYER_FOLLOW: &str = "exp-throttle-player-follow";
    /// Run enter-effect updates at half rate.
    pub const EXP_LIMIT_ENTER_EFFECTS: &str = "exp-limit-enter-effects";
    /// Update text labels one frame in five.
    pub const EXP_THROTTLE_LABELS: &str = "exp-throttle-labels";
}

/// An all-or-nothing snapshot of the external boolean options.
///
/// A few `exp-*` keys are cached but not yet consumed by any predicate;
/// they ride along in the batched refresh so turning them into policy
/// later costs nothing on the hot path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsCache {
    /// Master profiler switch.
    pub show_profiler: bool,
    /// Detailed-breakdown panel switch.
    pub show_detailed_profiler: bool,
    /// See [`keys::DISABLE_SHADERS`].
    pub disable_shaders: bool,
    /// See [`keys::DISABLE_TRAILS`].
    pub disable_trails: bool,
    /// See [`keys::DISABLE_PARTICLES`].
    pub disable_particles: bool,
    /// See [`keys::DISABLE_GLOW`].
    pub disable_glow: bool,
    /// See [`keys::DISABLE_PULSE`].
    pub disable_pulse: bool,
    /// See [`keys::DISABLE_SHAKE`].
    pub disable_shake: bool,
    /// See [`keys::DISABLE_HIGH_DETAIL`].
    pub disable_high_detail: bool,
    /// See [`keys::DISABLE_MOVE_EFFECTS`].
    pub disable_move_effects: bool,
    /// See [`keys::REDUCED_PARTICLES`].
    pub reduced_particles: bool,
    /// See [`keys::EXP_THROTTLE_ACTIONS`].
    pub exp_throttle_actions: bool,
    /// See [`keys::EXP_SKIP_AREA_EFFECTS`].
    pub exp_skip_area_effects: bool,
    /// See [`keys::EXP_THROTTLE_TRANSFORMS`].
    pub exp_throttle_transforms: bool,
    /// See [`keys::EXP_THROTTLE_SPAWNS`].
    pub exp_throttle_spawns: bool,
    /// See [`keys::EXP_REDUCE_COLLISIONS`].
    pub exp_reduce_collisions: bool,
    /// See [`keys::EXP_AGGRESSIVE_CULLING`].
    pub exp_aggressive_culling: bool,
    /// See [`keys::EXP_SKIP_FOLLOW_ACTIONS`].
    pub exp_skip_follow_actions: bool,
    /// See [`keys::EXP_REDUCE_COLOR_UPDATES`].
    pub exp_reduce_color_updates: bool,
    /// See [`keys::EXP_THROTTLE_GRADIENTS`].
    pub exp_throttle_gradients: bool,
    /// See [`keys::EXP_REDUCE_WAVE_TRAIL`].
    pub exp_reduce_wave_trail: bool,
    /// See [`keys::EXP_THROTTLE_ADVANCED_FOLLOW`].
    pub exp_throttle_advanced_follow: bool,
    /// See [`keys::EXP_THROTTLE_DYNAMIC_OBJECTS`].
    pub exp_throttle_dynamic_objects: bool,
    /// See [`keys::EXP_THROTTLE_PLAYER_FOLLOW`].
    pub exp_throttle_player_follow: bool,
    /// See [`keys::EXP_LIMIT_ENTER_EFFECTS`].
    pub exp_limit_enter_effects: bool,
    /// See [`keys::EXP_THROTTLE_LABELS`].
    pub exp_throttle_labels: bool,
    /// Whether the cache has ever been populated.
    pub valid: bool,
}

impl Default for SettingsCache {
    fn default() -> Self {
        Self {
            show_profiler: true,
            show_detailed_profiler: false,
            disable_shaders: false,
            disable_trails: false,
            disable_particles: false,
            disable_glow: false,
            disable_pulse: false,
            disable_shake: false,
            disable_high_detail: false,
            disable_move_effects: false,
            reduced_particles: false,
            exp_throttle_actions: false,
            exp_skip_area_effects: false,
            exp_throttle_transforms: false,
            exp_throttle_spawns: false,
            exp_reduce_collisions: false,
            exp_aggressive_culling: false,
            exp_skip_follow_actions: false,
            exp_reduce_color_updates: false,
            exp_throttle_gradients: false,
            exp_reduce_wave_trail: false,
            exp_throttle_advanced_follow: false,
            exp_throttle_dynamic_objects: false,
            exp_throttle_player_follow: false,
            exp_limit_enter_effects: false,
            exp_throttle_labels: false,
            valid: false,
        }
    }
}

impl SettingsCache {
    /// Creates an unpopulated cache; the first `maybe_refresh` always
    /// hits the source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-reads every option from the source in one pass and marks the
    /// cache valid.
    pub fn refresh(&mut self, source: &dyn ConfigSource) {
        self.show_profiler = source.read_bool(keys::SHOW_PROFILER);
        self.show_detailed_profiler = source.read_bool(keys::SHOW_DETAILED_PROFILER);
        self.disable_shaders = source.read_bool(keys::DISABLE_SHADERS);
        self.disable_trails = source.read_bool(keys::DISABLE_TRAILS);
        self.disable_particles = source.read_bool(keys::DISABLE_PARTICLES);
        self.disable_glow = source.read_bool(keys::DISABLE_GLOW);
        self.disable_pulse = source.read_bool(keys::DISABLE_PULSE);
        self.disable_shake = source.read_bool(keys::DISABLE_SHAKE);
        self.disable_high_detail = source.read_bool(keys::DISABLE_HIGH_DETAIL);
        self.disable_move_effects = source.read_bool(keys::DISABLE_MOVE_EFFECTS);
        self.reduced_particles = source.read_bool(keys::REDUCED_PARTICLES);
        self.exp_throttle_actions = source.read_bool(keys::EXP_THROTTLE_ACTIONS);
        self.exp_skip_area_effects = source.read_bool(keys::EXP_SKIP_AREA_EFFECTS);
        self.exp_throttle_transforms = source.read_bool(keys::EXP_THROTTLE_TRANSFORMS);
        self.exp_throttle_spawns = source.read_bool(keys::EXP_THROTTLE_SPAWNS);
        self.exp_reduce_collisions = source.read_bool(keys::EXP_REDUCE_COLLISIONS);
        self.exp_aggressive_culling = source.read_bool(keys::EXP_AGGRESSIVE_CULLING);
        self.exp_skip_follow_actions = source.read_bool(keys::EXP_SKIP_FOLLOW_ACTIONS);
        self.exp_reduce_color_updates = source.read_bool(keys::EXP_REDUCE_COLOR_UPDATES);
        self.exp_throttle_gradients = source.read_bool(keys::EXP_THROTTLE_GRADIENTS);
        self.exp_reduce_wave_trail = source.read_bool(keys::EXP_REDUCE_WAVE_TRAIL);
        self.exp_throttle_advanced_follow = source.read_bool(keys::EXP_THROTTLE_ADVANCED_FOLLOW);
        self.exp_throttle_dynamic_objects = source.read_bool(keys::EXP_THROTTLE_DYNAMIC_OBJECTS);
        self.exp_throttle_player_follow = source.read_bool(keys::EXP_THROTTLE_PLAYER_FOLLOW);
        self.exp_limit_enter_effects = source.read_bool(keys::EXP_LIMIT_ENTER_EFFECTS);
        self.exp_throttle_labels = source.read_bool(keys::EXP_THROTTLE_LABELS);
        self.valid = true;
        trace!("settings cache refreshed (profiler {})", self.show_profiler);
    }

    /// Refreshes when the accumulated time reaches the interval or the
    /// cache was never populated.
    ///
    /// Returns `true` when a refresh happened so the caller can reset its
    /// own accumulator to zero.
    pub fn maybe_refresh(&mut self, accumulated_secs: f32, source: &dyn ConfigSource) -> bool {
        if accumulated_secs >= SETTINGS_REFRESH_INTERVAL_SECS || !self.valid {
            self.refresh(source);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashMap;

    struct MapSource {
        values: HashMap<&'static str, bool>,
        reads: Cell<u32>,
    }

    impl MapSource {
        fn new(values: &[(&'static str, bool)]) -> Self {
            Self {
                values: values.iter().copied().collect(),
                reads: Cell::new(0),
            }
        }
    }

    impl ConfigSource for MapSource {
        fn read_bool(&self, key: &str) -> bool {
            self.reads.set(self.reads.get() + 1);
            self.values.get(key).copied().unwrap_or(false)
        }
    }

    #[test]
    fn test_first_refresh_is_forced() {
        let source = MapSource::new(&[(keys::DISABLE_SHADERS, true)]);
        let mut cache = SettingsCache::new();
        assert!(!cache.valid);

        let refreshed = cache.maybe_refresh(0.0, &source);
        assert!(refreshed, "unpopulated cache must refresh immediately");
        assert!(cache.valid);
        assert!(cache.disable_shaders);
    }

    #[test]
    fn test_refresh_waits_for_interval() {
        let source = MapSource::new(&[]);
        let mut cache = SettingsCache::new();
        cache.maybe_refresh(0.0, &source);
        let reads_after_first = source.reads.get();

        assert!(!cache.maybe_refresh(0.1, &source));
        assert!(!cache.maybe_refresh(0.24, &source));
        assert_eq!(
            source.reads.get(),
            reads_after_first,
            "no source reads below the interval"
        );

        assert!(cache.maybe_refresh(0.25, &source));
        assert!(source.reads.get() > reads_after_first);
    }

    #[test]
    fn test_refresh_reads_all_keys_in_one_pass() {
        let source = MapSource::new(&[
            (keys::SHOW_PROFILER, true),
            (keys::REDUCED_PARTICLES, true),
            (keys::EXP_THROTTLE_LABELS, true),
        ]);
        let mut cache = SettingsCache::new();
        cache.refresh(&source);

        assert_eq!(source.reads.get(), 26, "all 26 keys read in one batch");
        assert!(cache.show_profiler);
        assert!(cache.reduced_particles);
        assert!(cache.exp_throttle_labels);
        assert!(!cache.disable_glow);
    }
}
