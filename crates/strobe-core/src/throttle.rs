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

//! Per-subsystem skip decisions.
//!
//! Three families of policy:
//!
//! - **Modulo throttle**: run a subsystem at 1/N the tick rate for a small
//!   fixed N (2, 3 or 5). Phases across subsystems are intentionally
//!   uncoordinated; two throttled subsystems may or may not skip on the
//!   same frame.
//! - **Minimum-spacing throttle**: for spawn-group requests only, enforce
//!   a floor of [`SPAWN_MIN_SPACING_FRAMES`] frames between permits.
//! - **Hard disable**: unconditional skip while a boolean setting is on.
//!
//! Predicates whose skip is a displayed optimization (particles, trails,
//! shakes) count the skip in the metric snapshot as they decide; that side
//! effect is part of the contract, not an accident.

use crate::config::SettingsCache;
use crate::metrics::MetricSnapshot;

/// Minimum frames between two permitted spawn-group requests.
pub const SPAWN_MIN_SPACING_FRAMES: u64 = 2;
/// Gradient layers run one frame in this many.
pub const GRADIENT_PERIOD: u64 = 3;
/// Text labels run one frame in this many.
pub const LABEL_PERIOD: u64 = 5;

/// State for the minimum-spacing spawn gate.
///
/// `last_spawn_frame` is the frame number of the last permitted spawn
/// request; it only ever moves forward.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThrottleState {
    /// Frame number of the last permitted spawn-group request.
    pub last_spawn_frame: u64,
}

/// Skip on even frame numbers (half-rate throttle).
#[inline]
pub fn skip_on_even(frame: u64) -> bool {
    frame % 2 == 0
}

/// Skip every frame that is not on the period's beat (1/N-rate throttle).
#[inline]
pub fn skip_off_beat(frame: u64, period: u64) -> bool {
    frame % period != 0
}

/// Decision for one particle-system update call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleVerdict {
    /// Run the real update.
    Run,
    /// Skip this frame (reduced rate).
    Skip,
    /// Skip and force-hide the emitter (hard disable).
    SkipHidden,
}

/// Half-rate move/rotation action throttle.
#[inline]
pub fn throttle_actions(frame: u64, settings: &SettingsCache) -> bool {
    settings.exp_throttle_actions && skip_on_even(frame)
}

/// Skip transform actions on frames the host marked non-visible.
#[inline]
pub fn throttle_transforms(settings: &SettingsCache, visible_frame: bool) -> bool {
    settings.exp_throttle_transforms && !visible_frame
}

/// Hard disable of the area-action pass.
#[inline]
pub fn skip_area_effects(settings: &SettingsCache) -> bool {
    settings.exp_skip_area_effects
}

/// Hard disable of the follow-action pass.
#[inline]
pub fn skip_follow_actions(settings: &SettingsCache) -> bool {
    settings.exp_skip_follow_actions
}

/// Gradient layers run one frame in [`GRADIENT_PERIOD`].
#[inline]
pub fn throttle_gradients(frame: u64, settings: &SettingsCache) -> bool {
    settings.exp_throttle_gradients && skip_off_beat(frame, GRADIENT_PERIOD)
}

/// Half-rate advanced-follow throttle.
#[inline]
pub fn throttle_advanced_follow(frame: u64, settings: &SettingsCache) -> bool {
    settings.exp_throttle_advanced_follow && skip_on_even(frame)
}

/// Half-rate dynamic-object throttle.
#[inline]
pub fn throttle_dynamic_objects(frame: u64, settings: &SettingsCache) -> bool {
    settings.exp_throttle_dynamic_objects && skip_on_even(frame)
}

/// Half-rate player-follow throttle.
#[inline]
pub fn throttle_player_follow(frame: u64, settings: &SettingsCache) -> bool {
    settings.exp_throttle_player_follow && skip_on_even(frame)
}

/// Half-rate enter-effect throttle.
#[inline]
pub fn limit_enter_effects(frame: u64, settings: &SettingsCache) -> bool {
    settings.exp_limit_enter_effects && skip_on_even(frame)
}

/// Half-rate wave-trail stroke throttle.
#[inline]
pub fn reduce_wave_trail(frame: u64, settings: &SettingsCache) -> bool {
    settings.exp_reduce_wave_trail && skip_on_even(frame)
}

/// Text labels run one frame in [`LABEL_PERIOD`].
#[inline]
pub fn throttle_labels(frame: u64, settings: &SettingsCache) -> bool {
    settings.exp_throttle_labels && skip_off_beat(frame, LABEL_PERIOD)
}

/// Decides one particle-system update, counting skips as it goes.
pub fn particle_verdict(
    frame: u64,
    settings: &SettingsCache,
    metrics: &mut MetricSnapshot,
) -> ParticleVerdict {
    if settings.disable_particles {
        metrics.particles_skipped += 1;
        return ParticleVerdict::SkipHidden;
    }
    if settings.reduced_particles && skip_on_even(frame) {
        metrics.particles_skipped += 1;
        return ParticleVerdict::Skip;
    }
    ParticleVerdict::Run
}

/// Hard disable of trail snapshots, counted per skip.
pub fn skip_trail_snapshot(settings: &SettingsCache, metrics: &mut MetricSnapshot) -> bool {
    if settings.disable_trails {
        metrics.trail_snapshots_skipped += 1;
        true
    } else {
        false
    }
}

/// Hard disable of camera shake, counted per skip.
pub fn skip_camera_shake(settings: &SettingsCache, metrics: &mut MetricSnapshot) -> bool {
    if settings.disable_shake {
        metrics.shakes_skipped += 1;
        true
    } else {
        false
    }
}

/// The minimum-spacing spawn gate.
///
/// Always permits when the experimental throttle is off. When on, a
/// request is permitted only if at least [`SPAWN_MIN_SPACING_FRAMES`]
/// frames passed since the last permit, and the marker advances to the
/// current frame on permit.
pub fn permit_spawn(state: &mut ThrottleState, frame: u64, settings: &SettingsCache) -> bool {
    if !settings.exp_throttle_spawns {
        return true;
    }
    if frame.saturating_sub(state.last_spawn_frame) < SPAWN_MIN_SPACING_FRAMES {
        return false;
    }
    state.last_spawn_frame = frame;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with(f: impl FnOnce(&mut SettingsCache)) -> SettingsCache {
        let mut s = SettingsCache::default();
        f(&mut s);
        s
    }

    // ── Modulo throttles ─────────────────────────────────────────────

    #[test]
    fn test_half_rate_throttle_alternates() {
        let settings = settings_with(|s| s.exp_throttle_actions = true);
        let verdicts: Vec<bool> = (0..10)
            .map(|frame| throttle_actions(frame, &settings))
            .collect();
        let skips = verdicts.iter().filter(|v| **v).count();
        assert_eq!(skips, 5, "exactly half of frames 0..9 are skipped");
        for pair in verdicts.windows(2) {
            assert_ne!(pair[0], pair[1], "skip/proceed must alternate");
        }
    }

    #[test]
    fn test_throttle_inactive_without_setting() {
        let settings = SettingsCache::default();
        assert!((0..10).all(|frame| !throttle_actions(frame, &settings)));
    }

    #[test]
    fn test_gradient_throttle_runs_one_in_three() {
        let settings = settings_with(|s| s.exp_throttle_gradients = true);
        let runs = (0..9)
            .filter(|frame| !throttle_gradients(*frame, &settings))
            .count();
        assert_eq!(runs, 3);
    }

    #[test]
    fn test_label_throttle_runs_one_in_five() {
        let settings = settings_with(|s| s.exp_throttle_labels = true);
        let runs = (0..10)
            .filter(|frame| !throttle_labels(*frame, &settings))
            .count();
        assert_eq!(runs, 2);
    }

    // ── Minimum-spacing gate ─────────────────────────────────────────

    #[test]
    fn test_spawn_gate_enforces_spacing() {
        let settings = settings_with(|s| s.exp_throttle_spawns = true);
        let mut state = ThrottleState {
            last_spawn_frame: 10,
        };

        assert!(!permit_spawn(&mut state, 11, &settings));
        assert_eq!(state.last_spawn_frame, 10, "marker unchanged on skip");

        assert!(permit_spawn(&mut state, 12, &settings));
        assert_eq!(state.last_spawn_frame, 12, "marker advances on permit");
    }

    #[test]
    fn test_spawn_gate_open_without_setting() {
        let settings = SettingsCache::default();
        let mut state = ThrottleState {
            last_spawn_frame: 10,
        };
        assert!(permit_spawn(&mut state, 11, &settings));
        assert_eq!(
            state.last_spawn_frame, 10,
            "marker untouched when the gate is off"
        );
    }

    // ── Counting hard disables ───────────────────────────────────────

    #[test]
    fn test_particle_hard_disable_hides_and_counts() {
        let settings = settings_with(|s| s.disable_particles = true);
        let mut metrics = MetricSnapshot::new();
        assert_eq!(
            particle_verdict(1, &settings, &mut metrics),
            ParticleVerdict::SkipHidden
        );
        assert_eq!(metrics.particles_skipped, 1);
    }

    #[test]
    fn test_reduced_particles_skip_half_and_count() {
        let settings = settings_with(|s| s.reduced_particles = true);
        let mut metrics = MetricSnapshot::new();
        let mut skipped = 0;
        for frame in 0..10 {
            if particle_verdict(frame, &settings, &mut metrics) == ParticleVerdict::Skip {
                skipped += 1;
            }
        }
        assert_eq!(skipped, 5);
        assert_eq!(metrics.particles_skipped, 5);
    }

    #[test]
    fn test_shake_and_trail_disables_count() {
        let settings = settings_with(|s| {
            s.disable_shake = true;
            s.disable_trails = true;
        });
        let mut metrics = MetricSnapshot::new();
        assert!(skip_camera_shake(&settings, &mut metrics));
        assert!(skip_trail_snapshot(&settings, &mut metrics));
        assert_eq!(metrics.shakes_skipped, 1);
        assert_eq!(metrics.trail_snapshots_skipped, 1);
    }
}
