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

//! Report compilation: grading, spike status, and the two overlay blocks.
//!
//! Everything here is a pure function of the metric snapshot. Division by
//! observed quantities is always zero-guarded; an interval with no frames
//! reports zeros, never NaN or infinity.

use serde::Serialize;
use std::fmt;
use strobe_core::MetricSnapshot;

/// Letter grade for the average wall-frame duration of an interval.
///
/// Thresholds are frame-budget landmarks: 8 ms (120 FPS), 12 ms, 16.67 ms
/// (60 FPS), 25 ms, 33.33 ms (30 FPS). Worsens monotonically as the
/// average grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PerfGrade {
    /// Average at or under 8 ms.
    S,
    /// Average over 8 ms.
    A,
    /// Average over 12 ms.
    B,
    /// Average over 16.67 ms.
    C,
    /// Average over 25 ms.
    D,
    /// Average over 33.33 ms.
    F,
}

impl PerfGrade {
    /// Grades an average wall-frame duration in milliseconds.
    pub fn from_avg_frame_ms(avg_ms: f64) -> Self {
        let mut grade = PerfGrade::S;
        if avg_ms > 8.0 {
            grade = PerfGrade::A;
        }
        if avg_ms > 12.0 {
            grade = PerfGrade::B;
        }
        if avg_ms > 16.67 {
            grade = PerfGrade::C;
        }
        if avg_ms > 25.0 {
            grade = PerfGrade::D;
        }
        if avg_ms > 33.33 {
            grade = PerfGrade::F;
        }
        grade
    }
}

impl fmt::Display for PerfGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            PerfGrade::S => 'S',
            PerfGrade::A => 'A',
            PerfGrade::B => 'B',
            PerfGrade::C => 'C',
            PerfGrade::D => 'D',
            PerfGrade::F => 'F',
        };
        write!(f, "{}", c)
    }
}

/// Spike severity for an interval; severe wins over mild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpikeStatus {
    /// No frame exceeded the mild threshold.
    Calm,
    /// At least one frame over 20 ms, none over 33.33 ms.
    Mild,
    /// At least one frame over 33.33 ms.
    Severe,
}

impl SpikeStatus {
    /// Classifies an interval from its two spike counters.
    pub fn from_counts(mild: u32, severe: u32) -> Self {
        if severe > 0 {
            SpikeStatus::Severe
        } else if mild > 0 {
            SpikeStatus::Mild
        } else {
            SpikeStatus::Calm
        }
    }

    /// The header annotation for this status.
    pub fn annotation(&self) -> &'static str {
        match self {
            SpikeStatus::Calm => "",
            SpikeStatus::Mild => " [!]",
            SpikeStatus::Severe => " [!!!]",
        }
    }
}

/// Zero-guarded percentage of `value` against `total`.
#[inline]
pub fn percent_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}

/// Derived per-interval statistics, computed once per report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportStats {
    /// Average wall-frame duration (ms); 0 for an empty interval.
    pub avg_wall_ms: f64,
    /// Average simulated-frame duration (ms); 0 for an empty interval.
    pub avg_sim_ms: f64,
    /// Wall FPS derived from the average; 0 when the average is 0.
    pub fps_wall: f64,
    /// Simulated FPS derived from the average; 0 when the average is 0.
    pub fps_sim: f64,
    /// Letter grade for the average wall frame.
    pub grade: PerfGrade,
    /// Spike severity of the interval.
    pub spikes: SpikeStatus,
}

impl ReportStats {
    /// Computes the derived statistics for one interval.
    pub fn compute(snapshot: &MetricSnapshot) -> Self {
        let avg_wall_ms = if snapshot.wall_frame_count > 0 {
            snapshot.wall_frame_total_ms / snapshot.wall_frame_count as f64
        } else {
            0.0
        };
        let avg_sim_ms = if snapshot.sim_frame_count > 0 {
            snapshot.sim_frame_total_ms / snapshot.sim_frame_count as f64
        } else {
            0.0
        };
        let fps_wall = if avg_wall_ms > 0.0 {
            1000.0 / avg_wall_ms
        } else {
            0.0
        };
        let fps_sim = if avg_sim_ms > 0.0 { 1000.0 / avg_sim_ms } else { 0.0 };

        Self {
            avg_wall_ms,
            avg_sim_ms,
            fps_wall,
            fps_sim,
            grade: PerfGrade::from_avg_frame_ms(avg_wall_ms),
            spikes: SpikeStatus::from_counts(snapshot.frame_spikes, snapshot.frame_severe_spikes),
        }
    }

    /// Serializes the stats for structured log shipping.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Renders the main summary block shown in the top-left label.
pub fn render_summary(snapshot: &MetricSnapshot, stats: &ReportStats) -> String {
    format!(
        "Strobe{}\n\
         FPS: {:.0} (sim {:.0}) | Grade: {}\n\
         Frame: {:.2}ms (min {:.1} / max {:.1})\n\
         Spikes: {} (>20ms) | {} (>33ms)\n\
         \n\
         Objects\n\
         Total: {} | Visible: {}/{}\n\
         Sections: [{}-{}]x[{}-{}]\n\
         \n\
         Timings\n\
         Update: {:.2}ms | Shader: {:.2}ms\n\
         Particle: {:.2}ms | Effects: {:.2}ms\n\
         Visibility: {:.2}ms | Collision: {:.2}ms\n\
         Camera: {:.2}ms | Actions: {:.2}ms\n\
         \n\
         Rendering\n\
         BatchNodes: {} | DrawCalls: ~{}\n\
         Gradients: {} | Particles: {}\n\
         \n\
         Optimizations\n\
         Skip: P{} G{} H{} T{}\n\
         Triggers: {} (S{} P{} M{})",
        stats.spikes.annotation(),
        stats.fps_wall,
        stats.fps_sim,
        stats.grade,
        stats.avg_wall_ms,
        snapshot.wall_frame_min_ms,
        snapshot.wall_frame_max_ms,
        snapshot.frame_spikes,
        snapshot.frame_severe_spikes,
        snapshot.total_objects,
        snapshot.visible_objects_primary,
        snapshot.visible_objects_secondary,
        snapshot.section_left,
        snapshot.section_right,
        snapshot.section_bottom,
        snapshot.section_top,
        snapshot.update_ms,
        snapshot.shader_visit_ms,
        snapshot.particle_ms,
        snapshot.effect_ms,
        snapshot.visibility_ms,
        snapshot.collision_ms,
        snapshot.camera_ms,
        snapshot.move_actions_ms + snapshot.rotation_actions_ms,
        snapshot.batch_node_count,
        snapshot.estimated_draw_calls,
        snapshot.active_gradients,
        snapshot.particle_system_count,
        snapshot.particles_skipped,
        snapshot.glows_disabled,
        snapshot.high_detail_skipped,
        snapshot.trail_snapshots_skipped,
        snapshot.triggers_activated,
        snapshot.spawn_triggers,
        snapshot.pulse_triggers,
        snapshot.move_triggers,
    )
}

/// Renders the detailed breakdown block shown in the top-right label.
///
/// Percentages are taken against the reference total
/// `update_ms + shader_visit_ms`; the action passes overlap the update
/// timing, so the column can legitimately sum past 100%.
pub fn render_breakdown(snapshot: &MetricSnapshot) -> String {
    let reference_total = snapshot.update_ms + snapshot.shader_visit_ms;
    let pct = |value: f64| percent_of(value, reference_total);
    let action_total = snapshot.move_actions_ms
        + snapshot.rotation_actions_ms
        + snapshot.transform_actions_ms
        + snapshot.area_actions_ms;

    format!(
        "Breakdown\n\
         Shader: {:.1}%\n\
         Effects: {:.1}%\n\
         \x20 pulse: {:.2}ms\n\
         \x20 opacity: {:.2}ms\n\
         Actions: {:.1}%\n\
         \x20 move: {:.2}ms\n\
         \x20 rotate: {:.2}ms\n\
         \x20 transform: {:.2}ms\n\
         \x20 area: {:.2}ms\n\
         Particles: {:.1}%\n\
         \n\
         Other\n\
         \x20 visibility: {:.2}ms\n\
         \x20 collision: {:.2}ms\n\
         \x20 camera: {:.2}ms",
        pct(snapshot.shader_visit_ms),
        pct(snapshot.effect_ms),
        snapshot.pulse_effect_ms,
        snapshot.opacity_effect_ms,
        pct(action_total),
        snapshot.move_actions_ms,
        snapshot.rotation_actions_ms,
        snapshot.transform_actions_ms,
        snapshot.area_actions_ms,
        pct(snapshot.particle_ms),
        snapshot.visibility_ms,
        snapshot.collision_ms,
        snapshot.camera_ms,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strobe_core::SceneStats;

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(PerfGrade::from_avg_frame_ms(5.0), PerfGrade::S);
        assert_eq!(PerfGrade::from_avg_frame_ms(10.0), PerfGrade::A);
        assert_eq!(PerfGrade::from_avg_frame_ms(14.0), PerfGrade::B);
        assert_eq!(PerfGrade::from_avg_frame_ms(20.0), PerfGrade::C);
        assert_eq!(PerfGrade::from_avg_frame_ms(30.0), PerfGrade::D);
        assert_eq!(PerfGrade::from_avg_frame_ms(40.0), PerfGrade::F);
    }

    #[test]
    fn test_grade_boundaries_are_exclusive() {
        assert_eq!(PerfGrade::from_avg_frame_ms(8.0), PerfGrade::S);
        assert_eq!(PerfGrade::from_avg_frame_ms(8.01), PerfGrade::A);
        assert_eq!(PerfGrade::from_avg_frame_ms(33.33), PerfGrade::D);
        assert_eq!(PerfGrade::from_avg_frame_ms(33.34), PerfGrade::F);
    }

    #[test]
    fn test_spike_status_severe_wins() {
        assert_eq!(SpikeStatus::from_counts(0, 0), SpikeStatus::Calm);
        assert_eq!(SpikeStatus::from_counts(3, 0), SpikeStatus::Mild);
        assert_eq!(SpikeStatus::from_counts(3, 1), SpikeStatus::Severe);
        assert_eq!(SpikeStatus::from_counts(3, 1).annotation(), " [!!!]");
        assert_eq!(SpikeStatus::from_counts(1, 0).annotation(), " [!]");
        assert_eq!(SpikeStatus::from_counts(0, 0).annotation(), "");
    }

    #[test]
    fn test_percent_of_zero_total_is_zero() {
        assert_eq!(percent_of(5.0, 0.0), 0.0);
        assert_relative_eq!(percent_of(5.0, 20.0), 25.0);
    }

    #[test]
    fn test_stats_on_empty_interval_are_all_zero() {
        let snap = MetricSnapshot::new();
        let stats = ReportStats::compute(&snap);
        assert_eq!(stats.avg_wall_ms, 0.0);
        assert_eq!(stats.fps_wall, 0.0);
        assert_eq!(stats.avg_sim_ms, 0.0);
        assert_eq!(stats.fps_sim, 0.0);
        assert_eq!(stats.grade, PerfGrade::S);
        assert_eq!(stats.spikes, SpikeStatus::Calm);
    }

    #[test]
    fn test_stats_average_and_fps() {
        let mut snap = MetricSnapshot::new();
        snap.wall_frame_total_ms = 100.0;
        snap.wall_frame_count = 10;
        snap.sim_frame_total_ms = 50.0;
        snap.sim_frame_count = 10;
        let stats = ReportStats::compute(&snap);
        assert_relative_eq!(stats.avg_wall_ms, 10.0);
        assert_relative_eq!(stats.fps_wall, 100.0);
        assert_relative_eq!(stats.avg_sim_ms, 5.0);
        assert_relative_eq!(stats.fps_sim, 200.0);
        assert_eq!(stats.grade, PerfGrade::A);
    }

    #[test]
    fn test_summary_contains_section_and_trigger_lines() {
        let mut snap = MetricSnapshot::new();
        snap.record_scene(&SceneStats {
            total_objects: 420,
            visible_primary: 99,
            visible_secondary: 97,
            section_left: 2,
            section_right: 7,
            section_bottom: 0,
            section_top: 3,
            ..Default::default()
        });
        snap.triggers_activated = 9;
        snap.spawn_triggers = 4;
        snap.pulse_triggers = 3;
        snap.move_triggers = 2;

        let stats = ReportStats::compute(&snap);
        let text = render_summary(&snap, &stats);
        assert!(text.starts_with("Strobe\n"), "calm interval has no flag");
        assert!(text.contains("Total: 420 | Visible: 99/97"));
        assert!(text.contains("Sections: [2-7]x[0-3]"));
        assert!(text.contains("Triggers: 9 (S4 P3 M2)"));
    }

    #[test]
    fn test_summary_header_carries_spike_annotation() {
        let mut snap = MetricSnapshot::new();
        snap.frame_spikes = 2;
        let stats = ReportStats::compute(&snap);
        assert!(render_summary(&snap, &stats).starts_with("Strobe [!]\n"));

        snap.frame_severe_spikes = 1;
        let stats = ReportStats::compute(&snap);
        assert!(render_summary(&snap, &stats).starts_with("Strobe [!!!]\n"));
    }

    #[test]
    fn test_breakdown_percentages_use_reference_total() {
        let mut snap = MetricSnapshot::new();
        snap.update_ms = 8.0;
        snap.shader_visit_ms = 2.0;
        snap.particle_ms = 5.0;
        let text = render_breakdown(&snap);
        assert!(text.contains("Shader: 20.0%"));
        assert!(text.contains("Particles: 50.0%"));
    }

    #[test]
    fn test_breakdown_is_finite_with_no_timings() {
        let snap = MetricSnapshot::new();
        let text = render_breakdown(&snap);
        assert!(text.contains("Shader: 0.0%"));
        assert!(!text.contains("NaN"));
        assert!(!text.contains("inf"));
    }
}
