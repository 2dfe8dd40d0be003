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

//! The profiler service: owns all cross-tick state and the report cadence.

use log::{debug, trace};
use std::time::Instant;
use strobe_core::config::ConfigSource;
use strobe_core::display::{DisplaySink, LabelId, LabelStyle};
use strobe_core::{FrameCounter, MetricSnapshot, SceneStats, SettingsCache, ThrottleState, TickContext};

use crate::report::{render_breakdown, render_summary, ReportStats};

/// Simulated seconds between overlay report emissions.
pub const REPORT_INTERVAL_SECS: f32 = 0.5;

/// Owns the profiler's process-wide state and drives the interval machine.
///
/// The host calls, once per simulation tick and always from the same
/// thread: [`begin_tick`](Self::begin_tick), then any number of dispatch
/// calls through [`context`](Self::context), then
/// [`record_scene`](Self::record_scene), then
/// [`end_tick`](Self::end_tick). The service alternates between
/// accumulating and emitting; emission compiles the report, updates the
/// overlay labels, and resets the interval state exactly once.
pub struct ProfilerService {
    metrics: MetricSnapshot,
    settings: SettingsCache,
    frames: FrameCounter,
    throttle: ThrottleState,
    settings_accum: f32,
    report_accum: f32,
    summary_label: Option<LabelId>,
    detail_label: Option<LabelId>,
}

impl ProfilerService {
    /// Creates a service with an unpopulated settings cache; the first
    /// tick always hits the config source.
    pub fn new() -> Self {
        Self {
            metrics: MetricSnapshot::new(),
            settings: SettingsCache::new(),
            frames: FrameCounter::new(),
            throttle: ThrottleState::default(),
            settings_accum: 0.0,
            report_accum: 0.0,
            summary_label: None,
            detail_label: None,
        }
    }

    /// Opens one tick: advances the frame counter, refreshes settings on
    /// the batched cadence, and records the frame-time samples when the
    /// profiler is enabled.
    pub fn begin_tick(&mut self, dt: f32, source: &dyn ConfigSource) {
        self.frames.tick();

        self.settings_accum += dt;
        if self.settings.maybe_refresh(self.settings_accum, source) {
            self.settings_accum = 0.0;
        }

        self.metrics.enabled = self.settings.show_profiler;

        if self.metrics.enabled {
            self.metrics.record_sim_frame(dt);
            self.metrics.record_wall_frame(Instant::now());
        }
    }

    /// The per-tick view handed to the dispatch wrappers.
    pub fn context(&mut self) -> TickContext<'_> {
        TickContext {
            metrics: &mut self.metrics,
            settings: &self.settings,
            frame: self.frames.current(),
            throttle: &mut self.throttle,
        }
    }

    /// Copies the host's scene sample into the snapshot.
    pub fn record_scene(&mut self, stats: &SceneStats) {
        self.metrics.record_scene(stats);
    }

    /// Closes one tick: accumulates toward the report cadence and emits
    /// when due.
    ///
    /// No time accumulates while the profiler is disabled; re-enabling
    /// starts a fresh interval rather than emitting a stale one.
    pub fn end_tick(&mut self, dt: f32, sink: &mut dyn DisplaySink) {
        if !self.metrics.enabled {
            return;
        }

        self.report_accum += dt;
        if self.report_accum < REPORT_INTERVAL_SECS {
            return;
        }
        self.report_accum = 0.0;

        self.emit_report(sink);
    }

    /// Current settings snapshot.
    #[inline]
    pub fn settings(&self) -> &SettingsCache {
        &self.settings
    }

    /// Read access to the interval aggregate, mainly for harnesses.
    #[inline]
    pub fn metrics(&self) -> &MetricSnapshot {
        &self.metrics
    }

    /// Current frame number.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frames.current()
    }

    fn emit_report(&mut self, sink: &mut dyn DisplaySink) {
        let stats = ReportStats::compute(&self.metrics);
        let summary = render_summary(&self.metrics, &stats);

        let summary_id = *self
            .summary_label
            .get_or_insert_with(|| sink.create_label(LabelStyle::summary()));
        sink.set_text(summary_id, &summary);
        sink.set_visible(summary_id, true);

        if self.settings.show_detailed_profiler {
            let detail = render_breakdown(&self.metrics);
            let detail_id = *self
                .detail_label
                .get_or_insert_with(|| sink.create_label(LabelStyle::detail()));
            sink.set_text(detail_id, &detail);
            sink.set_visible(detail_id, true);
        } else if let Some(detail_id) = self.detail_label {
            // Hidden, not destroyed; the handle stays for the next enable.
            sink.set_visible(detail_id, false);
        }

        debug!("profiler report:\n{}", summary);
        if let Ok(json) = stats.to_json() {
            trace!("profiler stats: {}", json);
        }

        self.metrics.reset_interval();
    }
}

impl Default for ProfilerService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapSource(HashMap<&'static str, bool>);

    impl MapSource {
        fn new(values: &[(&'static str, bool)]) -> Self {
            Self(values.iter().copied().collect())
        }
    }

    impl ConfigSource for MapSource {
        fn read_bool(&self, key: &str) -> bool {
            self.0.get(key).copied().unwrap_or(false)
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        next_id: u32,
        created: Vec<(LabelId, LabelStyle)>,
        texts: Vec<(LabelId, String)>,
        visibility: Vec<(LabelId, bool)>,
    }

    impl DisplaySink for RecordingSink {
        fn create_label(&mut self, style: LabelStyle) -> LabelId {
            let id = LabelId(self.next_id);
            self.next_id += 1;
            self.created.push((id, style));
            id
        }

        fn set_text(&mut self, id: LabelId, text: &str) {
            self.texts.push((id, text.to_string()));
        }

        fn set_visible(&mut self, id: LabelId, visible: bool) {
            self.visibility.push((id, visible));
        }
    }

    fn profiler_on() -> MapSource {
        MapSource::new(&[("show-profiler", true)])
    }

    #[test]
    fn test_no_report_before_half_second() {
        let source = profiler_on();
        let mut sink = RecordingSink::default();
        let mut service = ProfilerService::new();

        for _ in 0..4 {
            service.begin_tick(0.1, &source);
            service.end_tick(0.1, &mut sink);
        }
        assert!(sink.created.is_empty(), "0.4s accumulated, nothing emitted");
    }

    #[test]
    fn test_report_emitted_and_interval_reset() {
        let source = profiler_on();
        let mut sink = RecordingSink::default();
        let mut service = ProfilerService::new();

        for _ in 0..5 {
            service.begin_tick(0.1, &source);
            service.end_tick(0.1, &mut sink);
        }

        assert_eq!(sink.created.len(), 1, "summary label created lazily once");
        assert_eq!(sink.texts.len(), 1);
        assert!(sink.texts[0].1.starts_with("Strobe"));
        assert_eq!(
            service.metrics().sim_frame_count,
            0,
            "interval reset after emission"
        );

        // Next interval reuses the same label.
        for _ in 0..5 {
            service.begin_tick(0.1, &source);
            service.end_tick(0.1, &mut sink);
        }
        assert_eq!(sink.created.len(), 1);
        assert_eq!(sink.texts.len(), 2);
        assert_eq!(sink.texts[0].0, sink.texts[1].0);
    }

    #[test]
    fn test_disabled_profiler_never_emits() {
        let source = MapSource::new(&[("show-profiler", false)]);
        let mut sink = RecordingSink::default();
        let mut service = ProfilerService::new();

        for _ in 0..20 {
            service.begin_tick(0.1, &source);
            service.end_tick(0.1, &mut sink);
        }
        assert!(sink.created.is_empty());
        assert_eq!(
            service.metrics().sim_frame_count,
            0,
            "no samples recorded while disabled"
        );
    }

    #[test]
    fn test_frame_counter_advances_even_when_disabled() {
        let source = MapSource::new(&[("show-profiler", false)]);
        let mut sink = RecordingSink::default();
        let mut service = ProfilerService::new();

        for _ in 0..3 {
            service.begin_tick(0.1, &source);
            service.end_tick(0.1, &mut sink);
        }
        assert_eq!(service.frame(), 3);
    }

    #[test]
    fn test_detail_label_follows_setting() {
        let mut sink = RecordingSink::default();
        let mut service = ProfilerService::new();

        let detailed = MapSource::new(&[("show-profiler", true), ("show-detailed-profiler", true)]);
        for _ in 0..5 {
            service.begin_tick(0.1, &detailed);
            service.end_tick(0.1, &mut sink);
        }
        assert_eq!(sink.created.len(), 2, "summary and detail labels");
        let detail_id = sink.created[1].0;
        assert!(sink.texts.iter().any(|(id, text)| *id == detail_id
            && text.starts_with("Breakdown")));

        // Setting turned off: the label is hidden, not recreated later.
        let plain = profiler_on();
        for _ in 0..5 {
            service.begin_tick(0.1, &plain);
            service.end_tick(0.1, &mut sink);
        }
        assert_eq!(sink.created.len(), 2);
        assert_eq!(sink.visibility.last(), Some(&(detail_id, false)));
    }

    #[test]
    fn test_scene_sample_lands_in_report() {
        let source = profiler_on();
        let mut sink = RecordingSink::default();
        let mut service = ProfilerService::new();

        for _ in 0..5 {
            service.begin_tick(0.1, &source);
            service.record_scene(&SceneStats {
                total_objects: 777,
                ..Default::default()
            });
            service.end_tick(0.1, &mut sink);
        }
        assert!(sink.texts[0].1.contains("Total: 777"));
    }
}
