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

//! Synthetic harness: drives a fake scene through the full Strobe
//! pipeline for a few seconds of simulated time and logs the reports.
//!
//! An optional CLI argument names a JSON file with a key→bool object that
//! overrides the default settings, e.g.
//! `{"disable-shaders": true, "show-detailed-profiler": true}`.

use anyhow::{Context, Result};
use log::info;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::hint::black_box;

use strobe_core::config::ConfigSource;
use strobe_core::display::{DisplaySink, LabelId, LabelStyle};
use strobe_core::hooks::{
    EffectManager, GameStage, ParticleSystem, PlayStage, ShaderStage, TriggerKind, TriggerObject,
};
use strobe_core::SceneStats;
use strobe_dispatch::{
    InstrumentedEffectManager, InstrumentedGameStage, InstrumentedParticleSystem,
    InstrumentedPlayStage, InstrumentedShaderLayer, InstrumentedTrigger,
};
use strobe_telemetry::ProfilerService;

const TICK_DT: f32 = 1.0 / 240.0;
const TICKS: u32 = 720; // 3 simulated seconds

/// HashMap-backed settings store; absent keys read as `false` except the
/// master switch, which defaults on so the harness shows something.
struct MapConfig {
    values: HashMap<String, bool>,
}

impl MapConfig {
    fn new() -> Self {
        let mut values = HashMap::new();
        values.insert("show-profiler".to_string(), true);
        Self { values }
    }

    fn overlay_json(&mut self, text: &str) -> Result<()> {
        let overrides: HashMap<String, bool> =
            serde_json::from_str(text).context("settings override is not a JSON key→bool object")?;
        self.values.extend(overrides);
        Ok(())
    }
}

impl ConfigSource for MapConfig {
    fn read_bool(&self, key: &str) -> bool {
        self.values.get(key).copied().unwrap_or(false)
    }
}

/// Forwards each report block to the log instead of a screen overlay.
#[derive(Default)]
struct LogSink {
    next_id: u32,
}

impl DisplaySink for LogSink {
    fn create_label(&mut self, style: LabelStyle) -> LabelId {
        let id = LabelId(self.next_id);
        self.next_id += 1;
        info!("created overlay label {:?} ({:?})", id, style.anchor);
        id
    }

    fn set_text(&mut self, id: LabelId, text: &str) {
        info!("label {:?}:\n{}", id, text);
    }

    fn set_visible(&mut self, _id: LabelId, _visible: bool) {}
}

// Synthetic subsystems: enough busy work that the timings are nonzero.

fn spin(iterations: u32) -> u64 {
    let mut acc = 0u64;
    for i in 0..iterations {
        acc = acc.wrapping_add(black_box(i as u64).wrapping_mul(31));
    }
    black_box(acc)
}

#[derive(Default)]
struct SyntheticGameStage {
    shader_visible: bool,
    spawned_groups: u32,
}

impl GameStage for SyntheticGameStage {
    fn update(&mut self, _dt: f32) {
        spin(20_000);
    }
    fn update_shader_layer(&mut self, _dt: f32) {
        spin(2_000);
    }
    fn set_shader_layer_visible(&mut self, visible: bool) {
        self.shader_visible = visible;
    }
    fn has_shader_layer(&self) -> bool {
        true
    }
    fn process_move_actions(&mut self) {
        spin(3_000);
    }
    fn process_rotation_actions(&mut self) {
        spin(2_000);
    }
    fn process_transform_actions(&mut self, _visible_frame: bool) {
        spin(1_500);
    }
    fn process_area_actions(&mut self, _dt: f32, _force: bool) {
        spin(1_000);
    }
    fn process_follow_actions(&mut self) {
        spin(1_000);
    }
    fn process_advanced_follow_actions(&mut self, _dt: f32) {
        spin(500);
    }
    fn process_dynamic_object_actions(&mut self, _group_id: i32, _dt: f32) {
        spin(500);
    }
    fn process_player_follow_actions(&mut self, _dt: f32) {
        spin(500);
    }
    fn update_enter_effects(&mut self, _dt: f32) {
        spin(500);
    }
    fn update_gradient_layers(&mut self) {
        spin(800);
    }
    fn spawn_group(&mut self, _group: i32, _ordered: bool, _delay: f32) {
        self.spawned_groups += 1;
    }
}

#[derive(Default)]
struct SyntheticPlayStage {
    gravity_effect_off: bool,
}

impl PlayStage for SyntheticPlayStage {
    fn shake_camera(&mut self, _duration: f32, _strength: f32, _interval: f32) {}
    fn update_visibility(&mut self, _dt: f32) {
        spin(4_000);
    }
    fn disable_gravity_effect(&mut self) {
        self.gravity_effect_off = true;
    }
    fn post_update(&mut self, _dt: f32) {
        spin(1_000);
    }
    fn check_collisions(&mut self, _dt: f32) -> i32 {
        spin(6_000);
        0
    }
    fn update_camera(&mut self, _dt: f32) {
        spin(1_000);
    }
}

#[derive(Default)]
struct SyntheticShaderLayer;

impl ShaderStage for SyntheticShaderLayer {
    fn visit(&mut self) {
        spin(8_000);
    }
    fn visit_children_only(&mut self) {
        spin(1_000);
    }
    fn perform_calculations(&mut self) {
        spin(2_000);
    }
    fn setup_shader(&mut self, _flag: bool) {}
}

#[derive(Default)]
struct SyntheticParticles;

impl ParticleSystem for SyntheticParticles {
    fn update(&mut self, _dt: f32) {
        spin(1_200);
    }
    fn add_particle(&mut self) -> bool {
        true
    }
    fn set_visible(&mut self, _visible: bool) {}
}

#[derive(Default)]
struct SyntheticEffects;

impl EffectManager for SyntheticEffects {
    fn update_pulse_effects(&mut self, _dt: f32) {
        spin(1_500);
    }
    fn update_opacity_effects(&mut self, _dt: f32) {
        spin(1_000);
    }
}

struct SyntheticTrigger(TriggerKind);

impl TriggerObject for SyntheticTrigger {
    fn kind(&self) -> TriggerKind {
        self.0
    }
    fn activate(&mut self, _x_pos: f32) {}
}

fn scene_sample(tick: u32) -> SceneStats {
    SceneStats {
        total_objects: 1500,
        visible_primary: 180 + tick % 40,
        visible_secondary: 175 + tick % 40,
        active_gradients: 2,
        shader_active: true,
        section_left: (tick / 60) as i32,
        section_right: (tick / 60) as i32 + 6,
        section_top: 4,
        section_bottom: 0,
        batch_nodes: 11,
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = MapConfig::new();
    if let Some(path) = env::args().nth(1) {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("cannot read settings override '{}'", path))?;
        config.overlay_json(&text)?;
        info!("applied settings overrides from {}", path);
    }

    let mut service = ProfilerService::new();
    let mut sink = LogSink::default();

    let mut game = InstrumentedGameStage::new(SyntheticGameStage::default());
    let mut play = InstrumentedPlayStage::new(SyntheticPlayStage::default());
    let mut shader = InstrumentedShaderLayer::new(SyntheticShaderLayer);
    let mut effects = InstrumentedEffectManager::new(SyntheticEffects);
    let mut particles: Vec<InstrumentedParticleSystem<SyntheticParticles>> = (0..8)
        .map(|_| InstrumentedParticleSystem::new(SyntheticParticles))
        .collect();
    let mut pulse_trigger = InstrumentedTrigger::new(SyntheticTrigger(TriggerKind::Pulse));
    let mut move_trigger = InstrumentedTrigger::new(SyntheticTrigger(TriggerKind::Move));

    info!("running {} ticks at {:.2}ms each", TICKS, TICK_DT * 1000.0);

    for tick in 0..TICKS {
        service.begin_tick(TICK_DT, &config);

        {
            let mut ctx = service.context();
            game.update(&mut ctx, TICK_DT);
            game.update_shader_layer(&mut ctx, TICK_DT);
            game.process_move_actions(&mut ctx);
            game.process_rotation_actions(&mut ctx);
            game.process_transform_actions(&mut ctx, tick % 4 != 0);
            game.process_area_actions(&mut ctx, TICK_DT, false);
            game.process_follow_actions(&mut ctx);
            game.update_gradient_layers(&mut ctx);

            play.update_visibility(&mut ctx, TICK_DT);
            let _ = play.check_collisions(&mut ctx, TICK_DT);
            play.update_camera(&mut ctx, TICK_DT);
            play.post_update(&mut ctx, TICK_DT);

            shader.perform_calculations(&mut ctx);
            shader.visit(&mut ctx);

            effects.update_pulse_effects(&mut ctx, TICK_DT);
            effects.update_opacity_effects(&mut ctx, TICK_DT);

            for system in &mut particles {
                system.update(&mut ctx, TICK_DT);
            }

            // A burst of trigger traffic every simulated quarter second.
            if tick % 60 == 0 {
                pulse_trigger.activate(&mut ctx, tick as f32);
                move_trigger.activate(&mut ctx, tick as f32);
                game.spawn_group(&mut ctx, 1, false, 0.0);
                game.spawn_group(&mut ctx, 2, false, 0.0);
            }
        }

        service.record_scene(&scene_sample(tick));
        service.end_tick(TICK_DT, &mut sink);
    }

    info!(
        "done: {} frames, {} spawn groups reached the stage",
        service.frame(),
        game.into_inner().spawned_groups
    );
    Ok(())
}
