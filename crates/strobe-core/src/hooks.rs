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

//! Capability traits for the host subsystems the dispatch layer wraps.
//!
//! One trait per wrapped host type. The instrumented wrappers in
//! `strobe-dispatch` hold an implementation of one of these and decide,
//! per call, whether to forward, time, or skip; they never intercept an
//! implementation's errors or alter what it returns on the run path.
//!
//! Methods are `&mut self` because the tick model is single-threaded and
//! non-reentrant; no trait here needs `Send` or `Sync`.

use serde::{Deserialize, Serialize};

/// An RGB triple for glow tinting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlowColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

/// Classification of a trigger object, used for per-kind counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    /// Camera shake trigger.
    Shake,
    /// Color pulse trigger.
    Pulse,
    /// Object move trigger.
    Move,
    /// Spawn-group trigger.
    Spawn,
    /// Anything else; counted in the total only.
    Other,
}

/// The main game layer: the per-tick update plus the action passes.
pub trait GameStage {
    /// Main layer update for one simulated step.
    fn update(&mut self, dt: f32);
    /// Updates the fullscreen shader layer, if attached.
    fn update_shader_layer(&mut self, dt: f32);
    /// Shows or hides the shader layer node.
    fn set_shader_layer_visible(&mut self, visible: bool);
    /// Whether a shader layer is attached at all.
    fn has_shader_layer(&self) -> bool;
    /// Move action pass.
    fn process_move_actions(&mut self);
    /// Rotation action pass.
    fn process_rotation_actions(&mut self);
    /// Transform action pass; `visible_frame` is the host's own
    /// visibility verdict for this frame.
    fn process_transform_actions(&mut self, visible_frame: bool);
    /// Area action pass.
    fn process_area_actions(&mut self, dt: f32, force: bool);
    /// Follow action pass.
    fn process_follow_actions(&mut self);
    /// Advanced-follow action pass.
    fn process_advanced_follow_actions(&mut self, dt: f32);
    /// Dynamic-object action pass for one group.
    fn process_dynamic_object_actions(&mut self, group_id: i32, dt: f32);
    /// Player-follow action pass.
    fn process_player_follow_actions(&mut self, dt: f32);
    /// Enter-effect animation pass.
    fn update_enter_effects(&mut self, dt: f32);
    /// Gradient layer animation pass.
    fn update_gradient_layers(&mut self);
    /// Spawns an object group, optionally ordered and delayed.
    fn spawn_group(&mut self, group: i32, ordered: bool, delay: f32);
}

/// The play-mode layer on top of [`GameStage`].
pub trait PlayStage {
    /// Starts a camera shake.
    fn shake_camera(&mut self, duration: f32, strength: f32, interval: f32);
    /// Object visibility pass.
    fn update_visibility(&mut self, dt: f32);
    /// Disables the gravity-flip particle effect for this tick.
    fn disable_gravity_effect(&mut self);
    /// Post-update bookkeeping pass.
    fn post_update(&mut self, dt: f32);
    /// Collision pass; returns the host's own result code.
    fn check_collisions(&mut self, dt: f32) -> i32;
    /// Camera follow pass.
    fn update_camera(&mut self, dt: f32);
}

/// The fullscreen shader layer node.
pub trait ShaderStage {
    /// Full visit: renders the shader and recurses into children.
    fn visit(&mut self);
    /// Cheap fallback: recurses into children without the shader pass.
    fn visit_children_only(&mut self);
    /// Per-frame uniform calculations.
    fn perform_calculations(&mut self);
    /// Shader state setup.
    fn setup_shader(&mut self, flag: bool);
}

/// A player trail ribbon.
pub trait TrailEffect {
    /// Captures one trail snapshot.
    fn snapshot(&mut self, dt: f32);
}

/// A particle emitter node.
pub trait ParticleSystem {
    /// Advances the emitter by one step.
    fn update(&mut self, dt: f32);
    /// Emits one particle; `false` when the emitter refused (full pool).
    fn add_particle(&mut self) -> bool;
    /// Shows or hides the emitter node.
    fn set_visible(&mut self, visible: bool);
}

/// A single level object in the scene graph.
pub trait SceneObject {
    /// Tints the glow sprite.
    fn set_glow_color(&mut self, color: GlowColor);
    /// Whether this object carries a glow sprite.
    fn has_glow_sprite(&self) -> bool;
    /// Hides the glow sprite.
    fn hide_glow(&mut self);
    /// Activates the object (entering the play area).
    fn activate(&mut self);
    /// Whether the object is flagged high-detail.
    fn is_high_detail(&self) -> bool;
}

/// The pulse/opacity effect manager.
pub trait EffectManager {
    /// Color pulse pass.
    fn update_pulse_effects(&mut self, dt: f32);
    /// Group opacity pass.
    fn update_opacity_effects(&mut self, dt: f32);
}

/// A trigger object in the level.
pub trait TriggerObject {
    /// What family of trigger this is.
    fn kind(&self) -> TriggerKind;
    /// Fires the trigger at the given x position.
    fn activate(&mut self, x_pos: f32);
}

/// A wave-trail streak.
pub trait Streak {
    /// Extends the streak stroke by one step.
    fn update_stroke(&mut self, dt: f32);
}

/// An animated text label node.
pub trait LabelNode {
    /// Advances the label animation by one step.
    fn update_label(&mut self, dt: f32);
}
