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

//! Wrappers for the game, play, and shader stage subsystems.

use log::trace;
use strobe_core::hooks::{GameStage, PlayStage, ShaderStage};
use strobe_core::throttle;
use strobe_core::{Stopwatch, TickContext};

/// Decorator around the host's main game layer.
///
/// The layer update itself is always timed and never skipped; the action
/// passes behind it are where the throttle policy bites.
pub struct InstrumentedGameStage<S: GameStage> {
    inner: S,
}

impl<S: GameStage> InstrumentedGameStage<S> {
    /// Wraps a game stage.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Gives the wrapped stage back.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Main layer update; timed, latest sample wins.
    pub fn update(&mut self, ctx: &mut TickContext<'_>, dt: f32) {
        let sw = Stopwatch::new();
        self.inner.update(dt);
        ctx.metrics.update_ms = sw.elapsed_ms();
    }

    /// Shader-layer update; a hard disable force-hides the layer instead
    /// of updating it, and re-enabling restores visibility.
    pub fn update_shader_layer(&mut self, ctx: &mut TickContext<'_>, dt: f32) {
        if ctx.settings.disable_shaders {
            if self.inner.has_shader_layer() {
                self.inner.set_shader_layer_visible(false);
            }
            return;
        }
        if self.inner.has_shader_layer() {
            self.inner.set_shader_layer_visible(true);
        }
        self.inner.update_shader_layer(dt);
    }

    /// Move action pass; half-rate under the action throttle.
    pub fn process_move_actions(&mut self, ctx: &mut TickContext<'_>) {
        if throttle::throttle_actions(ctx.frame, ctx.settings) {
            return;
        }
        let sw = Stopwatch::new();
        self.inner.process_move_actions();
        ctx.metrics.move_actions_ms = sw.elapsed_ms();
    }

    /// Rotation action pass; half-rate under the action throttle.
    pub fn process_rotation_actions(&mut self, ctx: &mut TickContext<'_>) {
        if throttle::throttle_actions(ctx.frame, ctx.settings) {
            return;
        }
        let sw = Stopwatch::new();
        self.inner.process_rotation_actions();
        ctx.metrics.rotation_actions_ms = sw.elapsed_ms();
    }

    /// Transform action pass; skipped on non-visible frames under the
    /// transform throttle. Accumulates, the follow pass shares the bucket.
    pub fn process_transform_actions(&mut self, ctx: &mut TickContext<'_>, visible_frame: bool) {
        if throttle::throttle_transforms(ctx.settings, visible_frame) {
            return;
        }
        let sw = Stopwatch::new();
        self.inner.process_transform_actions(visible_frame);
        ctx.metrics.transform_actions_ms += sw.elapsed_ms();
    }

    /// Area action pass; hard disable skips it entirely.
    pub fn process_area_actions(&mut self, ctx: &mut TickContext<'_>, dt: f32, force: bool) {
        if throttle::skip_area_effects(ctx.settings) {
            return;
        }
        let sw = Stopwatch::new();
        self.inner.process_area_actions(dt, force);
        ctx.metrics.area_actions_ms = sw.elapsed_ms();
    }

    /// Follow action pass; hard disable skips it. Timing lands in the
    /// transform bucket alongside the transform pass.
    pub fn process_follow_actions(&mut self, ctx: &mut TickContext<'_>) {
        if throttle::skip_follow_actions(ctx.settings) {
            return;
        }
        let sw = Stopwatch::new();
        self.inner.process_follow_actions();
        ctx.metrics.transform_actions_ms += sw.elapsed_ms();
    }

    /// Advanced-follow pass; half-rate, untimed.
    pub fn process_advanced_follow_actions(&mut self, ctx: &mut TickContext<'_>, dt: f32) {
        if throttle::throttle_advanced_follow(ctx.frame, ctx.settings) {
            return;
        }
        self.inner.process_advanced_follow_actions(dt);
    }

    /// Dynamic-object pass; half-rate, untimed.
    pub fn process_dynamic_object_actions(
        &mut self,
        ctx: &mut TickContext<'_>,
        group_id: i32,
        dt: f32,
    ) {
        if throttle::throttle_dynamic_objects(ctx.frame, ctx.settings) {
            return;
        }
        self.inner.process_dynamic_object_actions(group_id, dt);
    }

    /// Player-follow pass; half-rate, untimed.
    pub fn process_player_follow_actions(&mut self, ctx: &mut TickContext<'_>, dt: f32) {
        if throttle::throttle_player_follow(ctx.frame, ctx.settings) {
            return;
        }
        self.inner.process_player_follow_actions(dt);
    }

    /// Enter-effect pass; half-rate, untimed.
    pub fn update_enter_effects(&mut self, ctx: &mut TickContext<'_>, dt: f32) {
        if throttle::limit_enter_effects(ctx.frame, ctx.settings) {
            return;
        }
        self.inner.update_enter_effects(dt);
    }

    /// Gradient layer pass; one frame in three under the gradient
    /// throttle.
    pub fn update_gradient_layers(&mut self, ctx: &mut TickContext<'_>) {
        if throttle::throttle_gradients(ctx.frame, ctx.settings) {
            return;
        }
        self.inner.update_gradient_layers();
    }

    /// Spawn-group request. Counted as a spawn trigger whether or not the
    /// minimum-spacing gate lets it through.
    pub fn spawn_group(
        &mut self,
        ctx: &mut TickContext<'_>,
        group: i32,
        ordered: bool,
        delay: f32,
    ) {
        ctx.metrics.spawn_triggers += 1;
        if !throttle::permit_spawn(ctx.throttle, ctx.frame, ctx.settings) {
            trace!("spawn group {} gated at frame {}", group, ctx.frame);
            return;
        }
        self.inner.spawn_group(group, ordered, delay);
    }
}

/// Decorator around the play-mode layer.
pub struct InstrumentedPlayStage<P: PlayStage> {
    inner: P,
}

impl<P: PlayStage> InstrumentedPlayStage<P> {
    /// Wraps a play stage.
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    /// Gives the wrapped stage back.
    pub fn into_inner(self) -> P {
        self.inner
    }

    /// Camera shake; hard disable skips and counts.
    pub fn shake_camera(
        &mut self,
        ctx: &mut TickContext<'_>,
        duration: f32,
        strength: f32,
        interval: f32,
    ) {
        if throttle::skip_camera_shake(ctx.settings, ctx.metrics) {
            return;
        }
        self.inner.shake_camera(duration, strength, interval);
    }

    /// Visibility pass; timed. Disabling particles also disables the
    /// gravity-flip effect through the side channel the host exposes.
    pub fn update_visibility(&mut self, ctx: &mut TickContext<'_>, dt: f32) {
        if ctx.settings.disable_particles {
            self.inner.disable_gravity_effect();
        }
        let sw = Stopwatch::new();
        self.inner.update_visibility(dt);
        ctx.metrics.visibility_ms = sw.elapsed_ms();
    }

    /// Post-update pass; timed.
    pub fn post_update(&mut self, ctx: &mut TickContext<'_>, dt: f32) {
        let sw = Stopwatch::new();
        self.inner.post_update(dt);
        ctx.metrics.post_update_ms = sw.elapsed_ms();
    }

    /// Collision pass; timed, result passed through untouched.
    pub fn check_collisions(&mut self, ctx: &mut TickContext<'_>, dt: f32) -> i32 {
        let sw = Stopwatch::new();
        let result = self.inner.check_collisions(dt);
        ctx.metrics.collision_ms = sw.elapsed_ms();
        result
    }

    /// Camera pass; timed.
    pub fn update_camera(&mut self, ctx: &mut TickContext<'_>, dt: f32) {
        let sw = Stopwatch::new();
        self.inner.update_camera(dt);
        ctx.metrics.camera_ms = sw.elapsed_ms();
    }
}

/// Decorator around the fullscreen shader layer.
pub struct InstrumentedShaderLayer<S: ShaderStage> {
    inner: S,
}

impl<S: ShaderStage> InstrumentedShaderLayer<S> {
    /// Wraps a shader layer.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Gives the wrapped layer back.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Full visit. A hard disable zeroes the timing and runs the cheap
    /// children-only fallback exactly once instead of the shader pass.
    pub fn visit(&mut self, ctx: &mut TickContext<'_>) {
        if ctx.settings.disable_shaders {
            ctx.metrics.shader_visit_ms = 0.0;
            self.inner.visit_children_only();
            return;
        }
        let sw = Stopwatch::new();
        self.inner.visit();
        ctx.metrics.shader_visit_ms = sw.elapsed_ms();
    }

    /// Uniform calculations; timed, skipped on hard disable.
    pub fn perform_calculations(&mut self, ctx: &mut TickContext<'_>) {
        if ctx.settings.disable_shaders {
            return;
        }
        let sw = Stopwatch::new();
        self.inner.perform_calculations();
        ctx.metrics.shader_calc_ms = sw.elapsed_ms();
    }

    /// Shader setup; skipped on hard disable.
    pub fn setup_shader(&mut self, ctx: &mut TickContext<'_>, flag: bool) {
        if ctx.settings.disable_shaders {
            return;
        }
        self.inner.setup_shader(flag);
    }
}
