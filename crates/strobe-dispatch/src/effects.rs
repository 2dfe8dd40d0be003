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

//! Wrappers for the visual-effect subsystems: particles, trails, glow,
//! effect manager, triggers, streaks, and labels.

use strobe_core::hooks::{
    EffectManager, GlowColor, LabelNode, ParticleSystem, SceneObject, Streak, TrailEffect,
    TriggerKind, TriggerObject,
};
use strobe_core::throttle::{self, ParticleVerdict};
use strobe_core::{Stopwatch, TickContext};

/// Decorator around a player trail ribbon.
pub struct InstrumentedTrailEffect<T: TrailEffect> {
    inner: T,
}

impl<T: TrailEffect> InstrumentedTrailEffect<T> {
    /// Wraps a trail effect.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Gives the wrapped effect back.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Trail snapshot; hard disable skips and counts.
    pub fn snapshot(&mut self, ctx: &mut TickContext<'_>, dt: f32) {
        if throttle::skip_trail_snapshot(ctx.settings, ctx.metrics) {
            return;
        }
        self.inner.snapshot(dt);
    }
}

/// Decorator around one particle emitter.
///
/// Call counters are bumped before any skip decision so the report can
/// relate skipped work to requested work.
pub struct InstrumentedParticleSystem<P: ParticleSystem> {
    inner: P,
}

impl<P: ParticleSystem> InstrumentedParticleSystem<P> {
    /// Wraps a particle system.
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    /// Gives the wrapped emitter back.
    pub fn into_inner(self) -> P {
        self.inner
    }

    /// Emitter update. Skips per throttle policy; a hard disable also
    /// hides the emitter node. The run path accumulates into the shared
    /// particle bucket.
    pub fn update(&mut self, ctx: &mut TickContext<'_>, dt: f32) {
        ctx.metrics.particle_update_calls += 1;
        ctx.metrics.particle_system_count += 1;

        match throttle::particle_verdict(ctx.frame, ctx.settings, ctx.metrics) {
            ParticleVerdict::SkipHidden => {
                self.inner.set_visible(false);
            }
            ParticleVerdict::Skip => {}
            ParticleVerdict::Run => {
                let sw = Stopwatch::new();
                self.inner.update(dt);
                ctx.metrics.particle_ms += sw.elapsed_ms();
            }
        }
    }

    /// Particle emission; refused outright while particles are disabled.
    pub fn add_particle(&mut self, ctx: &mut TickContext<'_>) -> bool {
        ctx.metrics.particle_add_calls += 1;
        if ctx.settings.disable_particles {
            return false;
        }
        self.inner.add_particle()
    }
}

/// Decorator around a single scene object.
pub struct InstrumentedSceneObject<O: SceneObject> {
    inner: O,
}

impl<O: SceneObject> InstrumentedSceneObject<O> {
    /// Wraps a scene object.
    pub fn new(inner: O) -> Self {
        Self { inner }
    }

    /// Gives the wrapped object back.
    pub fn into_inner(self) -> O {
        self.inner
    }

    /// Glow tint. While glow is disabled the sprite is hidden instead,
    /// counted once per suppressed tint.
    pub fn set_glow_color(&mut self, ctx: &mut TickContext<'_>, color: GlowColor) {
        if ctx.settings.disable_glow {
            if self.inner.has_glow_sprite() {
                self.inner.hide_glow();
                ctx.metrics.glows_disabled += 1;
            }
            return;
        }
        self.inner.set_glow_color(color);
    }

    /// Object activation; high-detail objects are skipped and counted
    /// while the high-detail disable is on.
    pub fn activate(&mut self, ctx: &mut TickContext<'_>) {
        if ctx.settings.disable_high_detail && self.inner.is_high_detail() {
            ctx.metrics.high_detail_skipped += 1;
            return;
        }
        self.inner.activate();
    }
}

/// Decorator around the pulse/opacity effect manager.
pub struct InstrumentedEffectManager<E: EffectManager> {
    inner: E,
}

impl<E: EffectManager> InstrumentedEffectManager<E> {
    /// Wraps an effect manager.
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    /// Gives the wrapped manager back.
    pub fn into_inner(self) -> E {
        self.inner
    }

    /// Pulse pass; timed, and the sample also feeds the combined effect
    /// total.
    pub fn update_pulse_effects(&mut self, ctx: &mut TickContext<'_>, dt: f32) {
        let sw = Stopwatch::new();
        self.inner.update_pulse_effects(dt);
        let ms = sw.elapsed_ms();
        ctx.metrics.pulse_effect_ms = ms;
        ctx.metrics.effect_ms += ms;
    }

    /// Opacity pass; skipped under the move-effects disable, otherwise
    /// timed like the pulse pass.
    pub fn update_opacity_effects(&mut self, ctx: &mut TickContext<'_>, dt: f32) {
        if ctx.settings.disable_move_effects {
            return;
        }
        let sw = Stopwatch::new();
        self.inner.update_opacity_effects(dt);
        let ms = sw.elapsed_ms();
        ctx.metrics.opacity_effect_ms = ms;
        ctx.metrics.effect_ms += ms;
    }
}

/// Decorator around a level trigger.
pub struct InstrumentedTrigger<T: TriggerObject> {
    inner: T,
}

impl<T: TriggerObject> InstrumentedTrigger<T> {
    /// Wraps a trigger.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Gives the wrapped trigger back.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Trigger activation. The total and the per-kind counter are bumped
    /// before the skip decision; shake and pulse triggers honor their
    /// hard disables.
    pub fn activate(&mut self, ctx: &mut TickContext<'_>, x_pos: f32) {
        ctx.metrics.triggers_activated += 1;

        match self.inner.kind() {
            TriggerKind::Shake => {
                ctx.metrics.shake_triggers += 1;
                if ctx.settings.disable_shake {
                    return;
                }
            }
            TriggerKind::Pulse => {
                ctx.metrics.pulse_triggers += 1;
                if ctx.settings.disable_pulse {
                    return;
                }
            }
            TriggerKind::Move => {
                ctx.metrics.move_triggers += 1;
            }
            TriggerKind::Spawn => {
                ctx.metrics.spawn_triggers += 1;
            }
            TriggerKind::Other => {}
        }

        self.inner.activate(x_pos);
    }
}

/// Decorator around a wave-trail streak.
pub struct InstrumentedStreak<S: Streak> {
    inner: S,
}

impl<S: Streak> InstrumentedStreak<S> {
    /// Wraps a streak.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Gives the wrapped streak back.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Stroke update; half-rate under the wave-trail throttle.
    pub fn update_stroke(&mut self, ctx: &mut TickContext<'_>, dt: f32) {
        if throttle::reduce_wave_trail(ctx.frame, ctx.settings) {
            return;
        }
        self.inner.update_stroke(dt);
    }
}

/// Decorator around an animated label node.
pub struct InstrumentedLabelNode<L: LabelNode> {
    inner: L,
}

impl<L: LabelNode> InstrumentedLabelNode<L> {
    /// Wraps a label node.
    pub fn new(inner: L) -> Self {
        Self { inner }
    }

    /// Gives the wrapped node back.
    pub fn into_inner(self) -> L {
        self.inner
    }

    /// Label animation; one frame in five under the label throttle.
    pub fn update_label(&mut self, ctx: &mut TickContext<'_>, dt: f32) {
        if throttle::throttle_labels(ctx.frame, ctx.settings) {
            return;
        }
        self.inner.update_label(dt);
    }
}
