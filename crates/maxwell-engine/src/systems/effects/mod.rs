//! Transient visual effects: spark bursts and wiggles.
//!
//! Game logic never touches presentation nodes. It emits [`VisualEffect`]s into an
//! [`EffectSink`]; the engine's [`EffectsState`] is the sink used at runtime and turns
//! them into timed state the renderer and host page can read.

mod spark;

use glam::Vec2;
use rand::{Rng, SeedableRng};

use crate::api::game::SimRng;
use crate::core::timer::Timers;
use crate::renderer::instance::RenderBuffer;

pub use spark::Spark;

/// A transient effect requested by game logic.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualEffect {
    /// `count` sparks around `center`, each offset uniformly within `radius` on both
    /// axes, spawned `stagger` seconds apart and living `lifetime` seconds.
    SparkBurst {
        center: Vec2,
        count: u32,
        radius: f32,
        stagger: f32,
        lifetime: f32,
    },
    /// Shake a presentation element identified by `target` for `duration` seconds.
    /// Emitting it again while running restarts the clock.
    Wiggle { target: u32, duration: f32 },
}

/// Anything that accepts visual effects.
pub trait EffectSink {
    fn emit(&mut self, effect: VisualEffect);
}

/// Recording sink, handy when the effects themselves are under test.
impl EffectSink for Vec<VisualEffect> {
    fn emit(&mut self, effect: VisualEffect) {
        self.push(effect);
    }
}

#[derive(Debug, Clone, Copy)]
struct Wiggle {
    target: u32,
    remaining: f32,
}

/// Container for all running effects.
pub struct EffectsState {
    sparks: Vec<Spark>,
    pending_sparks: Timers<Spark>,
    wiggles: Vec<Wiggle>,
    rng: SimRng,
}

impl EffectsState {
    /// Create a new EffectsState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        EffectsState {
            sparks: Vec::new(),
            pending_sparks: Timers::new(),
            wiggles: Vec::new(),
            rng: SimRng::seed_from_u64(seed.wrapping_add(7919)),
        }
    }

    /// Sparks currently on screen.
    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    /// Sparks scheduled but not yet spawned.
    #[cfg(test)]
    fn pending_spark_count(&self) -> usize {
        self.pending_sparks.len()
    }

    pub fn is_wiggling(&self, target: u32) -> bool {
        self.wiggles.iter().any(|w| w.target == target)
    }

    /// Advance effects: spawn due sparks, age live ones, run wiggle clocks down.
    pub fn tick(&mut self, dt: f32) {
        self.sparks.retain_mut(|s| s.tick(dt));
        let due = self.pending_sparks.advance(dt);
        self.sparks.extend(due);
        for w in &mut self.wiggles {
            w.remaining -= dt;
        }
        self.wiggles.retain(|w| w.remaining > 0.0);
    }

    /// Append spark instances for the current frame.
    pub fn write_instances(&self, buffer: &mut RenderBuffer) {
        for spark in &self.sparks {
            buffer.push(spark.to_instance());
        }
    }

    /// Clear all effects.
    pub fn clear(&mut self) {
        self.sparks.clear();
        self.pending_sparks.clear();
        self.wiggles.clear();
    }
}

impl EffectSink for EffectsState {
    fn emit(&mut self, effect: VisualEffect) {
        match effect {
            VisualEffect::SparkBurst { center, count, radius, stagger, lifetime } => {
                for i in 0..count {
                    let offset = if radius > 0.0 {
                        Vec2::new(
                            self.rng.random_range(-radius..radius),
                            self.rng.random_range(-radius..radius),
                        )
                    } else {
                        Vec2::ZERO
                    };
                    self.pending_sparks
                        .schedule(i as f32 * stagger, Spark::new(center + offset, lifetime));
                }
            }
            VisualEffect::Wiggle { target, duration } => {
                match self.wiggles.iter_mut().find(|w| w.target == target) {
                    Some(w) => w.remaining = duration,
                    None => self.wiggles.push(Wiggle { target, remaining: duration }),
                }
            }
        }
    }
}
