//! Decorative electrons orbiting inside a charged balloon.

use std::f32::consts::TAU;
use std::ops::RangeInclusive;

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

pub const COUNT: RangeInclusive<usize> = 14..=19;
/// Orbit extents as fractions of the balloon's width and height.
pub const ORBIT_X: f32 = 0.32;
pub const ORBIT_Y: f32 = 0.38;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Electron {
    /// Radians.
    pub angle: f32,
    /// Fraction of the orbit extents, 0.35..0.95.
    pub radius: f32,
    /// Signed, radians per frame.
    pub speed: f32,
    /// Pixels.
    pub size: f32,
    /// Position relative to the balloon's top-left, cached every frame.
    pub offset: Vec2,
}

impl Electron {
    /// Offset of a particle on the elliptical orbit inside a balloon of `size`.
    pub fn orbit_offset(angle: f32, radius: f32, size: Vec2) -> Vec2 {
        let extents = Vec2::new(size.x * ORBIT_X, size.y * ORBIT_Y);
        size * 0.5 + Vec2::new(angle.cos(), angle.sin()) * extents * radius
    }

    /// One frame of orbit.
    pub fn advance(&mut self, size: Vec2) {
        self.angle += self.speed;
        self.offset = Self::orbit_offset(self.angle, self.radius, size);
    }
}

/// A fresh electron set for a balloon of `size`.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, size: Vec2) -> Vec<Electron> {
    let n = rng.random_range(COUNT);
    (0..n)
        .map(|_| {
            let radius = rng.random_range(0.35..0.95);
            let angle = rng.random_range(0.0..TAU);
            let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let speed = rng.random_range(0.015..0.035) * sign;
            let size_px = rng.random_range(2.6..4.4);
            Electron {
                angle,
                radius,
                speed,
                size: size_px,
                offset: Electron::orbit_offset(angle, radius, size),
            }
        })
        .collect()
}
