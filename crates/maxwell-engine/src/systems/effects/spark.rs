//! Short-lived spark particles.

use glam::Vec2;

use crate::renderer::instance::{InstanceKind, RenderInstance};

/// A spark that fades out and grows to twice its size over its lifetime,
/// then removes itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Spark {
    pub position: Vec2,
    pub size: f32,
    pub lifetime: f32,
    pub age: f32,
}

impl Spark {
    pub const DEFAULT_SIZE: f32 = 4.0;

    pub fn new(position: Vec2, lifetime: f32) -> Self {
        Spark {
            position,
            size: Self::DEFAULT_SIZE,
            lifetime,
            age: 0.0,
        }
    }

    /// Advance the spark. Returns false when expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.age += dt;
        self.age < self.lifetime
    }

    /// Fraction of life completed, 0.0 (new) to 1.0 (expired).
    pub fn progress(&self) -> f32 {
        if self.lifetime <= 0.0 {
            return 1.0;
        }
        (self.age / self.lifetime).clamp(0.0, 1.0)
    }

    pub fn opacity(&self) -> f32 {
        1.0 - self.progress()
    }

    pub fn growth(&self) -> f32 {
        1.0 + self.progress()
    }

    pub fn to_instance(&self) -> RenderInstance {
        let size = self.size * self.growth();
        RenderInstance::new(InstanceKind::Spark, self.position.x, self.position.y, size, size)
            .with_param(self.growth())
            .with_glow(self.opacity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spark_expires() {
        let mut s = Spark::new(Vec2::ZERO, 0.5);
        assert!(s.tick(0.3));
        assert!(!s.tick(0.3), "spark should expire after its lifetime");
    }

    #[test]
    fn spark_fades_and_grows() {
        let mut s = Spark::new(Vec2::ZERO, 0.5);
        s.tick(0.25);
        assert!((s.opacity() - 0.5).abs() < 1e-5);
        assert!((s.growth() - 1.5).abs() < 1e-5);
    }

    #[test]
    fn spark_instance_carries_opacity() {
        let s = Spark::new(Vec2::new(5.0, 6.0), 0.5);
        let inst = s.to_instance();
        assert!(inst.is(InstanceKind::Spark));
        assert_eq!(inst.glow, 1.0);
        assert_eq!(inst.x, 5.0);
    }
}
