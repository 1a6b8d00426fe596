use bytemuck::{Pod, Zeroable};

/// What a render instance depicts. The host renderer switches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InstanceKind {
    /// A draggable body (balloon).
    Body = 0,
    /// A decorative particle drawn inside a body (electron).
    Particle = 1,
    /// A short-lived spark.
    Spark = 2,
    /// A light fragment that can be pulled around (paper scrap).
    Fragment = 3,
}

/// Per-instance render data read by the host renderer through a raw pointer.
/// 8 floats = 32 bytes stride.
///
/// `x`/`y` are the instance center in world space. `param`, `tint` and `glow`
/// are interpreted per kind:
/// - Body: `param` = rope sway, `tint` = palette index, `glow` = 1.0 when charged.
/// - Particle: `glow` = opacity.
/// - Spark: `param` = growth factor, `glow` = remaining opacity.
/// - Fragment: `param` = rotation in degrees, `glow` = transition seconds.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct RenderInstance {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub param: f32,
    pub tint: f32,
    pub glow: f32,
    pub kind: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(kind: InstanceKind, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind: kind as u8 as f32,
            ..Self::default()
        }
    }

    pub fn with_param(mut self, param: f32) -> Self {
        self.param = param;
        self
    }

    pub fn with_tint(mut self, tint: f32) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_glow(mut self, glow: f32) -> Self {
        self.glow = glow;
        self
    }

    pub fn is(&self, kind: InstanceKind) -> bool {
        self.kind == kind as u8 as f32
    }
}

/// Render buffer containing all instances for the current frame, in draw order.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    capacity: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Push an instance. Instances past the configured capacity are dropped,
    /// since the host only reserved that much shared memory.
    pub fn push(&mut self, instance: RenderInstance) {
        if self.instances.len() < self.capacity {
            self.instances.push(instance);
        }
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    #[cfg(test)]
    fn count_of(&self, kind: InstanceKind) -> usize {
        self.instances.iter().filter(|i| i.is(kind)).count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raw pointer to instance data for the host renderer.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
