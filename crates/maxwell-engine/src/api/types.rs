use bytemuck::{Pod, Zeroable};

/// A game event communicated from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
/// Games define their own kind numbers.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// Event with a single payload value.
    pub fn new(kind: f32, a: f32) -> Self {
        Self { kind, a, b: 0.0, c: 0.0 }
    }

    /// Event carrying a boolean flag as 0.0 / 1.0.
    pub fn flag(kind: f32, on: bool) -> Self {
        Self::new(kind, if on { 1.0 } else { 0.0 })
    }
}
