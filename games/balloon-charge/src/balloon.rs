use glam::Vec2;
use maxwell_engine::Rect;
use serde::Serialize;

use crate::electrons::Electron;

pub const BALLOON_COUNT: usize = 4;

/// Balloon colors, indexed by `Balloon::color`.
pub const PALETTE: [u32; BALLOON_COUNT] = [0x45c2a8, 0xe85d5d, 0xf77f00, 0xfcbf49];

/// Stable balloon identity, 1-based like the labels on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BalloonId(pub u32);

impl BalloonId {
    pub fn index(self) -> usize {
        (self.0 as usize).wrapping_sub(1)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Balloon {
    pub id: BalloonId,
    /// Index into [`PALETTE`].
    pub color: usize,
    pub size: Vec2,
    /// Top-left corner.
    pub pos: Vec2,
    pub vel: Vec2,
    pub charged: bool,
    pub falling: bool,
    pub rope: f32,
    pub electrons: Vec<Electron>,
}

impl Balloon {
    pub fn new(id: BalloonId, color: usize, size: Vec2) -> Self {
        Self {
            id,
            color,
            size,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            charged: false,
            falling: false,
            rope: 0.0,
            electrons: Vec::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Put the balloon back at `pos`, uncharged and at rest.
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.charged = false;
        self.falling = false;
        self.rope = 0.0;
        self.electrons.clear();
    }
}

/// The four balloons of a session, ids 1..=4.
pub fn create_set(size: Vec2) -> Vec<Balloon> {
    (0..BALLOON_COUNT)
        .map(|i| Balloon::new(BalloonId(i as u32 + 1), i, size))
        .collect()
}

/// Reset positions: evenly spaced along the table top, 2 px above it.
pub fn home_positions(table: &Rect, size: Vec2, count: usize) -> Vec<Vec2> {
    let spacing = table.w / (count as f32 + 1.0);
    (0..count)
        .map(|i| {
            Vec2::new(
                table.x + spacing * (i as f32 + 1.0) - size.x / 2.0,
                table.top() - size.y - 2.0,
            )
        })
        .collect()
}
