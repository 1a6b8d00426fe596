use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world space, stored as top-left corner plus size
/// (Y grows downward, like the page the game is embedded in).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle with its top-left corner at `pos`.
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Point-in-rect test, edges included.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Strict horizontal overlap (touching edges do not count).
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }

    /// Strict overlap on both axes.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.bottom() > other.top() && self.top() < other.bottom()
    }

    /// Whether this rect's bottom edge lies within `tolerance` of `other`'s top edge
    /// while the two overlap horizontally, i.e. it sits on top of `other`.
    pub fn rests_on(&self, other: &Rect, tolerance: f32) -> bool {
        (self.bottom() - other.top()).abs() <= tolerance && self.overlaps_x(other)
    }

    /// Finite coordinates and a strictly positive size.
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.w, self.h].iter().all(|v| v.is_finite()) && self.w > 0.0 && self.h > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_includes_edges() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Vec2::new(10.0, 30.0)));
        assert!(r.contains(Vec2::new(20.0, 20.0)));
        assert!(!r.contains(Vec2::new(30.1, 20.0)));
    }

    #[test]
    fn overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        let crossing = Rect::new(9.0, 9.0, 10.0, 10.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&crossing));
    }

    #[test]
    fn rests_on_uses_tolerance_both_ways() {
        let table = Rect::new(0.0, 100.0, 200.0, 50.0);
        let above = Rect::new(50.0, 100.0 - 66.0 - 7.0, 48.0, 66.0);
        let sunk = Rect::new(50.0, 100.0 - 66.0 + 8.0, 48.0, 66.0);
        let far = Rect::new(50.0, 100.0 - 66.0 - 9.0, 48.0, 66.0);
        assert!(above.rests_on(&table, 8.0));
        assert!(sunk.rests_on(&table, 8.0));
        assert!(!far.rests_on(&table, 8.0));
    }

    #[test]
    fn rests_on_needs_horizontal_overlap() {
        let table = Rect::new(0.0, 100.0, 200.0, 50.0);
        let beside = Rect::new(200.0, 34.0, 48.0, 66.0);
        assert!(!beside.rests_on(&table, 8.0));
    }

    #[test]
    fn validity() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, 0.0, 1.0).is_valid());
        assert!(!Rect::new(f32::NAN, 0.0, 1.0, 1.0).is_valid());
    }

    #[test]
    fn deserializes_from_json() {
        let r: Rect = serde_json::from_str(r#"{"x":1,"y":2,"w":3,"h":4}"#).unwrap();
        assert_eq!(r, Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(r.center(), Vec2::new(2.5, 4.0));
    }
}
