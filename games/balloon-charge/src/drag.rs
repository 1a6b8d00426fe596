//! Pointer dragging: one balloon at a time.

use glam::Vec2;
use maxwell_engine::Rect;

use crate::balloon::{Balloon, BalloonId};

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    id: BalloonId,
    /// Pointer position relative to the balloon's top-left when grabbed.
    offset: Vec2,
}

/// Tracks the balloon under the pointer, if any.
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<ActiveDrag>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<BalloonId> {
        self.active.map(|d| d.id)
    }

    /// Grab `balloon` at `pointer`. A drag already in progress is dropped and its
    /// id returned.
    pub fn begin(&mut self, balloon: &mut Balloon, pointer: Vec2) -> Option<BalloonId> {
        let previous = self.target().filter(|id| *id != balloon.id);
        self.active = Some(ActiveDrag {
            id: balloon.id,
            offset: pointer - balloon.pos,
        });
        balloon.vel = Vec2::ZERO;
        balloon.rope = 0.0;
        previous
    }

    /// Where the dragged balloon goes for this pointer position. `None` unless
    /// `id` is being dragged.
    pub fn position_for(&self, id: BalloonId, pointer: Vec2) -> Option<Vec2> {
        self.active
            .filter(|d| d.id == id)
            .map(|d| pointer - d.offset)
    }

    /// Release `id` at `pointer`. Returns the final position, or `None` when
    /// `id` was not being dragged.
    pub fn end(&mut self, id: BalloonId, pointer: Vec2) -> Option<Vec2> {
        let pos = self.position_for(id, pointer)?;
        self.active = None;
        Some(pos)
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }
}

/// Landing after a release: a balloon whose bottom edge is within `tolerance`
/// of the table top and that overlaps it horizontally is snapped onto the table
/// at rest. Anything else starts falling from rest.
///
/// Returns true when the balloon was placed on the table.
pub fn land(balloon: &mut Balloon, table: Option<&Rect>, tolerance: f32) -> bool {
    balloon.vel = Vec2::ZERO;
    match table {
        Some(table) if balloon.rect().rests_on(table, tolerance) => {
            balloon.pos.y = table.top() - balloon.size.y;
            balloon.falling = false;
            true
        }
        _ => {
            balloon.falling = true;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balloon(id: u32, x: f32, y: f32) -> Balloon {
        let mut b = Balloon::new(BalloonId(id), 0, Vec2::new(48.0, 66.0));
        b.pos = Vec2::new(x, y);
        b
    }

    #[test]
    fn offset_is_kept_while_moving() {
        let mut drag = DragController::new();
        let mut b = balloon(1, 100.0, 100.0);
        b.vel = Vec2::new(2.0, 2.0);
        b.rope = 4.0;
        drag.begin(&mut b, Vec2::new(110.0, 120.0));
        assert_eq!(b.vel, Vec2::ZERO);
        assert_eq!(b.rope, 0.0);
        assert_eq!(drag.position_for(BalloonId(1), Vec2::new(210.0, 20.0)), Some(Vec2::new(200.0, 0.0)));
        // unconstrained
        assert_eq!(drag.position_for(BalloonId(1), Vec2::new(-500.0, -500.0)), Some(Vec2::new(-510.0, -520.0)));
    }

    #[test]
    fn moves_for_other_ids_are_ignored() {
        let mut drag = DragController::new();
        let mut b = balloon(1, 0.0, 0.0);
        drag.begin(&mut b, Vec2::ZERO);
        assert_eq!(drag.position_for(BalloonId(2), Vec2::ONE), None);
        assert_eq!(drag.end(BalloonId(2), Vec2::ONE), None);
        assert_eq!(drag.target(), Some(BalloonId(1)));
    }

    #[test]
    fn last_pointer_down_wins() {
        let mut drag = DragController::new();
        let mut a = balloon(1, 0.0, 0.0);
        let mut b = balloon(2, 100.0, 0.0);
        assert_eq!(drag.begin(&mut a, Vec2::ZERO), None);
        assert_eq!(drag.begin(&mut b, Vec2::new(100.0, 0.0)), Some(BalloonId(1)));
        assert_eq!(drag.target(), Some(BalloonId(2)));
    }

    #[test]
    fn end_clears_target() {
        let mut drag = DragController::new();
        let mut b = balloon(3, 0.0, 0.0);
        drag.begin(&mut b, Vec2::new(5.0, 5.0));
        assert_eq!(drag.end(BalloonId(3), Vec2::new(15.0, 25.0)), Some(Vec2::new(10.0, 20.0)));
        assert_eq!(drag.target(), None);
        assert_eq!(drag.end(BalloonId(3), Vec2::ZERO), None);
    }

    #[test]
    fn drop_near_table_top_snaps() {
        let table = Rect::new(0.0, 500.0, 400.0, 100.0);
        // bottom edge 7 px above the table top
        let mut b = balloon(1, 50.0, 500.0 - 66.0 - 7.0);
        b.vel = Vec2::new(1.0, 1.0);
        assert!(land(&mut b, Some(&table), 8.0));
        assert_eq!(b.pos.y, 500.0 - 66.0);
        assert_eq!(b.vel, Vec2::ZERO);
        assert!(!b.falling);
    }

    #[test]
    fn drop_elsewhere_falls() {
        let table = Rect::new(0.0, 500.0, 400.0, 100.0);
        let mut high = balloon(1, 50.0, 300.0);
        assert!(!land(&mut high, Some(&table), 8.0));
        assert!(high.falling);
        assert_eq!(high.pos.y, 300.0);

        let mut beside = balloon(2, 420.0, 500.0 - 66.0);
        assert!(!land(&mut beside, Some(&table), 8.0));

        let mut no_table = balloon(3, 50.0, 500.0 - 66.0);
        assert!(!land(&mut no_table, None, 8.0));
        assert!(no_table.falling);
    }
}
