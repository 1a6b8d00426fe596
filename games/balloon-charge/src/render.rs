//! Writes the session into the engine's render buffers.
//!
//! Instances: paper fragments, then balloons, then their electrons (sparks are
//! appended by the engine). Vectors: tables, the friction zone outline and ropes.

use glam::Vec2;
use maxwell_engine::{InstanceKind, RenderBuffer, RenderContext, RenderInstance};
#[cfg(feature = "vectors")]
use maxwell_engine::VectorState;

use crate::papers::FRAGMENT_SIZE;
use crate::session::Session;

#[cfg(feature = "vectors")]
mod colors {
    use maxwell_engine::VectorColor;

    pub const TABLE: VectorColor = VectorColor::hex(0xb45309);
    pub const PAPER_TABLE: VectorColor = VectorColor::hex(0x92400e);
    pub const TABLE_LEG: VectorColor = VectorColor::hex(0x78350f);
    pub const FRICTION_ZONE: VectorColor = VectorColor::hex(0xfde047);
    pub const ROPE: VectorColor = VectorColor::hex(0x1f2937);
    pub const KNOT: VectorColor = VectorColor::hex(0x111827);
}

pub fn draw(session: &Session, ctx: &mut RenderContext) {
    write_instances(session, ctx.render_buffer);
    #[cfg(feature = "vectors")]
    write_vectors(session, ctx.vectors);
}

fn write_instances(session: &Session, buffer: &mut RenderBuffer) {
    for fragment in session.papers().fragments() {
        let t = fragment.transform;
        let center = fragment.home + t.translate;
        let size = FRAGMENT_SIZE * t.scale;
        buffer.push(
            RenderInstance::new(InstanceKind::Fragment, center.x, center.y, size, size)
                .with_param(t.rotation)
                .with_glow(fragment.transition),
        );
    }

    for balloon in session.balloons() {
        let c = balloon.center();
        buffer.push(
            RenderInstance::new(InstanceKind::Body, c.x, c.y, balloon.size.x, balloon.size.y)
                .with_param(balloon.rope)
                .with_tint(balloon.color as f32)
                .with_glow(if balloon.charged { 1.0 } else { 0.0 }),
        );
    }

    for balloon in session.balloons().iter().filter(|b| b.charged) {
        for electron in &balloon.electrons {
            let p = balloon.pos + electron.offset;
            buffer.push(
                RenderInstance::new(InstanceKind::Particle, p.x, p.y, electron.size, electron.size)
                    .with_glow(1.0),
            );
        }
    }
}

/// Rope control points: hangs from the bottom of the balloon and swings by `rope`.
pub fn rope_curve(pos: Vec2, size: Vec2, rope: f32, length: f32) -> [Vec2; 3] {
    let from = Vec2::new(pos.x + size.x / 2.0, pos.y + size.y - 2.0);
    let to = from + Vec2::new(rope, length);
    let ctrl = Vec2::new((from.x + to.x) / 2.0 + rope * 0.35, from.y + length * 0.55);
    [from, ctrl, to]
}

#[cfg(feature = "vectors")]
fn write_vectors(session: &Session, vectors: &mut VectorState) {
    let layout = session.layout();

    if let Some(table) = layout.table {
        vectors.fill_rounded_rect(table.pos(), table.w, table.h, 10.0, colors::TABLE);
    }
    if let Some(table) = layout.paper_table {
        vectors.fill_rounded_rect(table.pos(), table.w, table.h, 8.0, colors::PAPER_TABLE);
        let leg_h = 40.0;
        vectors.fill_rect(Vec2::new(table.left() + 20.0, table.bottom()), 8.0, leg_h, colors::TABLE_LEG);
        vectors.fill_rect(Vec2::new(table.right() - 28.0, table.bottom()), 8.0, leg_h, colors::TABLE_LEG);
    }
    if let Some(zone) = layout.friction_zone {
        vectors.stroke_rounded_rect(zone.pos(), zone.w, zone.h, 12.0, 2.0, colors::FRICTION_ZONE.with_alpha(0.6));
    }

    let length = session.tuning().rope_length;
    for balloon in session.balloons() {
        let [from, ctrl, to] = rope_curve(balloon.pos, balloon.size, balloon.rope, length);
        vectors.stroke_quadratic(from, ctrl, to, 2.0, colors::ROPE);
        vectors.fill_circle(to, 2.1, colors::KNOT);
    }
}
