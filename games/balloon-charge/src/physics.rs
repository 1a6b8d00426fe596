//! Per-frame balloon motion: gravity, electric wind, pairwise repulsion,
//! landing on the table, containment, air friction, rope sway and electron orbits.
//!
//! All quantities are per frame. The stepper keeps its own frame counter, which
//! phases the wind and rope wobble so that each balloon's wobble is a pure
//! function of the frame number and its id.

use glam::Vec2;
use maxwell_engine::Rect;
use rand::Rng;

use crate::balloon::{Balloon, BalloonId};
use crate::config::Tuning;
use crate::electrons;

/// What the stepper needs to know about the scene this frame.
#[derive(Debug, Clone, Copy)]
pub struct StepEnv<'a> {
    pub table: Option<&'a Rect>,
    pub area: &'a Rect,
    pub dragging: Option<BalloonId>,
    /// After a win nothing moves; ropes and electrons still animate.
    pub frozen: bool,
}

#[derive(Debug, Default)]
pub struct PhysicsStepper {
    frame: u64,
}

impl PhysicsStepper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance every balloon one frame. Without a table there is nothing to
    /// collide with yet, so the step is skipped and false returned.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        balloons: &mut [Balloon],
        env: &StepEnv,
        tuning: &Tuning,
        rng: &mut R,
    ) -> bool {
        let Some(table) = env.table else {
            return false;
        };

        let forces = repulsion_forces(balloons, tuning);
        let t = self.frame as f32;

        for (balloon, force) in balloons.iter_mut().zip(forces) {
            if env.frozen || env.dragging == Some(balloon.id) {
                settle_rope(balloon, tuning);
            } else {
                integrate(balloon, force, t, table, env.area, tuning);
                sway_rope(balloon, t, tuning);
            }
            advance_electrons(balloon, rng);
        }

        self.frame += 1;
        true
    }
}

/// Pairwise repulsion between charged balloons, one force per balloon.
/// Each pair contributes equal and opposite forces of magnitude
/// `min(max_step, k / d²)`, with `d²` softened so coincident balloons stay finite.
pub fn repulsion_forces(balloons: &[Balloon], tuning: &Tuning) -> Vec<Vec2> {
    let mut forces = vec![Vec2::ZERO; balloons.len()];
    for i in 0..balloons.len() {
        if !balloons[i].charged {
            continue;
        }
        for j in (i + 1)..balloons.len() {
            if !balloons[j].charged {
                continue;
            }
            let delta = balloons[i].pos - balloons[j].pos;
            let d2 = delta.length_squared() + tuning.repel_softening;
            let d = d2.sqrt();
            let f = (tuning.repel_k / d2).min(tuning.repel_max_step);
            let push = delta / d * f;
            forces[i] += push;
            forces[j] -= push;
        }
    }
    forces
}

fn integrate(balloon: &mut Balloon, force: Vec2, t: f32, table: &Rect, area: &Rect, tuning: &Tuning) {
    let id = balloon.id.0 as f32;

    balloon.vel.y += if balloon.charged { tuning.gravity_charged } else { tuning.gravity };
    if balloon.charged {
        balloon.vel.x += tuning.wind_x * (t * 0.12 + id * 1.7).cos();
        balloon.vel.y -= tuning.wind_y * (t * 0.15 + id * 2.1).sin();
        balloon.vel += force;
    }

    let prev_bottom = balloon.bottom();
    balloon.pos += balloon.vel;

    let supported = land_on_top(balloon, prev_bottom, table, tuning) || contain(balloon, table, area, tuning);

    balloon.vel *= tuning.air_friction;
    balloon.falling = !supported;
}

/// A descending balloon whose bottom edge crossed into the band at the table top
/// this frame comes to rest on it.
fn land_on_top(balloon: &mut Balloon, prev_bottom: f32, table: &Rect, tuning: &Tuning) -> bool {
    if balloon.vel.y <= 0.0 || !balloon.rect().overlaps_x(table) {
        return false;
    }
    let top = table.top();
    if prev_bottom > top + tuning.landing_band || balloon.bottom() < top {
        return false;
    }
    if balloon.falling {
        log::debug!("balloon {} landed on the table", balloon.id.0);
    }
    balloon.pos.y = top - balloon.size.y;
    balloon.vel.y = 0.0;
    balloon.vel.x *= tuning.landing_damping;
    true
}

/// Keep the balloon inside the table's interior when it is in there, otherwise
/// inside the interaction area (which has no ceiling). Returns true when it rests
/// on the floor.
fn contain(balloon: &mut Balloon, table: &Rect, area: &Rect, tuning: &Tuning) -> bool {
    let inside_table = table.contains(balloon.center());
    let bounds = if inside_table { table } else { area };
    let size = balloon.size;

    let min_x = bounds.left();
    let max_x = bounds.right() - size.x;
    let max_y = bounds.bottom() - size.y;
    let mut resting = false;

    if balloon.pos.y >= max_y {
        balloon.pos.y = max_y;
        balloon.vel.y = -balloon.vel.y * tuning.floor_bounce;
        if balloon.vel.y.abs() < tuning.rest_speed_y {
            balloon.vel.y = 0.0;
        }
        if balloon.vel.x.abs() < tuning.rest_speed_x {
            balloon.vel.x = 0.0;
        }
        resting = balloon.vel.y == 0.0;
    }

    if balloon.pos.x <= min_x {
        balloon.pos.x = min_x;
        balloon.vel.x = -balloon.vel.x * tuning.wall_bounce;
    }
    if balloon.pos.x >= max_x {
        balloon.pos.x = max_x;
        balloon.vel.x = -balloon.vel.x * tuning.wall_bounce;
    }

    if inside_table && balloon.pos.y < bounds.top() {
        balloon.pos.y = bounds.top();
        balloon.vel.y = -balloon.vel.y * tuning.floor_bounce;
    }

    resting
}

fn sway_rope(balloon: &mut Balloon, t: f32, tuning: &Tuning) {
    let id = balloon.id.0 as f32;
    let target = (-0.9 * balloon.vel.x + 1.2 * (t * 0.08 + id).sin()).clamp(-tuning.rope_max, tuning.rope_max);
    balloon.rope += (target - balloon.rope) * tuning.rope_smoothing;
}

fn settle_rope(balloon: &mut Balloon, tuning: &Tuning) {
    let target = (-0.6 * balloon.vel.x).clamp(-tuning.rope_held_max, tuning.rope_held_max);
    balloon.rope += (target - balloon.rope) * tuning.rope_held_smoothing;
}

fn advance_electrons<R: Rng + ?Sized>(balloon: &mut Balloon, rng: &mut R) {
    if !balloon.charged {
        return;
    }
    if balloon.electrons.is_empty() {
        balloon.electrons = electrons::generate(rng, balloon.size);
    }
    for electron in &mut balloon.electrons {
        electron.advance(balloon.size);
    }
}
