//! Paper scraps on the side table that lean toward a charged balloon.
//!
//! Purely presentational: the transforms are handed to the renderer and never
//! feed back into the balloon physics.

use glam::Vec2;
use maxwell_engine::Rect;
use rand::Rng;
use serde::Serialize;

use crate::config::Tuning;

pub const FRAGMENT_COUNT: usize = 30;
pub const FRAGMENT_SIZE: f32 = 15.0;
const FRAGMENT_GAP: f32 = 4.0;
const BLOCK_WIDTH: f32 = 100.0;

/// Transition durations the renderer eases transforms over, in seconds.
pub const ATTRACT_TRANSITION: f32 = 0.18;
pub const RELEASE_TRANSITION: f32 = 0.35;

/// Visual displacement of one fragment relative to where it lies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaperTransform {
    pub translate: Vec2,
    /// Degrees.
    pub rotation: f32,
    pub scale: f32,
}

impl PaperTransform {
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        rotation: 0.0,
        scale: 1.0,
    };
}

impl Default for PaperTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Fragment {
    /// Center of the fragment at rest.
    pub home: Vec2,
    /// Per-fragment randomness in [0, 1), three decimals. Drawn once per session.
    pub seed: Option<f32>,
    pub transform: PaperTransform,
    pub transition: f32,
}

/// All fragments plus the "papers attracted" flag.
#[derive(Debug, Default)]
pub struct PaperField {
    fragments: Vec<Fragment>,
    attracted: bool,
}

impl PaperField {
    /// Fragments at explicit centers.
    pub fn new(homes: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            fragments: homes
                .into_iter()
                .map(|home| Fragment {
                    home,
                    seed: None,
                    transform: PaperTransform::IDENTITY,
                    transition: RELEASE_TRANSITION,
                })
                .collect(),
            attracted: false,
        }
    }

    /// The standard pile: rows of five in a block centered on the table's top edge.
    pub fn default_homes(paper_table: &Rect) -> Vec<Vec2> {
        let step = FRAGMENT_SIZE + FRAGMENT_GAP;
        let per_row = ((BLOCK_WIDTH + FRAGMENT_GAP) / step).floor() as usize;
        let row_width = per_row as f32 * step - FRAGMENT_GAP;
        let left = paper_table.center().x - BLOCK_WIDTH / 2.0 + (BLOCK_WIDTH - row_width) / 2.0;
        let top = paper_table.top() - 4.0;
        (0..FRAGMENT_COUNT)
            .map(|i| {
                let (row, col) = (i / per_row, i % per_row);
                Vec2::new(
                    left + col as f32 * step + FRAGMENT_SIZE / 2.0,
                    top + row as f32 * step + FRAGMENT_SIZE / 2.0,
                )
            })
            .collect()
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn is_attracted(&self) -> bool {
        self.attracted
    }

    /// Draw a seed for every fragment that lacks one.
    pub fn ensure_seeds<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for fragment in &mut self.fragments {
            if fragment.seed.is_none() {
                let raw: f32 = rng.random();
                fragment.seed = Some((raw * 1000.0).floor() / 1000.0);
            }
        }
    }

    /// Re-evaluate the pull for a balloon held at `point`.
    ///
    /// An uncharged balloon, a point outside the radius or a missing table all
    /// release the papers. Returns the attraction flag.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        charged: bool,
        point: Vec2,
        paper_table: Option<&Rect>,
        tuning: &Tuning,
        rng: &mut R,
    ) -> bool {
        let Some(table) = paper_table else {
            self.release();
            return false;
        };
        if !charged || point.distance(table.center()) >= tuning.paper_radius {
            self.release();
            return false;
        }

        self.ensure_seeds(rng);
        self.attracted = true;
        for fragment in self.fragments.iter_mut().step_by(2) {
            let seed = fragment.seed.unwrap_or(0.0);
            fragment.transform = pull(fragment.home, seed, point, tuning);
            fragment.transition = ATTRACT_TRANSITION;
        }
        true
    }

    /// Flag off, every fragment back to identity.
    pub fn release(&mut self) {
        self.attracted = false;
        for fragment in &mut self.fragments {
            fragment.transform = PaperTransform::IDENTITY;
            fragment.transition = RELEASE_TRANSITION;
        }
    }
}

fn pull(home: Vec2, seed: f32, point: Vec2, tuning: &Tuning) -> PaperTransform {
    let delta = point - home;
    let mut d = delta.length();
    if d == 0.0 {
        d = 1.0;
    }
    let closeness = 1.0 - (d / tuning.paper_radius).min(1.0);
    let strength = ((1.0 - d / tuning.paper_radius) * tuning.paper_max_pull).min(tuning.paper_max_pull);
    let shift = delta / d * strength * tuning.paper_smoothing;
    PaperTransform {
        translate: shift + Vec2::new((seed - 0.5) * tuning.paper_jitter, 0.0),
        rotation: (seed - 0.5) * tuning.paper_max_rotation,
        scale: 1.0 + closeness * (tuning.paper_max_scale - 1.0) * 0.7,
    }
}
