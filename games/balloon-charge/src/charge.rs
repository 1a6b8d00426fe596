//! Charging by friction: rubbing a balloon in the friction zone.

use glam::Vec2;
use maxwell_engine::{EffectSink, Rect, VisualEffect};
use rand::Rng;

use crate::balloon::Balloon;
use crate::config::Tuning;
use crate::electrons;

/// Wiggle target id for the friction zone (the character's hair).
pub const FRICTION_ZONE_TARGET: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeOutcome {
    /// Point outside the zone, or no zone laid out.
    Outside,
    /// Rubbed an already charged balloon: effects only.
    Rubbed,
    /// The balloon just became charged.
    Charged,
}

/// Rub `balloon` at `point`. Inside the zone this charges it once and, on every
/// call, shakes the zone and throws a spark burst at the point.
pub fn maybe_charge<R: Rng + ?Sized>(
    balloon: &mut Balloon,
    point: Vec2,
    zone: Option<&Rect>,
    tuning: &Tuning,
    rng: &mut R,
    effects: &mut dyn EffectSink,
) -> ChargeOutcome {
    let Some(zone) = zone else {
        return ChargeOutcome::Outside;
    };
    if !zone.contains(point) {
        return ChargeOutcome::Outside;
    }

    let outcome = if balloon.charged {
        ChargeOutcome::Rubbed
    } else {
        balloon.charged = true;
        balloon.electrons = electrons::generate(rng, balloon.size);
        log::debug!("balloon {} charged", balloon.id.0);
        ChargeOutcome::Charged
    };

    effects.emit(VisualEffect::Wiggle {
        target: FRICTION_ZONE_TARGET,
        duration: tuning.wiggle_duration,
    });
    effects.emit(VisualEffect::SparkBurst {
        center: point,
        count: tuning.spark_count,
        radius: tuning.spark_radius,
        stagger: tuning.spark_stagger,
        lifetime: tuning.spark_lifetime,
    });
    outcome
}
