//! Scene layout and tuning constants, loadable from the host page as JSON.

use glam::Vec2;
use maxwell_engine::Rect;
use serde::{Deserialize, Serialize};

/// World size the default layout is drawn for.
pub const WORLD_W: f32 = 1200.0;
pub const WORLD_H: f32 = 700.0;

/// Errors from [`GameSetup::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid setup JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("rect `{name}` needs finite coordinates and a positive size")]
    InvalidRect { name: &'static str },
    #[error("tuning value `{field}` is not finite")]
    NonFinite { field: &'static str },
    #[error("tuning value `{field}` must be positive")]
    NonPositive { field: &'static str },
    #[error("tuning value `{field}` must not be negative")]
    Negative { field: &'static str },
    #[error("tuning value `{field}` is outside {min}..={max}")]
    OutOfRange { field: &'static str, min: f32, max: f32 },
}

/// Upper bound on sparks per burst.
pub const MAX_SPARK_COUNT: u32 = 64;

/// Every physics and effect constant of the game.
///
/// Velocities are in px per frame and accelerations in px per frame squared;
/// the engine steps at a fixed 60 Hz so these match what the page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub balloon_width: f32,
    pub balloon_height: f32,
    pub rope_length: f32,

    pub gravity: f32,
    pub gravity_charged: f32,
    pub floor_bounce: f32,
    pub wall_bounce: f32,
    pub air_friction: f32,
    /// Below these speeds a floor contact comes to rest.
    pub rest_speed_y: f32,
    pub rest_speed_x: f32,

    pub repel_k: f32,
    pub repel_max_step: f32,
    pub repel_softening: f32,
    pub wind_x: f32,
    pub wind_y: f32,

    /// Depth of the band at the table top that catches a falling balloon.
    pub landing_band: f32,
    pub landing_damping: f32,
    /// How close to the table top a released balloon snaps onto it.
    pub drop_tolerance: f32,

    pub rope_max: f32,
    pub rope_smoothing: f32,
    pub rope_held_max: f32,
    pub rope_held_smoothing: f32,

    pub paper_radius: f32,
    pub paper_max_pull: f32,
    pub paper_smoothing: f32,
    /// Degrees.
    pub paper_max_rotation: f32,
    pub paper_max_scale: f32,
    pub paper_jitter: f32,

    pub spark_count: u32,
    pub spark_radius: f32,
    pub spark_stagger: f32,
    pub spark_lifetime: f32,
    pub wiggle_duration: f32,

    pub win_delay: f32,
    pub intro_delay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            balloon_width: 48.0,
            balloon_height: 66.0,
            rope_length: 26.0,

            gravity: 0.55,
            gravity_charged: 0.38,
            floor_bounce: 0.2,
            wall_bounce: 0.25,
            air_friction: 0.995,
            rest_speed_y: 0.7,
            rest_speed_x: 0.1,

            repel_k: 900.0,
            repel_max_step: 0.45,
            repel_softening: 60.0,
            wind_x: 0.02,
            wind_y: 0.015,

            landing_band: 10.0,
            landing_damping: 0.82,
            drop_tolerance: 8.0,

            rope_max: 14.0,
            rope_smoothing: 0.15,
            rope_held_max: 10.0,
            rope_held_smoothing: 0.2,

            paper_radius: 180.0,
            paper_max_pull: 70.0,
            paper_smoothing: 0.35,
            paper_max_rotation: 18.0,
            paper_max_scale: 1.15,
            paper_jitter: 10.0,

            spark_count: 8,
            spark_radius: 12.0,
            spark_stagger: 0.08,
            spark_lifetime: 0.5,
            wiggle_duration: 0.52,

            win_delay: 1.2,
            intro_delay: 0.05,
        }
    }
}

impl Tuning {
    pub fn balloon_size(&self) -> Vec2 {
        Vec2::new(self.balloon_width, self.balloon_height)
    }

    fn values(&self) -> [(&'static str, f32); 34] {
        [
            ("balloon_width", self.balloon_width),
            ("balloon_height", self.balloon_height),
            ("rope_length", self.rope_length),
            ("gravity", self.gravity),
            ("gravity_charged", self.gravity_charged),
            ("floor_bounce", self.floor_bounce),
            ("wall_bounce", self.wall_bounce),
            ("air_friction", self.air_friction),
            ("rest_speed_y", self.rest_speed_y),
            ("rest_speed_x", self.rest_speed_x),
            ("repel_k", self.repel_k),
            ("repel_max_step", self.repel_max_step),
            ("repel_softening", self.repel_softening),
            ("wind_x", self.wind_x),
            ("wind_y", self.wind_y),
            ("landing_band", self.landing_band),
            ("landing_damping", self.landing_damping),
            ("drop_tolerance", self.drop_tolerance),
            ("rope_max", self.rope_max),
            ("rope_smoothing", self.rope_smoothing),
            ("rope_held_max", self.rope_held_max),
            ("rope_held_smoothing", self.rope_held_smoothing),
            ("paper_radius", self.paper_radius),
            ("paper_max_pull", self.paper_max_pull),
            ("paper_smoothing", self.paper_smoothing),
            ("paper_max_rotation", self.paper_max_rotation),
            ("paper_max_scale", self.paper_max_scale),
            ("paper_jitter", self.paper_jitter),
            ("spark_radius", self.spark_radius),
            ("spark_stagger", self.spark_stagger),
            ("spark_lifetime", self.spark_lifetime),
            ("wiggle_duration", self.wiggle_duration),
            ("win_delay", self.win_delay),
            ("intro_delay", self.intro_delay),
        ]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.values() {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        let positive = [
            ("balloon_width", self.balloon_width),
            ("balloon_height", self.balloon_height),
            ("paper_radius", self.paper_radius),
            ("repel_softening", self.repel_softening),
            ("air_friction", self.air_friction),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field });
            }
        }
        let non_negative = [
            ("repel_max_step", self.repel_max_step),
            ("rope_max", self.rope_max),
            ("rope_held_max", self.rope_held_max),
            ("paper_max_pull", self.paper_max_pull),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field });
            }
        }
        if self.air_friction > 1.0 {
            return Err(ConfigError::OutOfRange { field: "air_friction", min: 0.0, max: 1.0 });
        }
        if self.spark_count > MAX_SPARK_COUNT {
            return Err(ConfigError::OutOfRange {
                field: "spark_count",
                min: 0.0,
                max: MAX_SPARK_COUNT as f32,
            });
        }
        Ok(())
    }
}

/// Where things are in the world. Zones are optional: an absent zone turns the
/// operations that need it into no-ops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Region the balloons live in. Balloons off the table fall to its floor.
    pub area: Rect,
    pub table: Option<Rect>,
    /// Rubbing region (the character's hair).
    pub friction_zone: Option<Rect>,
    pub paper_table: Option<Rect>,
    /// Explicit paper fragment centers. Defaults to a block on the paper table.
    pub fragments: Option<Vec<Vec2>>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            area: Rect::new(0.0, 300.0, WORLD_W, 400.0),
            table: Some(Rect::new(48.0, 480.0, 1104.0, 110.0)),
            friction_zone: Some(Rect::new(160.0, 50.0, 130.0, 90.0)),
            paper_table: Some(Rect::new(726.0, 160.0, 450.0, 100.0)),
            fragments: None,
        }
    }
}

impl Layout {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.area.is_valid() {
            return Err(ConfigError::InvalidRect { name: "area" });
        }
        let zones = [
            ("table", self.table),
            ("friction_zone", self.friction_zone),
            ("paper_table", self.paper_table),
        ];
        for (name, zone) in zones {
            if zone.is_some_and(|r| !r.is_valid()) {
                return Err(ConfigError::InvalidRect { name });
            }
        }
        let bad_fragment = self
            .fragments
            .as_ref()
            .is_some_and(|f| f.iter().any(|p| !p.is_finite()));
        if bad_fragment {
            return Err(ConfigError::NonFinite { field: "fragments" });
        }
        Ok(())
    }
}

/// The document accepted by `game_configure`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSetup {
    pub layout: Layout,
    pub tuning: Tuning,
}

impl GameSetup {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let setup: GameSetup = serde_json::from_str(json)?;
        setup.layout.validate()?;
        setup.tuning.validate()?;
        Ok(setup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default_setup() {
        let setup = GameSetup::from_json("{}").unwrap();
        assert_eq!(setup, GameSetup::default());
        assert_eq!(setup.tuning.balloon_width, 48.0);
        assert_eq!(setup.tuning.win_delay, 1.2);
    }

    #[test]
    fn partial_tuning_keeps_other_defaults() {
        let setup = GameSetup::from_json(r#"{"tuning":{"paper_radius":120}}"#).unwrap();
        assert_eq!(setup.tuning.paper_radius, 120.0);
        assert_eq!(setup.tuning.paper_max_pull, 70.0);
    }

    #[test]
    fn null_zone_removes_it() {
        let setup = GameSetup::from_json(r#"{"layout":{"friction_zone":null}}"#).unwrap();
        assert!(setup.layout.friction_zone.is_none());
        assert!(setup.layout.table.is_some());
    }

    #[test]
    fn explicit_fragments_parse_as_pairs() {
        let setup = GameSetup::from_json(r#"{"layout":{"fragments":[[1,2],[3,4]]}}"#).unwrap();
        let fragments = setup.layout.fragments.unwrap();
        assert_eq!(fragments, vec![Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)]);
    }

    #[test]
    fn rejects_degenerate_rect() {
        let err = GameSetup::from_json(r#"{"layout":{"table":{"x":0,"y":0,"w":0,"h":10}}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRect { name: "table" }));
    }

    #[test]
    fn rejects_non_positive_size() {
        let err = GameSetup::from_json(r#"{"tuning":{"balloon_height":-1}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "balloon_height" }));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = GameSetup::from_json("{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid setup JSON"));
    }

    #[test]
    fn rejects_negative_limits() {
        for field in ["repel_max_step", "rope_max", "rope_held_max", "paper_max_pull"] {
            let json = format!(r#"{{"tuning":{{"{field}":-1}}}}"#);
            let err = GameSetup::from_json(&json).unwrap_err();
            assert!(matches!(err, ConfigError::Negative { field: f } if f == field), "{field}: {err}");
        }
        let zero_pull = GameSetup::from_json(r#"{"tuning":{"paper_max_pull":0,"rope_max":0}}"#);
        assert!(zero_pull.is_ok());
    }

    #[test]
    fn softening_must_be_positive() {
        for value in ["0", "-3"] {
            let json = format!(r#"{{"tuning":{{"repel_softening":{value}}}}}"#);
            let err = GameSetup::from_json(&json).unwrap_err();
            assert!(matches!(err, ConfigError::NonPositive { field: "repel_softening" }));
        }
    }

    #[test]
    fn air_friction_is_a_fraction() {
        let err = GameSetup::from_json(r#"{"tuning":{"air_friction":0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "air_friction" }));
        let err = GameSetup::from_json(r#"{"tuning":{"air_friction":1.5}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "air_friction", .. }));
        assert!(GameSetup::from_json(r#"{"tuning":{"air_friction":1}}"#).is_ok());
    }

    #[test]
    fn spark_count_is_capped() {
        let err = GameSetup::from_json(r#"{"tuning":{"spark_count":4000000000}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "spark_count", .. }));
        let json = format!(r#"{{"tuning":{{"spark_count":{MAX_SPARK_COUNT}}}}}"#);
        assert!(GameSetup::from_json(&json).is_ok());
    }

    #[test]
    fn non_finite_is_reported() {
        let tuning = Tuning { gravity: f32::NAN, ..Tuning::default() };
        assert!(matches!(tuning.validate(), Err(ConfigError::NonFinite { field: "gravity" })));
    }
}
