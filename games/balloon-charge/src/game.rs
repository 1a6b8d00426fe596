//! Balloon Charge game - thin controller layer.
//!
//! Routes input to the session, runs its clock and forwards its events to the page.

use std::error::Error;

use glam::Vec2;
use maxwell_engine::input::queue::{InputEvent, InputQueue};
use maxwell_engine::{EngineContext, Game, GameConfig, GameEvent, RenderContext};
use serde::Serialize;

use crate::balloon::Balloon;
use crate::charge::FRICTION_ZONE_TARGET;
use crate::config::{GameSetup, WORLD_H, WORLD_W};
use crate::dialog::{DialogKind, Navigation};
use crate::papers::Fragment;
use crate::render;
use crate::session::{Session, SessionEvent};

/// Custom event kinds from the page.
pub mod events {
    pub const RESET: u32 = 1;
    pub const MANUAL: u32 = 2;
    pub const EXPLANATION: u32 = 3;
    pub const DISMISS_DIALOG: u32 = 4;
}

/// Game event kinds to the page.
pub mod game_events {
    pub const CHARGED_COUNT: f32 = 1.0;
    pub const PAPERS_ATTRACTED: f32 = 2.0;
    pub const WON: f32 = 3.0;
    /// a = dialog code, 0 when closed.
    pub const DIALOG: f32 = 4.0;
    pub const NAVIGATE: f32 = 5.0;
    /// a = 1 while the friction zone wiggles.
    pub const WIGGLE: f32 = 6.0;
    pub const RESET: f32 = 7.0;
}

pub struct BalloonCharge {
    session: Session,
    wiggling: bool,
}

impl BalloonCharge {
    pub fn new() -> Self {
        Self {
            session: Session::new(GameSetup::default()),
            wiggling: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn handle_custom_event(&mut self, ctx: &mut EngineContext, kind: u32) {
        match kind {
            events::RESET => {
                ctx.effects.clear();
                self.session.reset(&mut ctx.rng);
            }
            events::MANUAL => self.session.request_manual(),
            events::EXPLANATION => self.session.request_explanation(),
            events::DISMISS_DIALOG => self.session.dismiss_dialog(),
            other => log::debug!("ignoring custom event {other}"),
        }
    }

    fn publish(&mut self, ctx: &mut EngineContext) {
        for event in self.session.drain_events() {
            let out = match event {
                SessionEvent::ChargedCount(n) => GameEvent::new(game_events::CHARGED_COUNT, n as f32),
                SessionEvent::PapersAttracted(on) => GameEvent::flag(game_events::PAPERS_ATTRACTED, on),
                SessionEvent::Won => GameEvent::new(game_events::WON, 1.0),
                SessionEvent::DialogChanged(dialog) => {
                    GameEvent::new(game_events::DIALOG, dialog.map_or(0.0, DialogKind::code))
                }
                SessionEvent::Navigate => GameEvent::new(game_events::NAVIGATE, 1.0),
                SessionEvent::Reset => GameEvent::new(game_events::RESET, 1.0),
                // surfaced through the wiggle flag below
                SessionEvent::Rubbed => continue,
            };
            ctx.emit_event(out);
        }

        let wiggling = ctx.effects.is_wiggling(FRICTION_ZONE_TARGET);
        if wiggling != self.wiggling {
            self.wiggling = wiggling;
            ctx.emit_event(GameEvent::flag(game_events::WIGGLE, wiggling));
        }
    }
}

impl Default for BalloonCharge {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for BalloonCharge {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: WORLD_W,
            world_height: WORLD_H,
            max_instances: 1024,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.session.reset(&mut ctx.rng);
        log::info!("balloon charge: {} balloons", self.session.balloons().len());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => self.session.pointer_down(Vec2::new(x, y)),
                InputEvent::PointerMove { x, y } => {
                    self.session
                        .pointer_move(Vec2::new(x, y), &mut ctx.rng, &mut ctx.effects)
                }
                InputEvent::PointerUp { x, y } => self.session.pointer_up(Vec2::new(x, y), &mut ctx.rng),
                InputEvent::Custom { kind, .. } => self.handle_custom_event(ctx, kind),
            }
        }

        self.session.step(ctx.dt, &mut ctx.rng);
        self.publish(ctx);
    }

    fn render(&self, ctx: &mut RenderContext) {
        render::draw(&self.session, ctx);
    }

    fn configure(&mut self, ctx: &mut EngineContext, json: &str) -> Result<(), Box<dyn Error>> {
        let setup = GameSetup::from_json(json)?;
        ctx.effects.clear();
        self.session.apply_setup(setup, &mut ctx.rng);
        log::info!("balloon charge reconfigured");
        Ok(())
    }

    fn snapshot_json(&self) -> String {
        serde_json::to_string(&Snapshot::of(self)).unwrap_or_else(|err| {
            log::warn!("snapshot failed: {err}");
            String::from("null")
        })
    }
}

#[derive(Serialize)]
struct DialogView {
    kind: DialogKind,
    title: &'static str,
    body: &'static str,
}

/// State the page renders outside the canvas.
#[derive(Serialize)]
struct Snapshot<'a> {
    frame: u64,
    balloons: &'a [Balloon],
    fragments: &'a [Fragment],
    charged_count: usize,
    papers_attracted: bool,
    has_won: bool,
    dragging: Option<u32>,
    dialog: Option<DialogView>,
    show_continue: bool,
    show_explanation: bool,
    navigation: Option<Navigation>,
    friction_zone_wiggling: bool,
}

impl<'a> Snapshot<'a> {
    fn of(game: &'a BalloonCharge) -> Self {
        let s = &game.session;
        Self {
            frame: s.frame(),
            balloons: s.balloons(),
            fragments: s.papers().fragments(),
            charged_count: s.charged_count(),
            papers_attracted: s.papers_attracted(),
            has_won: s.has_won(),
            dragging: s.dragging().map(|id| id.0),
            dialog: s.dialog().map(|kind| {
                let content = kind.content();
                DialogView {
                    kind,
                    title: content.title,
                    body: content.body,
                }
            }),
            show_continue: s.show_continue(),
            show_explanation: s.show_explanation(),
            navigation: s.navigation(),
            friction_zone_wiggling: game.wiggling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> (BalloonCharge, EngineContext) {
        let mut game = BalloonCharge::new();
        let mut ctx = EngineContext::from_config(&game.config());
        game.init(&mut ctx);
        (game, ctx)
    }

    fn step(game: &mut BalloonCharge, ctx: &mut EngineContext, events: &[InputEvent]) -> Vec<GameEvent> {
        ctx.clear_frame_data();
        let mut input = InputQueue::new();
        for e in events {
            input.push(*e);
        }
        game.update(ctx, &input);
        ctx.end_step();
        ctx.events.clone()
    }

    fn kinds(events: &[GameEvent]) -> Vec<f32> {
        events.iter().map(|e| e.kind).collect()
    }

    fn custom(kind: u32) -> InputEvent {
        InputEvent::Custom { kind, a: 0.0, b: 0.0, c: 0.0 }
    }

    #[test]
    fn first_update_publishes_the_reset() {
        let (mut game, mut ctx) = started();
        let events = step(&mut game, &mut ctx, &[]);
        let k = kinds(&events);
        assert_eq!(k[0], game_events::RESET);
        assert!(k.contains(&game_events::CHARGED_COUNT));
        assert!(k.contains(&game_events::PAPERS_ATTRACTED));
    }

    #[test]
    fn intro_dialog_opens_shortly_after_start() {
        let (mut game, mut ctx) = started();
        let mut opened = false;
        for _ in 0..5 {
            let events = step(&mut game, &mut ctx, &[]);
            opened |= events
                .iter()
                .any(|e| e.kind == game_events::DIALOG && e.a == DialogKind::Intro.code());
        }
        assert!(opened);
        assert_eq!(game.session().dialog(), Some(DialogKind::Intro));
    }

    #[test]
    fn manual_and_dismiss_round_trip() {
        let (mut game, mut ctx) = started();
        step(&mut game, &mut ctx, &[custom(events::MANUAL)]);
        assert_eq!(game.session().dialog(), Some(DialogKind::Manual));
        let events = step(&mut game, &mut ctx, &[custom(events::DISMISS_DIALOG)]);
        assert!(events.iter().any(|e| e.kind == game_events::DIALOG && e.a == 0.0));
        assert_eq!(game.session().dialog(), None);
    }

    #[test]
    fn explanation_is_ignored_before_a_win() {
        let (mut game, mut ctx) = started();
        let events = step(&mut game, &mut ctx, &[custom(events::EXPLANATION)]);
        assert!(!kinds(&events).contains(&game_events::NAVIGATE));
        assert!(game.session().navigation().is_none());
    }

    #[test]
    fn unknown_custom_event_is_ignored() {
        let (mut game, mut ctx) = started();
        step(&mut game, &mut ctx, &[]);
        let events = step(&mut game, &mut ctx, &[custom(99)]);
        assert!(!kinds(&events).contains(&game_events::RESET));
    }

    #[test]
    fn rubbing_on_the_hair_wiggles_the_zone() {
        let (mut game, mut ctx) = started();
        step(&mut game, &mut ctx, &[]);
        let grab = game.session().balloons()[0].center();
        let zone = game.session().layout().friction_zone.unwrap().center();
        let events = step(
            &mut game,
            &mut ctx,
            &[
                InputEvent::PointerDown { x: grab.x, y: grab.y },
                InputEvent::PointerMove { x: zone.x, y: zone.y },
            ],
        );
        assert!(events
            .iter()
            .any(|e| e.kind == game_events::WIGGLE && e.a == 1.0));
        assert!(game.session().charged_count() <= 1);
        let snapshot = game.snapshot_json();
        assert!(snapshot.contains("\"friction_zone_wiggling\":true"));
        assert!(snapshot.contains("\"dragging\":1"));
    }

    #[test]
    fn reset_event_restores_the_table() {
        let (mut game, mut ctx) = started();
        let home = game.session().balloons()[0].pos;
        let grab = game.session().balloons()[0].center();
        step(
            &mut game,
            &mut ctx,
            &[
                InputEvent::PointerDown { x: grab.x, y: grab.y },
                InputEvent::PointerMove { x: 600.0, y: 350.0 },
            ],
        );
        assert_ne!(game.session().balloons()[0].pos, home);
        let events = step(&mut game, &mut ctx, &[custom(events::RESET)]);
        assert!(kinds(&events).contains(&game_events::RESET));
        let pos = game.session().balloons()[0].pos;
        assert_eq!(pos.x, home.x);
        assert!((pos.y - home.y).abs() <= 2.0);
        assert!(game.session().dragging().is_none());
    }

    #[test]
    fn snapshot_lists_flags_and_dialog_text() {
        let (mut game, mut ctx) = started();
        step(&mut game, &mut ctx, &[custom(events::MANUAL)]);
        let value: serde_json::Value = serde_json::from_str(&game.snapshot_json()).unwrap();
        assert_eq!(value["charged_count"], 0);
        assert_eq!(value["has_won"], false);
        assert_eq!(value["show_continue"], true);
        assert_eq!(value["show_explanation"], false);
        assert_eq!(value["dialog"]["kind"], "manual");
        assert_eq!(value["dialog"]["title"], DialogKind::Manual.content().title);
        assert_eq!(value["balloons"].as_array().unwrap().len(), 4);
        assert_eq!(value["fragments"].as_array().unwrap().len(), 30);
        assert!(value["navigation"].is_null());
    }

    #[test]
    fn bad_configuration_keeps_the_session() {
        let (mut game, mut ctx) = started();
        let before = game.session().balloons()[0].pos;
        assert!(game.configure(&mut ctx, "{ not json").is_err());
        assert!(game
            .configure(&mut ctx, r#"{"tuning": {"balloon_width": -1.0}}"#)
            .is_err());
        assert_eq!(game.session().balloons()[0].pos, before);
    }

    #[test]
    fn unsafe_tuning_is_rejected_and_play_goes_on() {
        let (mut game, mut ctx) = started();
        for json in [
            r#"{"tuning": {"rope_max": -1}}"#,
            r#"{"tuning": {"rope_held_max": -1}}"#,
            r#"{"tuning": {"paper_max_pull": -5}}"#,
            r#"{"tuning": {"repel_softening": 0}}"#,
        ] {
            assert!(game.configure(&mut ctx, json).is_err(), "{json}");
        }
        assert_eq!(game.session().tuning().rope_max, 14.0);

        let grab = game.session().balloons()[0].center();
        let zone = game.session().layout().friction_zone.unwrap().center();
        let papers = game.session().layout().paper_table.unwrap().center();
        step(
            &mut game,
            &mut ctx,
            &[
                InputEvent::PointerDown { x: grab.x, y: grab.y },
                InputEvent::PointerMove { x: zone.x, y: zone.y },
                InputEvent::PointerMove { x: papers.x, y: papers.y - 50.0 },
            ],
        );
        for _ in 0..30 {
            step(&mut game, &mut ctx, &[]);
        }
        assert!(game.session().papers_attracted());
        assert!(game
            .session()
            .balloons()
            .iter()
            .all(|b| b.pos.is_finite() && b.vel.is_finite()));
    }

    #[test]
    fn configuration_moves_the_table() {
        let (mut game, mut ctx) = started();
        let json = r#"{"layout": {"table": {"x": 100.0, "y": 500.0, "w": 500.0, "h": 100.0}}}"#;
        game.configure(&mut ctx, json).unwrap();
        let b = &game.session().balloons()[0];
        assert!((b.bottom() - 498.0).abs() < 1e-3);
        assert!(b.pos.x > 100.0 && b.pos.x < 600.0);
    }
}
