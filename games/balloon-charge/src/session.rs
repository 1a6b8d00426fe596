//! One play session: the balloons, the paper pile, the win state and the dialogs,
//! driven by pointer input and the fixed-step clock.

use glam::Vec2;
use maxwell_engine::{EffectSink, Timers};
use rand::Rng;

use crate::balloon::{self, Balloon, BalloonId};
use crate::charge::{self, ChargeOutcome};
use crate::config::{GameSetup, Layout, Tuning};
use crate::dialog::{DialogKind, Navigation};
use crate::drag::{self, DragController};
use crate::papers::PaperField;
use crate::physics::{PhysicsStepper, StepEnv};
use crate::win::WinDetector;

/// Something the page may want to react to, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    ChargedCount(usize),
    PapersAttracted(bool),
    Rubbed,
    Won,
    DialogChanged(Option<DialogKind>),
    Navigate,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scheduled {
    Intro,
}

pub struct Session {
    layout: Layout,
    tuning: Tuning,
    balloons: Vec<Balloon>,
    drag: DragController,
    physics: PhysicsStepper,
    papers: PaperField,
    win: WinDetector,
    timers: Timers<Scheduled>,
    intro_shown: bool,
    dialog: Option<DialogKind>,
    navigation: Option<Navigation>,
    outbox: Vec<SessionEvent>,
}

impl Session {
    /// A session laid out per `setup`. Call [`Session::reset`] before playing.
    pub fn new(setup: GameSetup) -> Self {
        let GameSetup { layout, tuning } = setup;
        Self {
            balloons: balloon::create_set(tuning.balloon_size()),
            papers: paper_field(&layout),
            layout,
            tuning,
            drag: DragController::new(),
            physics: PhysicsStepper::new(),
            win: WinDetector::new(),
            timers: Timers::new(),
            intro_shown: false,
            dialog: None,
            navigation: None,
            outbox: Vec::new(),
        }
    }

    /// Swap in a new layout and tuning, then start over.
    pub fn apply_setup<R: Rng + ?Sized>(&mut self, setup: GameSetup, rng: &mut R) {
        let GameSetup { layout, tuning } = setup;
        for b in &mut self.balloons {
            b.size = tuning.balloon_size();
        }
        self.papers = paper_field(&layout);
        self.layout = layout;
        self.tuning = tuning;
        self.reset(rng);
    }

    // ---- Accessors ----

    pub fn balloons(&self) -> &[Balloon] {
        &self.balloons
    }

    pub fn balloon(&self, id: BalloonId) -> Option<&Balloon> {
        self.balloons.get(id.index())
    }

    pub fn papers(&self) -> &PaperField {
        &self.papers
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn dragging(&self) -> Option<BalloonId> {
        self.drag.target()
    }

    pub fn charged_count(&self) -> usize {
        self.balloons.iter().filter(|b| b.charged).count()
    }

    pub fn papers_attracted(&self) -> bool {
        self.papers.is_attracted()
    }

    pub fn has_won(&self) -> bool {
        self.win.has_won()
    }

    #[cfg(test)]
    fn win_pending(&self) -> bool {
        self.win.is_pending()
    }

    pub fn dialog(&self) -> Option<DialogKind> {
        self.dialog
    }

    /// The dialog's "continue" button is up.
    pub fn show_continue(&self) -> bool {
        self.dialog.is_some()
    }

    /// The "explanation" button is offered once the success dialog is closed.
    pub fn show_explanation(&self) -> bool {
        self.has_won() && self.dialog.is_none()
    }

    pub fn navigation(&self) -> Option<Navigation> {
        self.navigation
    }

    pub fn frame(&self) -> u64 {
        self.physics.frame()
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.outbox)
    }

    // ---- Presentation commands ----

    /// Back to the starting layout: everything uncharged and at rest on the table,
    /// no win, papers released, intro dialog queued.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let homes = self
            .layout
            .table
            .map(|table| balloon::home_positions(&table, self.tuning.balloon_size(), self.balloons.len()));
        for (i, b) in self.balloons.iter_mut().enumerate() {
            let pos = homes.as_ref().and_then(|h| h.get(i).copied()).unwrap_or(b.pos);
            b.reset(pos);
        }

        self.drag.cancel();
        self.papers.release();
        self.papers.ensure_seeds(rng);
        self.win.reset();
        self.timers.clear();
        self.intro_shown = false;
        self.dialog = None;
        self.navigation = None;
        self.timers.schedule(self.tuning.intro_delay, Scheduled::Intro);

        self.outbox.push(SessionEvent::Reset);
        self.outbox.push(SessionEvent::ChargedCount(0));
        self.outbox.push(SessionEvent::PapersAttracted(false));
        self.outbox.push(SessionEvent::DialogChanged(None));
        log::info!("session reset");
    }

    pub fn request_manual(&mut self) {
        self.set_dialog(Some(DialogKind::Manual));
    }

    /// Ask for the explanation video. Only honored once the success dialog is closed.
    pub fn request_explanation(&mut self) {
        if !self.show_explanation() {
            return;
        }
        self.navigation = Some(Navigation::explanation());
        self.outbox.push(SessionEvent::Navigate);
        log::info!("navigating to {}", Navigation::explanation().route);
    }

    pub fn dismiss_dialog(&mut self) {
        if self.dialog.is_some() {
            self.set_dialog(None);
        }
    }

    fn set_dialog(&mut self, dialog: Option<DialogKind>) {
        self.dialog = dialog;
        self.outbox.push(SessionEvent::DialogChanged(dialog));
    }

    // ---- Pointer input ----

    /// Pointer pressed: grab the topmost balloon under it.
    pub fn pointer_down(&mut self, point: Vec2) {
        let hit = self
            .balloons
            .iter()
            .rev()
            .find(|b| b.rect().contains(point))
            .map(|b| b.id);
        if let Some(id) = hit {
            self.begin_drag(id, point);
        }
    }

    /// Pointer moved: drag whatever is held.
    pub fn pointer_move<R: Rng + ?Sized>(&mut self, point: Vec2, rng: &mut R, effects: &mut dyn EffectSink) {
        if let Some(id) = self.drag.target() {
            self.move_drag(id, point, rng, effects);
        }
    }

    /// Pointer released anywhere: drop whatever is held.
    pub fn pointer_up<R: Rng + ?Sized>(&mut self, point: Vec2, rng: &mut R) {
        if let Some(id) = self.drag.target() {
            self.end_drag(id, point, rng);
        }
    }

    pub fn begin_drag(&mut self, id: BalloonId, point: Vec2) {
        if self.has_won() {
            return;
        }
        let Some(balloon) = self.balloons.get_mut(id.index()) else {
            return;
        };
        if let Some(previous) = self.drag.begin(balloon, point) {
            log::debug!("balloon {} released by a new grab", previous.0);
        }
    }

    pub fn move_drag<R: Rng + ?Sized>(&mut self, id: BalloonId, point: Vec2, rng: &mut R, effects: &mut dyn EffectSink) {
        if self.has_won() {
            return;
        }
        let Some(pos) = self.drag.position_for(id, point) else {
            return;
        };
        let Some(balloon) = self.balloons.get_mut(id.index()) else {
            return;
        };
        balloon.pos = pos;

        let outcome = charge::maybe_charge(
            balloon,
            point,
            self.layout.friction_zone.as_ref(),
            &self.tuning,
            rng,
            effects,
        );
        let charged = balloon.charged;
        match outcome {
            ChargeOutcome::Charged => {
                let count = self.charged_count();
                self.outbox.push(SessionEvent::ChargedCount(count));
                self.outbox.push(SessionEvent::Rubbed);
            }
            ChargeOutcome::Rubbed => self.outbox.push(SessionEvent::Rubbed),
            ChargeOutcome::Outside => {}
        }

        self.update_papers(charged, point, rng);
    }

    pub fn end_drag<R: Rng + ?Sized>(&mut self, id: BalloonId, point: Vec2, rng: &mut R) {
        if self.has_won() {
            return;
        }
        let Some(pos) = self.drag.end(id, point) else {
            return;
        };
        let Some(balloon) = self.balloons.get_mut(id.index()) else {
            return;
        };
        balloon.pos = pos;
        if drag::land(balloon, self.layout.table.as_ref(), self.tuning.drop_tolerance) {
            log::debug!("balloon {} placed on the table", id.0);
        }
        let charged = balloon.charged;
        self.update_papers(charged, point, rng);
    }

    fn update_papers<R: Rng + ?Sized>(&mut self, charged: bool, point: Vec2, rng: &mut R) {
        let before = self.papers.is_attracted();
        let after = self
            .papers
            .update(charged, point, self.layout.paper_table.as_ref(), &self.tuning, rng);
        if before != after {
            self.outbox.push(SessionEvent::PapersAttracted(after));
        }
        let count = self.charged_count();
        self.win.evaluate(count, after, self.tuning.win_delay);
    }

    // ---- Clock ----

    /// One fixed step: scheduled dialogs, physics, win debounce.
    pub fn step<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        for scheduled in self.timers.advance(dt) {
            match scheduled {
                Scheduled::Intro if !self.intro_shown => {
                    self.intro_shown = true;
                    self.set_dialog(Some(DialogKind::Intro));
                }
                Scheduled::Intro => {}
            }
        }

        let env = StepEnv {
            table: self.layout.table.as_ref(),
            area: &self.layout.area,
            dragging: self.drag.target(),
            frozen: self.win.has_won(),
        };
        self.physics.step(&mut self.balloons, &env, &self.tuning, rng);

        if self.win.advance(dt) {
            self.drag.cancel();
            self.set_dialog(Some(DialogKind::Success));
            self.outbox.push(SessionEvent::Won);
            log::info!("won with {} charged balloon(s)", self.charged_count());
        }
    }
}

fn paper_field(layout: &Layout) -> PaperField {
    match (&layout.fragments, &layout.paper_table) {
        (Some(homes), _) => PaperField::new(homes.iter().copied()),
        (None, Some(table)) => PaperField::new(PaperField::default_homes(table)),
        (None, None) => PaperField::new(std::iter::empty()),
    }
}
