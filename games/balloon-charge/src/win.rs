//! Debounced success detection.

use maxwell_engine::{TimerId, Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinState {
    Pending,
    Won,
}

/// Declares the win once at least one balloon is charged and the papers have
/// been attracted continuously for the whole debounce window.
#[derive(Debug)]
pub struct WinDetector {
    state: WinState,
    timers: Timers<()>,
    debounce: Option<TimerId>,
}

impl WinDetector {
    pub fn new() -> Self {
        Self {
            state: WinState::Pending,
            timers: Timers::new(),
            debounce: None,
        }
    }

    pub fn state(&self) -> WinState {
        self.state
    }

    pub fn has_won(&self) -> bool {
        self.state == WinState::Won
    }

    /// Whether a debounce window is running.
    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.debounce.is_some()
    }

    /// Re-check the condition after the charge count or attraction flag changed.
    pub fn evaluate(&mut self, charged_count: usize, papers_attracted: bool, delay: f32) {
        if self.has_won() {
            return;
        }
        let ok = charged_count > 0 && papers_attracted;
        match (ok, self.debounce) {
            (true, None) => {
                self.debounce = Some(self.timers.schedule(delay, ()));
            }
            (false, Some(id)) => {
                self.timers.cancel(id);
                self.debounce = None;
            }
            _ => {}
        }
    }

    /// Run the debounce clock. Returns true on the step the win happens.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.timers.advance(dt).is_empty() {
            return false;
        }
        self.debounce = None;
        self.state = WinState::Won;
        true
    }

    pub fn reset(&mut self) {
        self.timers.clear();
        self.debounce = None;
        self.state = WinState::Pending;
    }
}

impl Default for WinDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn run(win: &mut WinDetector, frames: usize) -> bool {
        let mut fired = false;
        for _ in 0..frames {
            fired |= win.advance(DT);
        }
        fired
    }

    #[test]
    fn wins_after_the_debounce() {
        let mut win = WinDetector::new();
        win.evaluate(1, true, 1.2);
        assert!(win.is_pending());
        assert!(!run(&mut win, 71));
        assert!(run(&mut win, 1));
        assert!(win.has_won());
    }

    #[test]
    fn interruption_prevents_the_win() {
        let mut win = WinDetector::new();
        win.evaluate(1, true, 1.2);
        run(&mut win, 6); // 100 ms
        win.evaluate(1, false, 1.2);
        assert!(!win.is_pending());
        assert!(!run(&mut win, 200));
        assert_eq!(win.state(), WinState::Pending);
    }

    #[test]
    fn re_evaluating_does_not_restart_the_window() {
        let mut win = WinDetector::new();
        win.evaluate(1, true, 1.2);
        run(&mut win, 60);
        win.evaluate(2, true, 1.2);
        assert!(run(&mut win, 12));
    }

    #[test]
    fn needs_a_charged_balloon() {
        let mut win = WinDetector::new();
        win.evaluate(0, true, 1.2);
        assert!(!win.is_pending());
    }

    #[test]
    fn won_is_terminal_until_reset() {
        let mut win = WinDetector::new();
        win.evaluate(1, true, 0.0);
        assert!(run(&mut win, 1));
        win.evaluate(0, false, 1.2);
        assert!(win.has_won());
        win.reset();
        assert_eq!(win.state(), WinState::Pending);
    }

    #[test]
    fn reset_cancels_a_running_window() {
        let mut win = WinDetector::new();
        win.evaluate(1, true, 1.2);
        run(&mut win, 30);
        win.reset();
        assert!(!win.is_pending());
        assert!(!run(&mut win, 120));
    }
}
