//! Frame-driven one-shot timers.
//!
//! Timers count down by the `dt` handed to [`Timers::advance`], so they follow the
//! fixed-step clock rather than wall time. Cancelling is idempotent: cancelling a
//! timer that already fired or was already cancelled does nothing.

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

/// Tolerance for float drift when summing many fixed steps.
const FIRE_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone)]
struct Pending<T> {
    id: TimerId,
    remaining: f32,
    payload: T,
}

/// A set of pending one-shot timers, each carrying a payload returned when it fires.
#[derive(Debug, Clone)]
pub struct Timers<T> {
    pending: Vec<Pending<T>>,
    next_id: u32,
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Schedule `payload` to fire after `delay` seconds. A zero delay fires on the next advance.
    pub fn schedule(&mut self, delay: f32, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.push(Pending {
            id,
            remaining: delay.max(0.0),
            payload,
        });
        id
    }

    /// Cancel a timer. Returns true if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.pending.iter().position(|p| p.id == id) {
            Some(idx) => {
                self.pending.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Whether the timer is scheduled and has not fired yet.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Seconds left before the timer fires, if it is pending.
    pub fn remaining(&self, id: TimerId) -> Option<f32> {
        self.pending.iter().find(|p| p.id == id).map(|p| p.remaining)
    }

    /// Count every timer down by `dt`. Returns the payloads that fired, in scheduling order.
    pub fn advance(&mut self, dt: f32) -> Vec<T> {
        let mut fired = Vec::new();
        let mut idx = 0;
        while idx < self.pending.len() {
            self.pending[idx].remaining -= dt;
            if self.pending[idx].remaining <= FIRE_EPSILON {
                fired.push(self.pending.remove(idx).payload);
            } else {
                idx += 1;
            }
        }
        fired
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}
