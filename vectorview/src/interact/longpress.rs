//! Long-press detection as an explicit state machine.
//!
//! Replaces ad hoc timer/flag juggling with three states and five inputs.
//! The detector never reads a clock: every input carries the caller's
//! instant, which keeps transitions deterministic and testable.

use std::time::{Duration, Instant};

/// Default hold duration before a press fires.
pub const DEFAULT_HOLD: Duration = Duration::from_millis(600);

/// Default movement tolerance in pixels before a press is abandoned.
pub const DEFAULT_SLOP_PX: f64 = 8.0;

/// Detector states.
#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    /// No pointer down
    Idle,
    /// Pointer down, waiting out the hold duration
    Pressing {
        started: Instant,
        origin: (f64, f64),
    },
    /// Fired for the current press; stays here until pointer up
    Fired,
}

/// A long press that fired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongPress {
    /// Pointer position at press start
    pub x: f64,
    /// Pointer position at press start
    pub y: f64,
}

/// Long-press detector.
///
/// Drive it with pointer events plus periodic [`poll`](Self::poll) calls
/// (e.g. per animation frame); `poll` returns the press when the hold
/// duration elapses without movement beyond the slop radius.
#[derive(Debug)]
pub struct LongPressDetector {
    state: State,
    hold: Duration,
    slop_px: f64,
}

impl Default for LongPressDetector {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD, DEFAULT_SLOP_PX)
    }
}

impl LongPressDetector {
    /// Create a detector with explicit hold duration and slop radius.
    pub fn new(hold: Duration, slop_px: f64) -> Self {
        Self {
            state: State::Idle,
            hold,
            slop_px,
        }
    }

    /// Pointer down: Idle → Pressing. A second down restarts the press.
    pub fn pointer_down(&mut self, x: f64, y: f64, now: Instant) {
        self.state = State::Pressing {
            started: now,
            origin: (x, y),
        };
    }

    /// Pointer movement; beyond the slop radius the press is abandoned.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let State::Pressing { origin, .. } = self.state {
            let (dx, dy) = (x - origin.0, y - origin.1);
            if (dx * dx + dy * dy).sqrt() > self.slop_px {
                self.state = State::Idle;
            }
        }
    }

    /// Pointer up: back to Idle from any state without firing.
    pub fn pointer_up(&mut self) {
        self.state = State::Idle;
    }

    /// Gesture cancel (focus loss, multi-touch): back to Idle.
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }

    /// Check the hold timer; returns the press the first time it elapses.
    ///
    /// Pressing → Fired happens exactly once per press; repeated polls in
    /// Fired return `None`.
    pub fn poll(&mut self, now: Instant) -> Option<LongPress> {
        if let State::Pressing { started, origin } = self.state {
            if now.duration_since(started) >= self.hold {
                self.state = State::Fired;
                return Some(LongPress {
                    x: origin.0,
                    y: origin.1,
                });
            }
        }
        None
    }

    /// Whether a press is currently being held.
    pub fn is_pressing(&self) -> bool {
        matches!(self.state, State::Pressing { .. })
    }
}
