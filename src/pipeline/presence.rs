//! Hand-presence supervisor.
//!
//! Distinguishes "paused between words" from "walked away":
//!
//! ```text
//!                 hand frame                       no-hand frame
//! Spaced ───────────────────────▶ HandPresent ───────────────────▶ AwaitingSpace
//!   ▲     cancel space timer,         ▲          arm space timer S      │
//!   │     re-arm inactivity I         │                                 │
//!   │                                 └──────── hand frame ─────────────┤
//!   │                                                                   │
//!   └──────────────────────── space timer fires (insert space) ─────────┘
//!
//! inactivity timer fires (any state) ──▶ Spaced, full session reset
//! ```
//!
//! The supervisor only decides transitions and timer requests; the session
//! applies the side effects (space insertion, reset).

use std::time::Duration;

use super::state::PresenceState;
use super::timer::{TimerKind, TimerOp};

/// Presence state machine with its two grace periods.
#[derive(Debug, Clone)]
pub struct PresenceSupervisor {
    state: PresenceState,
    space_delay: Duration,
    inactivity_timeout: Duration,
}

impl PresenceSupervisor {
    pub fn new(space_delay: Duration, inactivity_timeout: Duration) -> Self {
        Self {
            state: PresenceState::default(),
            space_delay,
            inactivity_timeout,
        }
    }

    /// Record whether the current frame contains a hand.
    pub fn on_frame(&mut self, hand_present: bool) -> Vec<TimerOp> {
        if hand_present {
            if self.state != PresenceState::HandPresent {
                log::debug!("presence: {} -> HandPresent", self.state.label());
            }
            self.state = PresenceState::HandPresent;
            return vec![
                TimerOp::Cancel(TimerKind::Space),
                TimerOp::Arm(TimerKind::Inactivity, self.inactivity_timeout),
            ];
        }

        if self.state == PresenceState::HandPresent {
            log::debug!("presence: hand lost, space in {:?}", self.space_delay);
            self.state = PresenceState::AwaitingSpace;
            return vec![TimerOp::Arm(TimerKind::Space, self.space_delay)];
        }

        Vec::new()
    }

    /// The space timer fired.  Returns `true` when a space should be inserted;
    /// a fire that arrives in any state other than `AwaitingSpace` is stale
    /// and ignored.
    pub fn on_space_timer(&mut self) -> bool {
        if self.state != PresenceState::AwaitingSpace {
            log::debug!("presence: ignoring space timer in {}", self.state.label());
            return false;
        }
        self.state = PresenceState::Spaced;
        true
    }

    /// The inactivity timer fired; the session is about to be reset.
    pub fn on_inactivity_timer(&mut self) -> Vec<TimerOp> {
        self.state = PresenceState::Spaced;
        vec![TimerOp::Cancel(TimerKind::Space)]
    }

    /// Explicit user activity other than a frame (e.g. accepting a
    /// suggestion) postpones the inactivity reset.
    pub fn on_activity(&mut self) -> Vec<TimerOp> {
        vec![TimerOp::Arm(TimerKind::Inactivity, self.inactivity_timeout)]
    }

    /// Back to the initial state with no pending timers.
    pub fn reset(&mut self) -> Vec<TimerOp> {
        self.state = PresenceState::Spaced;
        vec![
            TimerOp::Cancel(TimerKind::Space),
            TimerOp::Cancel(TimerKind::Inactivity),
        ]
    }

    pub fn state(&self) -> PresenceState {
        self.state
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
