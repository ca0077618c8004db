//! Single-flight deadline timers.
//!
//! The session has two timers: the space timer and the inactivity timer.
//! Each lives in a [`TimerSlot`] owned by the runner.  A slot holds at most
//! one deadline: arming replaces it, cancelling clears it.  The runner only
//! polls a slot while it is armed, so a cancelled or replaced deadline can
//! never fire.
//!
//! The session itself never touches tokio; it returns [`TimerOp`]s that the
//! runner applies to the slots.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

// ---------------------------------------------------------------------------
// TimerKind / TimerOp
// ---------------------------------------------------------------------------

/// Which of the two session timers an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Hand-loss grace period before a space is inserted.
    Space,
    /// Idle period before the whole session is reset.
    Inactivity,
}

/// Timer request emitted by the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOp {
    /// (Re)arm the timer to fire after the duration, replacing any pending
    /// deadline of the same kind.
    Arm(TimerKind, Duration),
    /// Cancel the pending deadline, if any.
    Cancel(TimerKind),
}

// ---------------------------------------------------------------------------
// TimerSlot
// ---------------------------------------------------------------------------

/// Holds the pending deadline for one timer kind.
#[derive(Debug)]
pub struct TimerSlot {
    kind: TimerKind,
    deadline: Option<Instant>,
    /// Incremented on every arm; identifies the current deadline in logs.
    generation: u64,
}

impl TimerSlot {
    pub fn new(kind: TimerKind) -> Self {
        Self {
            kind,
            deadline: None,
            generation: 0,
        }
    }

    /// Replace any pending deadline with `now + after`.
    pub fn arm(&mut self, after: Duration) {
        self.deadline = Some(Instant::now() + after);
        self.generation += 1;
    }

    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            log::trace!("timer: {:?} #{} cancelled", self.kind, self.generation);
        }
    }

    /// Take the deadline after it fired.  Returns the generation that fired.
    pub fn fire(&mut self) -> Option<u64> {
        self.deadline.take().map(|_| self.generation)
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    /// Future resolving at the current deadline.  Pending forever when the
    /// slot is disarmed; callers should guard on [`is_armed`](Self::is_armed).
    pub fn wait(&self) -> impl Future<Output = ()> + 'static {
        let deadline = self.deadline;
        async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn arm_sets_deadline_and_bumps_generation() {
        let mut slot = TimerSlot::new(TimerKind::Space);
        assert!(!slot.is_armed());

        let before = Instant::now();
        slot.arm(Duration::from_secs(3));
        assert!(slot.is_armed());
        assert_eq!(slot.generation(), 1);
        assert_eq!(slot.deadline(), Some(before + Duration::from_secs(3)));
    }

    #[tokio::test(start_paused = true)]
    async fn rearm_replaces_pending_deadline() {
        let mut slot = TimerSlot::new(TimerKind::Inactivity);
        slot.arm(Duration::from_secs(1));
        slot.arm(Duration::from_secs(8));
        assert_eq!(slot.generation(), 2);

        let start = Instant::now();
        slot.wait().await;
        assert!(start.elapsed() >= Duration::from_secs(8));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_disarms() {
        let mut slot = TimerSlot::new(TimerKind::Space);
        slot.arm(Duration::from_secs(1));
        slot.cancel();
        assert!(!slot.is_armed());
        assert_eq!(slot.fire(), None);

        // A disarmed slot never resolves.
        let waited = tokio::time::timeout(Duration::from_secs(60), slot.wait()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn fire_consumes_deadline_once() {
        let mut slot = TimerSlot::new(TimerKind::Space);
        slot.arm(Duration::from_millis(10));
        slot.wait().await;
        assert_eq!(slot.fire(), Some(1));
        assert_eq!(slot.fire(), None);
    }
}
