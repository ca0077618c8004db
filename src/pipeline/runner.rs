//! Session runner: the single event loop that owns the [`Session`].
//!
//! [`SessionRunner`] multiplexes four inputs with `tokio::select!` and handles
//! exactly one per iteration, so frame processing and timer callbacks never
//! interleave:
//!
//! ```text
//!   SessionCommand (mpsc) ─┐
//!   space timer          ──┤
//!   inactivity timer     ──┼──▶ select! (biased) ──▶ Session ──▶ Effects
//!   FrameSignal (mpsc, 1) ─┘                                      │
//!                                    ┌────────────────────────────┤
//!                                    ▼                            ▼
//!                         TimerSlot arm / cancel      SharedState + view updates
//! ```
//!
//! Frames arrive over a channel of capacity one.  Producers use
//! [`FrameFeed::offer`], which drops the frame when the previous one has not
//! been picked up yet; frames are never queued behind a slow tick.
//!
//! On shutdown (a [`SessionCommand::Shutdown`] or both channels closed) the
//! runner cancels both timers before returning.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::session::{Effects, Session};
use super::state::{FrameSignal, SessionView, SharedState};
use super::timer::{TimerKind, TimerOp, TimerSlot};

// ---------------------------------------------------------------------------
// SessionCommand
// ---------------------------------------------------------------------------

/// Commands issued by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Clear the sentence and cancel both timers.
    Reset,
    /// Accept a suggested word.
    AcceptSuggestion(String),
    /// Accept the suggestion at the given position (0 = best).
    AcceptSuggestionAt(usize),
    /// Stop the runner.
    Shutdown,
}

// ---------------------------------------------------------------------------
// FrameFeed
// ---------------------------------------------------------------------------

/// Producer side of the frame channel.  Cheap to clone.
#[derive(Debug, Clone)]
pub struct FrameFeed {
    tx: mpsc::Sender<FrameSignal>,
    dropped: Arc<AtomicU64>,
}

impl FrameFeed {
    /// Hand a frame to the runner without waiting.
    ///
    /// Returns `false` when the frame was skipped because the runner is still
    /// busy with the previous one, or because the runner has stopped.
    pub fn offer(&self, frame: FrameSignal) -> bool {
        match self.tx.try_send(frame) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                let n = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                log::trace!("frames: runner busy, skipped frame ({n} total)");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Hand a frame to the runner, waiting for the slot to free up.
    ///
    /// For hosts that replay recorded frames and must not lose any.
    pub async fn send(&self, frame: FrameSignal) -> bool {
        self.tx.send(frame).await.is_ok()
    }

    /// Frames skipped by [`offer`](Self::offer) so far.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Create the at-most-one-in-flight frame channel.
pub fn frame_channel() -> (FrameFeed, mpsc::Receiver<FrameSignal>) {
    let (tx, rx) = mpsc::channel(1);
    let feed = FrameFeed {
        tx,
        dropped: Arc::new(AtomicU64::new(0)),
    };
    (feed, rx)
}

// ---------------------------------------------------------------------------
// SessionRunner
// ---------------------------------------------------------------------------

/// Drives a [`Session`] from frames, timers and UI commands.
///
/// ```rust,no_run
/// use fingerspell::config::AppConfig;
/// use fingerspell::pipeline::{frame_channel, new_shared_state, Session, SessionRunner};
/// use fingerspell::spelling::Alphabet;
/// use fingerspell::suggest::SuggestionEngine;
///
/// # async fn example() {
/// let config = AppConfig::default();
/// let state = new_shared_state();
/// let session = Session::new(&config.session, SuggestionEngine::disabled(Alphabet::latin()));
///
/// let (feed, frames_rx) = frame_channel();
/// let (commands_tx, commands_rx) = tokio::sync::mpsc::channel(16);
/// tokio::spawn(SessionRunner::new(session, state).run(frames_rx, commands_rx));
///
/// // feed.offer(...) once per rendered frame; commands_tx.send(...) from the UI.
/// # drop((feed, commands_tx));
/// # }
/// ```
pub struct SessionRunner {
    session: Session,
    state: SharedState,
    updates: Option<mpsc::Sender<SessionView>>,
    space: TimerSlot,
    inactivity: TimerSlot,
}

impl SessionRunner {
    pub fn new(session: Session, state: SharedState) -> Self {
        Self {
            session,
            state,
            updates: None,
            space: TimerSlot::new(TimerKind::Space),
            inactivity: TimerSlot::new(TimerKind::Inactivity),
        }
    }

    /// Also push every changed view into `updates`.  A full channel skips
    /// the update; [`SharedState`] always holds the latest view.
    pub fn with_updates(mut self, updates: mpsc::Sender<SessionView>) -> Self {
        self.updates = Some(updates);
        self
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run until [`SessionCommand::Shutdown`] or until both channels close.
    pub async fn run(
        mut self,
        mut frames: mpsc::Receiver<FrameSignal>,
        mut commands: mpsc::Receiver<SessionCommand>,
    ) {
        let mut frames_open = true;
        let mut commands_open = true;

        self.publish();
        log::info!("session: runner started");

        while frames_open || commands_open {
            let space_armed = self.space.is_armed();
            let space_fired = self.space.wait();
            let inactivity_armed = self.inactivity.is_armed();
            let inactivity_fired = self.inactivity.wait();

            tokio::select! {
                biased;

                command = commands.recv(), if commands_open => match command {
                    Some(SessionCommand::Shutdown) => {
                        log::info!("session: shutdown requested");
                        break;
                    }
                    Some(command) => self.handle_command(command),
                    None => {
                        log::debug!("session: command channel closed");
                        commands_open = false;
                    }
                },

                _ = space_fired, if space_armed => {
                    if let Some(generation) = self.space.fire() {
                        log::debug!("timer: space #{generation} fired");
                        let fx = self.session.on_space_timer();
                        self.apply(fx);
                    }
                }

                _ = inactivity_fired, if inactivity_armed => {
                    if let Some(generation) = self.inactivity.fire() {
                        log::debug!("timer: inactivity #{generation} fired");
                        let fx = self.session.on_inactivity_timer();
                        self.apply(fx);
                    }
                }

                frame = frames.recv(), if frames_open => match frame {
                    Some(frame) => self.handle_frame(frame),
                    None => {
                        log::debug!("session: frame channel closed");
                        frames_open = false;
                    }
                },
            }
        }

        self.space.cancel();
        self.inactivity.cancel();
        log::info!("session: runner stopped");
    }

    // -----------------------------------------------------------------------
    // Event handlers
    // -----------------------------------------------------------------------

    fn handle_frame(&mut self, frame: FrameSignal) {
        let fx = self.session.on_frame(&frame);
        {
            let mut st = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            st.frames_processed += 1;
        }
        self.apply(fx);
    }

    fn handle_command(&mut self, command: SessionCommand) {
        log::debug!("session: command {command:?}");
        let fx = match command {
            SessionCommand::Reset => self.session.reset(),
            SessionCommand::AcceptSuggestion(word) => self.session.accept_suggestion(&word),
            SessionCommand::AcceptSuggestionAt(index) => self.session.accept_suggestion_at(index),
            SessionCommand::Shutdown => Effects::default(),
        };
        self.apply(fx);
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn apply(&mut self, fx: Effects) {
        for op in fx.timers {
            match op {
                TimerOp::Arm(kind, after) => self.slot(kind).arm(after),
                TimerOp::Cancel(kind) => self.slot(kind).cancel(),
            }
        }
        if fx.changed {
            self.publish();
        }
    }

    fn slot(&mut self, kind: TimerKind) -> &mut TimerSlot {
        match kind {
            TimerKind::Space => &mut self.space,
            TimerKind::Inactivity => &mut self.inactivity,
        }
    }

    fn publish(&mut self) {
        let view = self.session.view();
        {
            let mut st = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            st.view = view.clone();
        }

        let closed = match &self.updates {
            Some(tx) => matches!(tx.try_send(view), Err(TrySendError::Closed(_))),
            None => false,
        };
        if closed {
            log::debug!("session: view receiver dropped");
            self.updates = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
