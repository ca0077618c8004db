//! Session pipeline: presence supervision, timers and the event loop.
//!
//! This module turns the per-frame [`FrameSignal`] stream into a sentence and
//! exposes the shared state that the rendering layer reads every frame.
//!
//! # Architecture
//!
//! ```text
//! FrameFeed::offer (capacity 1, skip when busy)
//!        │
//!        ▼
//! SessionRunner::run()  ← async tokio task, one input per iteration
//!        │
//!        ├─ FrameSignal       → presence → debounce → commit → suggest
//!        ├─ space timer       → append space, end streak, forget commit
//!        ├─ inactivity timer  → full reset
//!        └─ SessionCommand    → Reset / AcceptSuggestion / Shutdown
//!
//! SharedState (Arc<Mutex<AppState>>) ←─── read by the renderer each frame
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use fingerspell::config::AppConfig;
//! use fingerspell::pipeline::{
//!     frame_channel, new_shared_state, FrameSignal, Session, SessionCommand, SessionRunner,
//! };
//! use fingerspell::spelling::{Alphabet, Label};
//! use fingerspell::suggest::SuggestionEngine;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let shared_state = new_shared_state();
//!     let engine = SuggestionEngine::disabled(Alphabet::latin());
//!
//!     let (feed, frames_rx) = frame_channel();
//!     let (commands_tx, commands_rx) = tokio::sync::mpsc::channel(16);
//!     let runner = SessionRunner::new(Session::new(&config.session, engine), shared_state.clone());
//!     let task = tokio::spawn(runner.run(frames_rx, commands_rx));
//!
//!     feed.offer(FrameSignal::present(Some(Label::new("A"))));
//!     commands_tx.send(SessionCommand::Shutdown).await.unwrap();
//!     task.await.unwrap();
//! }
//! ```

pub mod presence;
pub mod runner;
pub mod session;
pub mod state;
pub mod timer;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use presence::PresenceSupervisor;
pub use runner::{frame_channel, FrameFeed, SessionCommand, SessionRunner};
pub use session::{Effects, Session};
pub use state::{
    new_shared_state, AppState, FrameSignal, PresenceState, SessionView, SharedState, IDLE_PROMPT,
};
pub use timer::{TimerKind, TimerOp, TimerSlot};
