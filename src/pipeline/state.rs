//! Per-frame input, presence states and the shared rendering state.
//!
//! [`FrameSignal`] is the only thing the session learns about a frame.
//!
//! [`SessionView`] is the projection the rendering layer displays: sentence,
//! live label and suggestions.  It is derived from the session after every
//! mutation and is never a second source of truth.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<AppState>>` — cheap to clone
//! and safe to share across threads.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::spelling::Label;

/// Shown when there is neither text nor a live label.
pub const IDLE_PROMPT: &str = "Show your hand to the camera";

// ---------------------------------------------------------------------------
// FrameSignal
// ---------------------------------------------------------------------------

/// What the detector and classifier saw in one rendered frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameSignal {
    /// Classified label, `None` when no pose was recognised.
    pub label: Option<Label>,
    /// Whether the landmark detector found a hand at all.
    pub hand_present: bool,
    /// Host timestamp in milliseconds; informational only.
    pub timestamp_ms: u64,
}

impl FrameSignal {
    /// A frame with a detected hand and an optional label.
    pub fn present(label: Option<Label>) -> Self {
        Self {
            label,
            hand_present: true,
            timestamp_ms: 0,
        }
    }

    /// A frame with no hand.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn at(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }
}

// ---------------------------------------------------------------------------
// PresenceState
// ---------------------------------------------------------------------------

/// States of the hand-presence supervisor.
///
/// ```text
/// Spaced ──hand──▶ HandPresent ──no hand──▶ AwaitingSpace ──space timer──▶ Spaced
///                       ▲                          │
///                       └────────── hand ──────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceState {
    /// A hand was detected on the latest frame.
    HandPresent,
    /// The hand left; the space timer is running.
    AwaitingSpace,
    /// No hand and nothing pending.  Also the initial state.
    #[default]
    Spaced,
}

impl PresenceState {
    /// Returns `true` only while a hand is being tracked.
    ///
    /// ```
    /// use fingerspell::pipeline::PresenceState;
    ///
    /// assert!(PresenceState::HandPresent.is_hand_present());
    /// assert!(!PresenceState::AwaitingSpace.is_hand_present());
    /// assert!(!PresenceState::Spaced.is_hand_present());
    /// ```
    pub fn is_hand_present(&self) -> bool {
        matches!(self, PresenceState::HandPresent)
    }

    /// A short human-readable label suitable for a status bar.
    pub fn label(&self) -> &'static str {
        match self {
            PresenceState::HandPresent => "HandPresent",
            PresenceState::AwaitingSpace => "AwaitingSpace",
            PresenceState::Spaced => "Spaced",
        }
    }
}

// ---------------------------------------------------------------------------
// SessionView
// ---------------------------------------------------------------------------

/// Everything the rendering layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SessionView {
    /// The assembled sentence.
    pub sentence: String,
    /// Label on the latest frame, if any, before debouncing.
    pub live_label: Option<String>,
    /// Up to three next-word suggestions, best first.
    pub suggestions: Vec<String>,
    pub presence: PresenceState,
    /// `false` when no n-gram table could be loaded.
    pub suggestions_available: bool,
}

impl SessionView {
    /// Sentence followed by the live label, or [`IDLE_PROMPT`] when both
    /// are empty.
    pub fn display_text(&self) -> String {
        let live = self.live_label.as_deref().unwrap_or("");
        if self.sentence.is_empty() && live.is_empty() {
            return IDLE_PROMPT.to_string();
        }
        format!("{}{}", self.sentence, live)
    }

    /// Suggestions upper-cased for display.
    pub fn display_suggestions(&self) -> Vec<String> {
        self.suggestions.iter().map(|s| s.to_uppercase()).collect()
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Shared application state read by the rendering layer.
///
/// Held behind [`SharedState`].  The session runner writes it after every
/// mutation; readers copy what they need and release the lock.
#[derive(Debug, Default)]
pub struct AppState {
    /// Latest projection of the session.
    pub view: SessionView,

    /// Frames handed to the session since start-up.
    pub frames_processed: u64,
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`AppState`].
///
/// Cheap to clone (`Arc` clone).  Lock for a short critical section; do
/// **not** hold the lock across `.await` points.
pub type SharedState = Arc<Mutex<AppState>>;

/// Construct a new [`SharedState`] wrapping a default [`AppState`].
pub fn new_shared_state() -> SharedState {
    Arc::new(Mutex::new(AppState::default()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- FrameSignal ---

    #[test]
    fn absent_frame_has_no_label() {
        let f = FrameSignal::absent();
        assert!(!f.hand_present);
        assert!(f.label.is_none());
    }

    #[test]
    fn present_frame_keeps_label_and_timestamp() {
        let f = FrameSignal::present(Some(Label::new("A"))).at(1234);
        assert!(f.hand_present);
        assert_eq!(f.label, Some(Label::new("A")));
        assert_eq!(f.timestamp_ms, 1234);
    }

    // ---- PresenceState ---

    #[test]
    fn default_presence_is_spaced() {
        assert_eq!(PresenceState::default(), PresenceState::Spaced);
    }

    #[test]
    fn presence_labels() {
        assert_eq!(PresenceState::HandPresent.label(), "HandPresent");
        assert_eq!(PresenceState::AwaitingSpace.label(), "AwaitingSpace");
        assert_eq!(PresenceState::Spaced.label(), "Spaced");
    }

    // ---- SessionView ---

    #[test]
    fn empty_view_shows_prompt() {
        assert_eq!(SessionView::default().display_text(), IDLE_PROMPT);
    }

    #[test]
    fn display_text_appends_live_label() {
        let view = SessionView {
            sentence: "HELL".into(),
            live_label: Some("O".into()),
            ..SessionView::default()
        };
        assert_eq!(view.display_text(), "HELLO");
    }

    #[test]
    fn display_suggestions_are_uppercase() {
        let view = SessionView {
            suggestions: vec!["fine".into(), "happy".into()],
            ..SessionView::default()
        };
        assert_eq!(view.display_suggestions(), vec!["FINE", "HAPPY"]);
    }

    #[test]
    fn view_serialises_to_json() {
        let view = SessionView {
            sentence: "HI ".into(),
            presence: PresenceState::AwaitingSpace,
            ..SessionView::default()
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["sentence"], "HI ");
        assert_eq!(json["presence"], "awaiting_space");
        assert!(json["live_label"].is_null());
    }

    // ---- AppState / SharedState ---

    #[test]
    fn shared_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedState>();
    }

    #[test]
    fn shared_state_can_be_cloned_and_mutated() {
        let state = new_shared_state();
        let state2 = Arc::clone(&state);

        state.lock().unwrap().view.sentence = "AB".into();
        assert_eq!(state2.lock().unwrap().view.sentence, "AB");
    }
}
