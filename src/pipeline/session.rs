//! Synchronous session controller.
//!
//! [`Session`] owns the debouncer, sentence buffer, presence supervisor and
//! suggestion engine, and applies every input in a fixed order:
//!
//! ```text
//! FrameSignal ─▶ presence update ─▶ debounce ─▶ (commit) append letter ─▶ suggest
//! space timer ─▶ append space (if not space-terminated) ─▶ end streak, forget commit ─▶ suggest
//! inactivity  ─▶ clear sentence, reset debouncer
//! reset()     ─▶ clear sentence, reset debouncer, cancel both timers
//! accept(w)   ─▶ append word + space ─▶ forget commit ─▶ suggest
//! ```
//!
//! It performs no I/O and knows nothing about tokio: every call returns an
//! [`Effects`] value describing the timer operations the runner must apply
//! and whether the rendered view changed.

use crate::config::SessionConfig;
use crate::spelling::{LetterDebouncer, SentenceBuffer};
use crate::suggest::SuggestionEngine;

use super::presence::PresenceSupervisor;
use super::state::{FrameSignal, PresenceState, SessionView};
use super::timer::TimerOp;

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// Result of feeding one input to the [`Session`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    /// Timer operations to apply, in order.
    pub timers: Vec<TimerOp>,
    /// `true` when [`Session::view`] differs from before the call.
    pub changed: bool,
}

impl Effects {
    fn timers(timers: Vec<TimerOp>) -> Self {
        Self {
            timers,
            changed: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The fingerspelling state machine for one user.
///
/// ```
/// use fingerspell::config::SessionConfig;
/// use fingerspell::pipeline::{FrameSignal, Session};
/// use fingerspell::spelling::{Alphabet, Label};
/// use fingerspell::suggest::SuggestionEngine;
///
/// let mut session = Session::new(
///     &SessionConfig::default(),
///     SuggestionEngine::disabled(Alphabet::latin()),
/// );
/// for _ in 0..10 {
///     session.on_frame(&FrameSignal::present(Some(Label::new("A"))));
/// }
/// assert_eq!(session.sentence(), "A");
/// ```
pub struct Session {
    debouncer: LetterDebouncer,
    buffer: SentenceBuffer,
    presence: PresenceSupervisor,
    engine: SuggestionEngine,
    live_label: Option<String>,
    suggestions: Vec<String>,
}

impl Session {
    pub fn new(config: &SessionConfig, engine: SuggestionEngine) -> Self {
        Self {
            debouncer: LetterDebouncer::new(config.commit_threshold),
            buffer: SentenceBuffer::new(),
            presence: PresenceSupervisor::new(config.space_delay(), config.inactivity_timeout()),
            engine,
            live_label: None,
            suggestions: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Inputs
    // -----------------------------------------------------------------------

    /// Process one detection frame.
    pub fn on_frame(&mut self, frame: &FrameSignal) -> Effects {
        let presence_before = self.presence.state();
        let mut fx = Effects::timers(self.presence.on_frame(frame.hand_present));
        fx.changed = self.presence.state() != presence_before;

        // A label without a hand is inconsistent input; treat it as empty.
        let label = frame.label.as_ref().filter(|_| frame.hand_present);

        let live = label.map(|l| l.as_str().to_owned());
        if live != self.live_label {
            self.live_label = live;
            fx.changed = true;
        }

        if !frame.hand_present {
            return fx;
        }

        if let Some(commit) = self.debouncer.observe(label) {
            self.buffer.append_letter(&commit.label);
            log::info!(
                "session: committed {} -> {:?}",
                commit.label,
                self.buffer.current_text()
            );
            self.refresh_suggestions();
            fx.changed = true;
        }

        fx
    }

    /// The space timer fired.
    pub fn on_space_timer(&mut self) -> Effects {
        let mut fx = Effects::default();
        if !self.presence.on_space_timer() {
            return fx;
        }

        if self.buffer.append_space() {
            log::info!("session: hand away, inserted space");
            self.refresh_suggestions();
        }
        // The next word starts from a fresh streak, even for the same letter.
        self.debouncer.interrupt();
        self.debouncer.forget_commit();
        fx.changed = true;
        fx
    }

    /// The inactivity timer fired: full session reset.
    pub fn on_inactivity_timer(&mut self) -> Effects {
        log::info!("session: inactive, clearing sentence");
        let timers = self.presence.on_inactivity_timer();
        self.clear();
        Effects {
            timers,
            changed: true,
        }
    }

    /// Explicit reset from the UI.  Idempotent.
    pub fn reset(&mut self) -> Effects {
        log::info!("session: reset");
        let timers = self.presence.reset();
        self.clear();
        Effects {
            timers,
            changed: true,
        }
    }

    /// Accept `word` if it is one of the current suggestions
    /// (case-insensitive).  Anything else is a no-op.
    pub fn accept_suggestion(&mut self, word: &str) -> Effects {
        let word = word.trim();
        let Some(found) = self
            .suggestions
            .iter()
            .find(|s| s.eq_ignore_ascii_case(word))
            .cloned()
        else {
            log::debug!("session: ignoring accept of {word:?}; current suggestions {:?}", self.suggestions);
            return Effects::default();
        };

        self.buffer.append_word(&found.to_uppercase());
        self.debouncer.forget_commit();
        log::info!("session: accepted {found:?} -> {:?}", self.buffer.current_text());
        self.refresh_suggestions();

        Effects {
            timers: self.presence.on_activity(),
            changed: true,
        }
    }

    /// Accept the suggestion at `index` (0 = best).  Out of range is a no-op.
    pub fn accept_suggestion_at(&mut self, index: usize) -> Effects {
        match self.suggestions.get(index).cloned() {
            Some(word) => self.accept_suggestion(&word),
            None => {
                log::debug!("session: no suggestion at index {index}");
                Effects::default()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn view(&self) -> SessionView {
        SessionView {
            sentence: self.buffer.current_text().to_owned(),
            live_label: self.live_label.clone(),
            suggestions: self.suggestions.clone(),
            presence: self.presence.state(),
            suggestions_available: self.engine.is_available(),
        }
    }

    pub fn sentence(&self) -> &str {
        self.buffer.current_text()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn presence(&self) -> PresenceState {
        self.presence.state()
    }

    pub fn debouncer(&self) -> &LetterDebouncer {
        &self.debouncer
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn refresh_suggestions(&mut self) {
        self.suggestions = self.engine.suggest(self.buffer.current_text());
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.debouncer.reset();
        self.live_label = None;
        self.suggestions.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
