//! JSON-lines protocol spoken by the `fingerspell` binary.
//!
//! Each stdin line is one [`HostEvent`]:
//!
//! | `type`         | Fields                                   | Becomes                      |
//! |----------------|------------------------------------------|------------------------------|
//! | `frame`        | `label?`, `hand_present?` (default true) | `FrameSignal`                |
//! | `scores`       | `scores: [f32]`                          | arg-max over the alphabet    |
//! | `reset`        |                                          | `SessionCommand::Reset`      |
//! | `accept`       | `word`                                   | `AcceptSuggestion(word)`     |
//! | `accept_index` | `index`                                  | `AcceptSuggestionAt(index)`  |
//!
//! Every published [`SessionView`](crate::pipeline::SessionView) is written
//! back as one JSON object per line.

use serde::Deserialize;

use crate::classify::decode_scores;
use crate::pipeline::{FrameSignal, SessionCommand};
use crate::spelling::Alphabet;

/// One line of host input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    Frame {
        #[serde(default)]
        label: Option<String>,
        #[serde(default = "default_true")]
        hand_present: bool,
        #[serde(default)]
        timestamp_ms: u64,
    },
    Scores {
        scores: Vec<f32>,
        #[serde(default)]
        timestamp_ms: u64,
    },
    Reset,
    Accept {
        word: String,
    },
    AcceptIndex {
        index: usize,
    },
}

fn default_true() -> bool {
    true
}

/// What a [`HostEvent`] turns into inside the session.
#[derive(Debug, Clone, PartialEq)]
pub enum HostInput {
    Frame(FrameSignal),
    Command(SessionCommand),
}

/// Converts host events using the configured label set.
#[derive(Debug, Clone)]
pub struct HostDecoder {
    alphabet: Alphabet,
    min_confidence: f32,
}

impl HostDecoder {
    pub fn new(alphabet: Alphabet, min_confidence: f32) -> Self {
        Self {
            alphabet,
            min_confidence,
        }
    }

    /// Parse one input line.  Blank lines yield `Ok(None)`.
    pub fn parse_line(&self, line: &str) -> Result<Option<HostInput>, serde_json::Error> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let event: HostEvent = serde_json::from_str(line)?;
        Ok(Some(self.decode(event)))
    }

    pub fn decode(&self, event: HostEvent) -> HostInput {
        match event {
            HostEvent::Frame {
                label,
                hand_present,
                timestamp_ms,
            } => {
                let label = label.as_deref().and_then(|text| {
                    let parsed = self.alphabet.parse(text);
                    if parsed.is_none() {
                        log::debug!("host: label {text:?} is not in the alphabet");
                    }
                    parsed
                });
                let frame = if hand_present {
                    FrameSignal::present(label)
                } else {
                    FrameSignal::absent()
                };
                HostInput::Frame(frame.at(timestamp_ms))
            }
            HostEvent::Scores {
                scores,
                timestamp_ms,
            } => {
                let label = decode_scores(&scores, &self.alphabet, self.min_confidence)
                    .map(|p| p.label);
                HostInput::Frame(FrameSignal::present(label).at(timestamp_ms))
            }
            HostEvent::Reset => HostInput::Command(SessionCommand::Reset),
            HostEvent::Accept { word } => {
                HostInput::Command(SessionCommand::AcceptSuggestion(word))
            }
            HostEvent::AcceptIndex { index } => {
                HostInput::Command(SessionCommand::AcceptSuggestionAt(index))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
