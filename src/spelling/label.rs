//! Recognised hand-pose labels and the finite alphabet they come from.
//!
//! The reference alphabet is the 26 Latin letters, but nothing downstream
//! depends on that: the debouncer, sentence buffer and tokenizer only ever ask
//! the [`Alphabet`] which labels and characters are valid.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// One classifier output class, e.g. `"A"`.
///
/// Labels are compared by their exact text.  Construct them through
/// [`Alphabet::parse`] or [`Alphabet::get`] so only members of the configured
/// set ever reach the debouncer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Alphabet
// ---------------------------------------------------------------------------

/// The ordered, finite set of labels a classifier can emit.
///
/// Order matters: index `i` of a classifier's score vector maps to
/// `alphabet.get(i)`.
///
/// ```
/// use fingerspell::spelling::Alphabet;
///
/// let alphabet = Alphabet::latin();
/// assert_eq!(alphabet.len(), 26);
/// assert_eq!(alphabet.get(0).unwrap().as_str(), "A");
/// assert_eq!(alphabet.parse("z").unwrap().as_str(), "Z");
/// assert!(alphabet.parse("?").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    labels: Vec<Label>,
    /// Lower-cased characters appearing in any label; drives tokenization.
    chars: BTreeSet<char>,
}

impl Alphabet {
    /// Build an alphabet from label strings.  Blank and duplicate entries are
    /// skipped so the index mapping stays unambiguous.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<Label> = Vec::new();
        for raw in labels {
            let text = raw.as_ref().trim();
            if text.is_empty() || out.iter().any(|l| l.as_str() == text) {
                continue;
            }
            out.push(Label::new(text));
        }

        let chars = out
            .iter()
            .flat_map(|l| l.as_str().chars())
            .flat_map(char::to_lowercase)
            .collect();

        Self { labels: out, chars }
    }

    /// The 26-letter reference alphabet `A`..=`Z`.
    pub fn latin() -> Self {
        Self::from_labels(('A'..='Z').map(String::from))
    }

    /// Label at classifier output index `index`.
    pub fn get(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    /// Case-insensitive lookup of `text` in the alphabet.
    pub fn parse(&self, text: &str) -> Option<Label> {
        let text = text.trim();
        self.labels
            .iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(text))
            .cloned()
    }

    /// Returns `true` when `c` (in any case) occurs in some label.
    pub fn accepts_char(&self, c: char) -> bool {
        c.to_lowercase().all(|lc| self.chars.contains(&lc))
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::latin()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_alphabet_is_ordered() {
        let alphabet = Alphabet::latin();
        assert_eq!(alphabet.len(), 26);
        assert_eq!(alphabet.get(0), Some(&Label::new("A")));
        assert_eq!(alphabet.get(25), Some(&Label::new("Z")));
        assert_eq!(alphabet.get(26), None);
    }

    #[test]
    fn parse_is_case_insensitive() {
        let alphabet = Alphabet::latin();
        assert_eq!(alphabet.parse("q"), Some(Label::new("Q")));
        assert_eq!(alphabet.parse(" Q "), Some(Label::new("Q")));
        assert_eq!(alphabet.parse("AB"), None);
        assert_eq!(alphabet.parse(""), None);
    }

    #[test]
    fn from_labels_skips_blank_and_duplicate_entries() {
        let alphabet = Alphabet::from_labels(["A", "", "B", "A", "  "]);
        assert_eq!(alphabet.len(), 2);
        assert_eq!(alphabet.get(1), Some(&Label::new("B")));
    }

    #[test]
    fn accepts_char_uses_label_characters() {
        let alphabet = Alphabet::from_labels(["A", "B", "Ñ"]);
        assert!(alphabet.accepts_char('a'));
        assert!(alphabet.accepts_char('B'));
        assert!(alphabet.accepts_char('ñ'));
        assert!(!alphabet.accepts_char('c'));
        assert!(!alphabet.accepts_char('1'));
    }

    #[test]
    fn label_displays_its_text() {
        assert_eq!(Label::new("K").to_string(), "K");
    }
}
