//! Append-only sentence accumulator.

use super::label::Label;

/// Text assembled from committed letters, accepted words and inserted spaces.
///
/// Spaces are normalised on the way in: the buffer never contains two
/// consecutive spaces and never starts with one.
///
/// ```
/// use fingerspell::spelling::{Label, SentenceBuffer};
///
/// let mut buf = SentenceBuffer::new();
/// buf.append_letter(&Label::new("H"));
/// buf.append_letter(&Label::new("I"));
/// buf.append_space();
/// buf.append_space();
/// buf.append_word("there");
/// assert_eq!(buf.current_text(), "HI there ");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceBuffer {
    text: String,
}

impl SentenceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a committed label with no separator.
    pub fn append_letter(&mut self, label: &Label) {
        self.text.push_str(label.as_str());
    }

    /// Append `word` followed by exactly one space.
    ///
    /// A separating space is inserted first when the buffer holds text that
    /// does not already end in a space.  Blank words are ignored.
    pub fn append_word(&mut self, word: &str) {
        let word = word.trim();
        if word.is_empty() {
            return;
        }
        self.append_space();
        self.text.push_str(word);
        self.text.push(' ');
    }

    /// Append a single space unless the buffer is empty or already ends in
    /// one.  Returns `true` when a space was added.
    pub fn append_space(&mut self) -> bool {
        if self.text.is_empty() || self.ends_with_space() {
            return false;
        }
        self.text.push(' ');
        true
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn current_text(&self) -> &str {
        &self.text
    }

    pub fn ends_with_space(&self) -> bool {
        self.text.ends_with(' ')
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(buf: &mut SentenceBuffer, text: &str) {
        for c in text.chars() {
            buf.append_letter(&Label::new(c.to_string()));
        }
    }

    #[test]
    fn letters_concatenate_without_separator() {
        let mut buf = SentenceBuffer::new();
        letters(&mut buf, "HELLO");
        assert_eq!(buf.current_text(), "HELLO");
    }

    #[test]
    fn repeated_spaces_collapse() {
        let mut buf = SentenceBuffer::new();
        letters(&mut buf, "HI");
        assert!(buf.append_space());
        for _ in 0..5 {
            assert!(!buf.append_space());
        }
        assert_eq!(buf.current_text(), "HI ");
    }

    #[test]
    fn space_on_empty_buffer_is_ignored() {
        let mut buf = SentenceBuffer::new();
        assert!(!buf.append_space());
        assert!(buf.is_empty());
    }

    #[test]
    fn word_after_letters_gets_separator() {
        let mut buf = SentenceBuffer::new();
        letters(&mut buf, "I");
        buf.append_word("AM");
        assert_eq!(buf.current_text(), "I AM ");
    }

    #[test]
    fn word_after_space_does_not_double_space() {
        let mut buf = SentenceBuffer::new();
        letters(&mut buf, "I");
        buf.append_space();
        buf.append_word("AM");
        buf.append_word("FINE");
        assert_eq!(buf.current_text(), "I AM FINE ");
    }

    #[test]
    fn word_on_empty_buffer_has_no_leading_space() {
        let mut buf = SentenceBuffer::new();
        buf.append_word("HELLO");
        assert_eq!(buf.current_text(), "HELLO ");
    }

    #[test]
    fn blank_word_is_ignored() {
        let mut buf = SentenceBuffer::new();
        letters(&mut buf, "A");
        buf.append_word("   ");
        assert_eq!(buf.current_text(), "A");
    }

    #[test]
    fn clear_empties_text() {
        let mut buf = SentenceBuffer::new();
        letters(&mut buf, "ABC");
        buf.clear();
        assert_eq!(buf.current_text(), "");
        assert!(!buf.ends_with_space());
    }
}
