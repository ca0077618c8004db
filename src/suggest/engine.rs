//! Next-word suggestion lookup.
//!
//! [`SuggestionEngine::suggest`] is a pure function of the sentence text and
//! the static [`NGramTables`]:
//!
//! 1. Tokenize: lower-case, drop characters outside the alphabet (keeping
//!    whitespace), split on whitespace.
//! 2. With ≥ 2 tokens, look up the trigram table with the last two tokens.
//! 3. If that yields nothing and there is ≥ 1 token, look up the bigram table
//!    with the last token.
//! 4. Return the first `max_suggestions` candidates (count descending, ties
//!    lexicographic).
//!
//! There is no unigram fallback: an unknown context yields no suggestions.

use crate::spelling::Alphabet;

use super::table::NGramTables;

/// Default number of suggestions returned per lookup.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

// ---------------------------------------------------------------------------
// tokenize
// ---------------------------------------------------------------------------

/// Split `text` into lower-case word tokens made only of alphabet characters.
///
/// ```
/// use fingerspell::spelling::Alphabet;
/// use fingerspell::suggest::tokenize;
///
/// let tokens = tokenize("HELLO, World!  i'm", &Alphabet::latin());
/// assert_eq!(tokens, vec!["hello", "world", "im"]);
/// ```
pub fn tokenize(text: &str, alphabet: &Alphabet) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|&c| c.is_whitespace() || alphabet.accepts_char(c))
        .collect();

    cleaned.split_whitespace().map(str::to_owned).collect()
}

// ---------------------------------------------------------------------------
// SuggestionEngine
// ---------------------------------------------------------------------------

/// Read-only trigram → bigram lookup over loaded tables.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    tables: NGramTables,
    alphabet: Alphabet,
    max_suggestions: usize,
}

impl SuggestionEngine {
    pub fn new(tables: NGramTables, alphabet: Alphabet) -> Self {
        Self {
            tables,
            alphabet,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    /// An engine with no tables; [`suggest`](Self::suggest) always returns
    /// an empty list.
    pub fn disabled(alphabet: Alphabet) -> Self {
        Self::new(NGramTables::empty(), alphabet)
    }

    /// Limit the number of suggestions, clamped to `1..=3`.
    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max.clamp(1, DEFAULT_MAX_SUGGESTIONS);
        self
    }

    /// Top candidates for the word following `sentence`.
    pub fn suggest(&self, sentence: &str) -> Vec<String> {
        if self.tables.is_empty() {
            return Vec::new();
        }

        let tokens = tokenize(sentence, &self.alphabet);
        let n = tokens.len();

        let mut ranked: &[(String, u64)] = &[];
        if n >= 2 {
            let key = format!("{} {}", tokens[n - 2], tokens[n - 1]);
            ranked = self.tables.trigram.candidates(&key);
        }
        if ranked.is_empty() && n >= 1 {
            ranked = self.tables.bigram.candidates(&tokens[n - 1]);
        }

        ranked
            .iter()
            .take(self.max_suggestions)
            .map(|(word, _)| word.clone())
            .collect()
    }

    /// `true` when at least one table holds entries.
    pub fn is_available(&self) -> bool {
        !self.tables.is_empty()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::NGramTable;

    fn engine(bigram: &str, trigram: &str) -> SuggestionEngine {
        let tables = NGramTables::new(
            NGramTable::from_json_str(bigram).unwrap(),
            NGramTable::from_json_str(trigram).unwrap(),
        );
        SuggestionEngine::new(tables, Alphabet::latin())
    }

    // ---- tokenize ---

    #[test]
    fn tokenize_strips_non_alphabet_characters() {
        let alphabet = Alphabet::latin();
        assert_eq!(tokenize("I AM 42 ok?", &alphabet), vec!["i", "am", "ok"]);
        assert!(tokenize("   ", &alphabet).is_empty());
        assert!(tokenize("", &alphabet).is_empty());
    }

    // ---- lookup ---

    #[test]
    fn trigram_hit_sorted_by_frequency() {
        let e = engine("{}", r#"{"i am": {"fine": 5, "happy": 3}}"#);
        assert_eq!(e.suggest("i am"), vec!["fine", "happy"]);
    }

    #[test]
    fn lookup_is_case_and_space_insensitive() {
        let e = engine("{}", r#"{"i am": {"fine": 5, "happy": 3}}"#);
        assert_eq!(e.suggest("  I   AM "), vec!["fine", "happy"]);
    }

    #[test]
    fn falls_back_to_bigram_when_trigram_misses() {
        let e = engine(r#"{"am": {"happy": 2}}"#, r#"{"you are": {"here": 1}}"#);
        assert_eq!(e.suggest("HELLO I AM"), vec!["happy"]);
    }

    #[test]
    fn single_token_uses_bigram() {
        let e = engine(r#"{"am": {"happy": 2}}"#, r#"{"i am": {"fine": 5}}"#);
        assert_eq!(e.suggest("AM"), vec!["happy"]);
    }

    #[test]
    fn trigram_hit_shadows_bigram() {
        let e = engine(r#"{"am": {"happy": 2}}"#, r#"{"i am": {"fine": 5}}"#);
        assert_eq!(e.suggest("I AM"), vec!["fine"]);
    }

    #[test]
    fn returns_at_most_three() {
        let e = engine(r#"{"the": {"a": 9, "b": 8, "c": 7, "d": 6, "e": 5}}"#, "{}");
        assert_eq!(e.suggest("THE"), vec!["a", "b", "c"]);
    }

    #[test]
    fn max_suggestions_is_configurable() {
        let e = engine(r#"{"the": {"a": 9, "b": 8, "c": 7}}"#, "{}").with_max_suggestions(1);
        assert_eq!(e.suggest("THE"), vec!["a"]);
    }

    #[test]
    fn max_suggestions_never_exceeds_three() {
        let e = engine(r#"{"the": {"a": 9, "b": 8, "c": 7, "d": 6, "e": 5}}"#, "{}")
            .with_max_suggestions(10);
        assert_eq!(e.suggest("THE"), vec!["a", "b", "c"]);
        let e = e.with_max_suggestions(0);
        assert_eq!(e.suggest("THE"), vec!["a"]);
    }

    #[test]
    fn no_unigram_fallback() {
        let e = engine(r#"{"am": {"happy": 2}}"#, "{}");
        assert!(e.suggest("UNKNOWN").is_empty());
        assert!(e.suggest("").is_empty());
    }

    #[test]
    fn trailing_space_does_not_change_context() {
        let e = engine(r#"{"am": {"happy": 2}}"#, "{}");
        assert_eq!(e.suggest("AM"), e.suggest("AM "));
    }

    #[test]
    fn same_text_gives_same_suggestions() {
        let e = engine(
            r#"{"am": {"happy": 2, "sad": 2, "ok": 2}}"#,
            r#"{"i am": {"fine": 5}}"#,
        );
        for text in ["I AM", "AM", "YOU AM", ""] {
            assert_eq!(e.suggest(text), e.suggest(text));
        }
        assert_eq!(e.suggest("YOU AM"), vec!["happy", "ok", "sad"]);
    }

    #[test]
    fn disabled_engine_is_always_empty() {
        let e = SuggestionEngine::disabled(Alphabet::latin());
        assert!(!e.is_available());
        assert!(e.suggest("I AM").is_empty());
    }
}
