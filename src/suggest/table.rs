//! Immutable n-gram frequency tables.
//!
//! A table maps a context (one lower-case word for bigrams, two
//! space-separated words for trigrams) to the words observed after it and
//! their counts.  The on-disk format is plain JSON:
//!
//! ```json
//! { "i am": { "fine": 5, "happy": 3 }, "how are": { "you": 12 } }
//! ```
//!
//! Candidates are ranked once at load time (count descending, then word
//! ascending) so lookups on the frame path are a single hash probe.

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// TableError
// ---------------------------------------------------------------------------

/// Errors that can occur while acquiring an n-gram table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The table file could not be read.
    #[error("failed to read n-gram table {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload was not a `{ context: { word: count } }` JSON object.
    #[error("failed to parse n-gram table: {0}")]
    Parse(#[from] serde_json::Error),

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("n-gram table request timed out")]
    Timeout,

    /// The server answered with a non-success status code.
    #[error("n-gram table server returned HTTP {0}")]
    Status(u16),
}

impl From<reqwest::Error> for TableError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TableError::Timeout
        } else if let Some(status) = e.status() {
            TableError::Status(status.as_u16())
        } else {
            TableError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// NGramTable
// ---------------------------------------------------------------------------

/// Context → ranked candidate list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NGramTable {
    entries: HashMap<String, Vec<(String, u64)>>,
}

impl NGramTable {
    /// An empty table; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from raw counts.
    ///
    /// Contexts are lower-cased with whitespace collapsed to single spaces;
    /// words are lower-cased and trimmed.  Counts for keys that collide after
    /// normalisation are summed.  Blank contexts, blank words, words that
    /// contain whitespace and zero counts are dropped.
    pub fn from_counts<C, W, S>(counts: C) -> Self
    where
        C: IntoIterator<Item = (S, W)>,
        W: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut merged: HashMap<String, HashMap<String, u64>> = HashMap::new();
        let mut dropped = 0usize;

        for (context, words) in counts {
            let context = normalize_context(context.as_ref());
            if context.is_empty() {
                dropped += 1;
                continue;
            }
            for (word, count) in words {
                let word = word.as_ref().trim().to_lowercase();
                if word.is_empty() || word.contains(char::is_whitespace) || count == 0 {
                    dropped += 1;
                    continue;
                }
                *merged
                    .entry(context.clone())
                    .or_default()
                    .entry(word)
                    .or_default() += count;
            }
        }

        if dropped > 0 {
            log::warn!("suggest: dropped {dropped} malformed n-gram entries");
        }

        let entries = merged
            .into_iter()
            .map(|(context, words)| {
                let mut ranked: Vec<(String, u64)> = words.into_iter().collect();
                ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                (context, ranked)
            })
            .collect();

        Self { entries }
    }

    /// Parse the JSON table format.
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let raw: HashMap<String, HashMap<String, u64>> = serde_json::from_str(json)?;
        Ok(Self::from_counts(raw))
    }

    /// Ranked candidates following `context`, or an empty slice.
    ///
    /// `context` must already be normalised (see [`normalize_context`]).
    pub fn candidates(&self, context: &str) -> &[(String, u64)] {
        self.entries.get(context).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct contexts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lower-case `context` and collapse runs of whitespace to one space.
pub fn normalize_context(context: &str) -> String {
    context
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// NGramTables
// ---------------------------------------------------------------------------

/// The bigram and trigram tables consulted by the suggestion engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NGramTables {
    /// One-word context → next word.
    pub bigram: NGramTable,
    /// Two-word context → next word.
    pub trigram: NGramTable,
}

impl NGramTables {
    pub fn new(bigram: NGramTable, trigram: NGramTable) -> Self {
        Self { bigram, trigram }
    }

    /// Both tables empty; suggestions will always be empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.bigram.is_empty() && self.trigram.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn words(c: &[(&str, u64)]) -> Vec<(String, u64)> {
        c.iter().map(|(w, n)| (w.to_string(), *n)).collect()
    }

    #[test]
    fn parses_json_and_ranks_by_count() {
        let table = NGramTable::from_json_str(r#"{"i am": {"happy": 3, "fine": 5}}"#).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.candidates("i am"), words(&[("fine", 5), ("happy", 3)]).as_slice());
    }

    #[test]
    fn equal_counts_break_ties_lexicographically() {
        let table =
            NGramTable::from_json_str(r#"{"am": {"sad": 2, "happy": 2, "ok": 2, "here": 9}}"#)
                .unwrap();
        assert_eq!(
            table.candidates("am"),
            words(&[("here", 9), ("happy", 2), ("ok", 2), ("sad", 2)]).as_slice()
        );
    }

    #[test]
    fn keys_and_words_are_normalised_and_merged() {
        let table = NGramTable::from_json_str(
            r#"{"I  Am": {"Fine": 2}, "i am": {"fine": 1, "good": 1}}"#,
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.candidates("i am"), words(&[("fine", 3), ("good", 1)]).as_slice());
    }

    #[test]
    fn malformed_entries_are_dropped() {
        let table = NGramTable::from_json_str(
            r#"{"  ": {"x": 1}, "go": {"": 4, "two words": 2, "home": 0, "now": 1}}"#,
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.candidates("go"), words(&[("now", 1)]).as_slice());
    }

    #[test]
    fn missing_context_yields_empty_slice() {
        let table = NGramTable::empty();
        assert!(table.candidates("anything").is_empty());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = NGramTable::from_json_str(r#"{"am": ["happy"]}"#).unwrap_err();
        assert!(matches!(err, TableError::Parse(_)));
    }

    #[test]
    fn normalize_context_collapses_whitespace() {
        assert_eq!(normalize_context("  How\tARE  you "), "how are you");
        assert_eq!(normalize_context(""), "");
    }

    #[test]
    fn tables_report_emptiness() {
        assert!(NGramTables::empty().is_empty());
        let tables = NGramTables::new(
            NGramTable::from_counts([("am", [("happy", 2u64)])]),
            NGramTable::empty(),
        );
        assert!(!tables.is_empty());
    }
}
