//! N-gram based next-word suggestions.
//!
//! This module provides:
//! * [`NGramTable`] / [`NGramTables`] — immutable ranked frequency tables.
//! * [`SuggestionEngine`] — trigram → bigram lookup over the current sentence.
//! * [`TableSource`] — async trait for acquiring a table, with
//!   [`FileTableSource`], [`HttpTableSource`] and [`StaticTableSource`].
//! * [`load_tables`] — loads both tables, degrading to empty on failure.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use fingerspell::spelling::Alphabet;
//! use fingerspell::suggest::{load_tables, FileTableSource, SuggestionEngine};
//!
//! #[tokio::main]
//! async fn main() {
//!     let tables = load_tables(
//!         &FileTableSource::new("ngrams/bigram.json"),
//!         &FileTableSource::new("ngrams/trigram.json"),
//!     )
//!     .await;
//!
//!     let engine = SuggestionEngine::new(tables, Alphabet::latin());
//!     println!("{:?}", engine.suggest("I AM"));
//! }
//! ```

pub mod engine;
pub mod source;
pub mod table;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use engine::{tokenize, SuggestionEngine, DEFAULT_MAX_SUGGESTIONS};
pub use source::{
    load_or_empty, load_tables, source_for, FileTableSource, HttpTableSource, StaticTableSource,
    TableSource,
};
pub use table::{normalize_context, NGramTable, NGramTables, TableError};
