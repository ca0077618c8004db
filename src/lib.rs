//! Fingerspelling sentence assembly.
//!
//! Turns a noisy per-frame hand-pose classification stream into a stable,
//! auto-spaced sentence with next-word suggestions.
//!
//! - [`spelling`]: labels, the letter debouncer and the sentence buffer.
//! - [`suggest`]: n-gram tables and the suggestion engine.
//! - [`classify`]: landmark features and the classifier seam.
//! - [`pipeline`]: presence supervision, timers and the session event loop.
//! - [`config`]: `settings.toml` persistence.
//! - [`host`]: the JSON-lines protocol of the binary.

pub mod classify;
pub mod config;
pub mod host;
pub mod pipeline;
pub mod spelling;
pub mod suggest;
