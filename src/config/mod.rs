//! Configuration module.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the session
//! timing, suggestion tables and classifier alphabet, `AppPaths` for
//! cross-platform directories, and TOML persistence via `AppConfig::load` /
//! `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AlphabetConfig, AppConfig, SessionConfig, SuggestConfig};
