//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings):
//!   Windows: %APPDATA%\fingerspell\
//!   macOS:   ~/Library/Application Support/fingerspell/
//!   Linux:   ~/.config/fingerspell/
//!
//! Data dir (n-gram tables):
//!   Windows: %LOCALAPPDATA%\fingerspell\ngrams\
//!   macOS:   ~/Library/Application Support/fingerspell/ngrams/
//!   Linux:   ~/.local/share/fingerspell/ngrams/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Per-user data directory.
    pub data_dir: PathBuf,
    /// Directory holding the n-gram JSON tables.
    pub ngram_dir: PathBuf,
    /// Default bigram table, `ngrams/bigram.json`.
    pub bigram_file: PathBuf,
    /// Default trigram table, `ngrams/trigram.json`.
    pub trigram_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "fingerspell";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        Self::with_dirs(config_dir, data_dir)
    }

    /// Lay out the files under explicit directories.
    pub fn with_dirs(config_dir: PathBuf, data_dir: PathBuf) -> Self {
        let settings_file = config_dir.join("settings.toml");
        let ngram_dir = data_dir.join("ngrams");
        let bigram_file = ngram_dir.join("bigram.json");
        let trigram_file = ngram_dir.join("trigram.json");

        Self {
            config_dir,
            settings_file,
            data_dir,
            ngram_dir,
            bigram_file,
            trigram_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_non_empty() {
        let paths = AppPaths::new();
        assert!(paths.config_dir.to_str().is_some_and(|s| !s.is_empty()));
        assert!(paths.ngram_dir.to_str().is_some_and(|s| !s.is_empty()));
        assert!(paths
            .settings_file
            .file_name()
            .is_some_and(|n| n == "settings.toml"));
        assert!(paths.config_dir.ends_with("fingerspell"));
    }

    #[test]
    fn tables_live_under_ngram_dir() {
        let paths = AppPaths::with_dirs("/cfg".into(), "/data".into());
        assert_eq!(paths.settings_file, PathBuf::from("/cfg/settings.toml"));
        assert_eq!(paths.bigram_file, PathBuf::from("/data/ngrams/bigram.json"));
        assert_eq!(paths.trigram_file, PathBuf::from("/data/ngrams/trigram.json"));
    }
}
