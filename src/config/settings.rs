//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.
//! Every field has a default, so a partial `settings.toml` is valid.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::spelling::{Alphabet, DEFAULT_COMMIT_THRESHOLD};
use crate::suggest::DEFAULT_MAX_SUGGESTIONS;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Timing of the sentence-assembly state machine.
///
/// | Field                   | Default | Meaning                                  |
/// |-------------------------|---------|------------------------------------------|
/// | `commit_threshold`      | 10      | identical frames before a letter commits |
/// | `space_delay_ms`        | 3000    | hand-absent time before a space          |
/// | `inactivity_timeout_ms` | 8000    | idle time before a full reset            |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub commit_threshold: u32,
    pub space_delay_ms: u64,
    pub inactivity_timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            commit_threshold: DEFAULT_COMMIT_THRESHOLD,
            space_delay_ms: 3_000,
            inactivity_timeout_ms: 8_000,
        }
    }
}

impl SessionConfig {
    pub fn space_delay(&self) -> Duration {
        Duration::from_millis(self.space_delay_ms)
    }

    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_millis(self.inactivity_timeout_ms)
    }

    /// Replace out-of-range values with usable ones and describe what was
    /// changed or looks suspicious.
    fn validate(&mut self) -> Vec<String> {
        let defaults = Self::default();
        let mut warnings = Vec::new();

        if self.commit_threshold == 0 {
            warnings.push("session.commit_threshold must be at least 1; using 1".to_string());
            self.commit_threshold = 1;
        }
        if self.space_delay_ms == 0 {
            warnings.push(format!(
                "session.space_delay_ms must be positive; using {}",
                defaults.space_delay_ms
            ));
            self.space_delay_ms = defaults.space_delay_ms;
        }
        if self.inactivity_timeout_ms == 0 {
            warnings.push(format!(
                "session.inactivity_timeout_ms must be positive; using {}",
                defaults.inactivity_timeout_ms
            ));
            self.inactivity_timeout_ms = defaults.inactivity_timeout_ms;
        }
        if self.inactivity_timeout_ms <= self.space_delay_ms {
            warnings.push(format!(
                "session.inactivity_timeout_ms ({}) is not longer than space_delay_ms ({}); \
                 the sentence will be cleared before a space is inserted",
                self.inactivity_timeout_ms, self.space_delay_ms
            ));
        }
        warnings
    }
}

// ---------------------------------------------------------------------------
// SuggestConfig
// ---------------------------------------------------------------------------

/// Where the n-gram tables come from and how many suggestions to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    /// Disable to skip table loading entirely.
    pub enabled: bool,
    pub max_suggestions: usize,
    /// File path or `http(s)://` URL.  `None` means the default file under
    /// the data directory.
    pub bigram: Option<String>,
    pub trigram: Option<String>,
    /// Maximum seconds to wait for an HTTP table download.
    pub timeout_secs: u64,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            bigram: None,
            trigram: None,
            timeout_secs: 10,
        }
    }
}

impl SuggestConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Bigram location, falling back to `<data_dir>/ngrams/bigram.json`.
    pub fn bigram_location(&self, paths: &AppPaths) -> String {
        self.bigram
            .clone()
            .unwrap_or_else(|| paths.bigram_file.display().to_string())
    }

    /// Trigram location, falling back to `<data_dir>/ngrams/trigram.json`.
    pub fn trigram_location(&self, paths: &AppPaths) -> String {
        self.trigram
            .clone()
            .unwrap_or_else(|| paths.trigram_file.display().to_string())
    }
}

// ---------------------------------------------------------------------------
// AlphabetConfig
// ---------------------------------------------------------------------------

/// Label set of the pose classifier, in model output order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphabetConfig {
    pub labels: Vec<String>,
    /// Scores below this are treated as "no label" (0.0 accepts everything).
    pub min_confidence: f32,
}

impl Default for AlphabetConfig {
    fn default() -> Self {
        Self {
            labels: ('A'..='Z').map(String::from).collect(),
            min_confidence: 0.0,
        }
    }
}

impl AlphabetConfig {
    pub fn alphabet(&self) -> Alphabet {
        Alphabet::from_labels(&self.labels)
    }

    fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.alphabet().is_empty() {
            warnings.push("alphabet.labels is empty; using A-Z".to_string());
            self.labels = Self::default().labels;
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            warnings.push(format!(
                "alphabet.min_confidence {} is outside 0.0-1.0; using 0.0",
                self.min_confidence
            ));
            self.min_confidence = 0.0;
        }
        warnings
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use fingerspell::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Debounce threshold and presence timers.
    pub session: SessionConfig,
    /// N-gram table locations and suggestion count.
    pub suggest: SuggestConfig,
    /// Classifier label set.
    pub alphabet: AlphabetConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    ///
    /// Out-of-range values are replaced and reported with `log::warn!`.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        for warning in config.validate() {
            log::warn!("config: {warning}");
        }
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Clamp invalid values in place.  Returns one message per adjustment
    /// or suspicious combination.
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = self.session.validate();
        warnings.extend(self.alphabet.validate());
        let max = self.suggest.max_suggestions;
        if !(1..=DEFAULT_MAX_SUGGESTIONS).contains(&max) {
            let clamped = max.clamp(1, DEFAULT_MAX_SUGGESTIONS);
            warnings.push(format!(
                "suggest.max_suggestions {max} is outside 1-{DEFAULT_MAX_SUGGESTIONS}; using {clamped}"
            ));
            self.suggest.max_suggestions = clamped;
        }
        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
