//! Asynchronous acquisition of n-gram tables.
//!
//! Tables are loaded exactly once, before the session loop starts.  Any
//! [`TableSource`] can be used; [`load_tables`] wraps two of them and never
//! fails: a table that cannot be loaded is replaced by an empty one and the
//! failure is logged, so the suggestion engine degrades to empty output
//! instead of taking the frame loop down.
//!
//! | Source | Location |
//! |--------|----------|
//! | [`FileTableSource`] | local JSON file |
//! | [`HttpTableSource`] | `http(s)://` URL serving the same JSON |
//! | [`StaticTableSource`] | JSON already in memory |

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use super::table::{NGramTable, NGramTables, TableError};

// ---------------------------------------------------------------------------
// TableSource trait
// ---------------------------------------------------------------------------

/// Something that can produce one [`NGramTable`].
///
/// Implementors must be `Send + Sync` so they can be boxed and shared.
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Human-readable location used in log messages.
    fn describe(&self) -> String;

    async fn load(&self) -> Result<NGramTable, TableError>;
}

// ---------------------------------------------------------------------------
// FileTableSource
// ---------------------------------------------------------------------------

/// Reads a JSON table from disk with `tokio::fs`.
pub struct FileTableSource {
    path: PathBuf,
}

impl FileTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TableSource for FileTableSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<NGramTable, TableError> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| TableError::Io {
                path: self.path.clone(),
                source,
            })?;
        NGramTable::from_json_str(&json)
    }
}

// ---------------------------------------------------------------------------
// HttpTableSource
// ---------------------------------------------------------------------------

/// Fetches a JSON table over HTTP(S).
pub struct HttpTableSource {
    client: reqwest::Client,
    url: String,
}

impl HttpTableSource {
    /// Build a source whose requests time out after `timeout`.
    ///
    /// A default (no-timeout) client is used as a last-resort fallback if the
    /// builder fails.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl TableSource for HttpTableSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn load(&self) -> Result<NGramTable, TableError> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let json = response.text().await?;
        NGramTable::from_json_str(&json)
    }
}

// ---------------------------------------------------------------------------
// StaticTableSource
// ---------------------------------------------------------------------------

/// Serves a JSON table held in memory (embedded resources, tests).
pub struct StaticTableSource {
    name: String,
    json: String,
}

impl StaticTableSource {
    pub fn new(name: impl Into<String>, json: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            json: json.into(),
        }
    }
}

#[async_trait]
impl TableSource for StaticTableSource {
    fn describe(&self) -> String {
        format!("<{}>", self.name)
    }

    async fn load(&self) -> Result<NGramTable, TableError> {
        NGramTable::from_json_str(&self.json)
    }
}

// ---------------------------------------------------------------------------
// Location parsing
// ---------------------------------------------------------------------------

/// Pick a source for `location`: URLs go over HTTP, everything else is a
/// file path.
pub fn source_for(location: &str, timeout: Duration) -> Box<dyn TableSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpTableSource::new(location, timeout))
    } else {
        Box::new(FileTableSource::new(location))
    }
}

// ---------------------------------------------------------------------------
// load_tables
// ---------------------------------------------------------------------------

/// Load one table, substituting an empty table on failure.
pub async fn load_or_empty(source: &dyn TableSource) -> NGramTable {
    match source.load().await {
        Ok(table) => {
            log::info!(
                "suggest: loaded {} contexts from {}",
                table.len(),
                source.describe()
            );
            table
        }
        Err(e) => {
            log::warn!(
                "suggest: could not load n-gram table from {} ({e}); suggestions from it are disabled",
                source.describe()
            );
            NGramTable::empty()
        }
    }
}

/// Load the bigram and trigram tables concurrently.  Never fails.
pub async fn load_tables(bigram: &dyn TableSource, trigram: &dyn TableSource) -> NGramTables {
    let (bigram, trigram) = tokio::join!(load_or_empty(bigram), load_or_empty(trigram));
    NGramTables::new(bigram, trigram)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn file_source_reads_json() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("bigram.json");
        std::fs::write(&path, r#"{"am": {"happy": 2}}"#).unwrap();

        let table = FileTableSource::new(&path).load().await.unwrap();
        assert_eq!(table.candidates("am"), &[("happy".to_string(), 2u64)]);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempdir().expect("temp dir");
        let err = FileTableSource::new(dir.path().join("nope.json"))
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, TableError::Io { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[tokio::test]
    async fn static_source_parses_json() {
        let table = StaticTableSource::new("trigram", r#"{"i am": {"fine": 5}}"#)
            .load()
            .await
            .unwrap();
        assert_eq!(table.len(), 1);
    }

    #[tokio::test]
    async fn load_or_empty_swallows_errors() {
        let broken = StaticTableSource::new("broken", "not json");
        let table = load_or_empty(&broken).await;
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn load_tables_degrades_per_table() {
        let bigram = StaticTableSource::new("bigram", r#"{"am": {"happy": 2}}"#);
        let trigram = StaticTableSource::new("trigram", "[1, 2");
        let tables = load_tables(&bigram, &trigram).await;
        assert_eq!(tables.bigram.len(), 1);
        assert!(tables.trigram.is_empty());
        assert!(!tables.is_empty());
    }

    #[tokio::test]
    async fn unreachable_http_source_degrades_to_empty() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let source = HttpTableSource::new("http://127.0.0.1:9/bigram.json", Duration::from_secs(2));
        let table = load_or_empty(&source).await;
        assert!(table.is_empty());
    }

    #[test]
    fn source_for_picks_http_for_urls() {
        let timeout = Duration::from_secs(1);
        assert_eq!(
            source_for("https://example.com/t.json", timeout).describe(),
            "https://example.com/t.json"
        );
        assert_eq!(source_for("/tmp/t.json", timeout).describe(), "/tmp/t.json");
    }
}
