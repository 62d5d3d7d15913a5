// Score data sources: where the season file comes from.
//
// The file is fetched exactly once at startup, either from disk or over
// HTTP. The `ScoreSource` trait lets the controller be tested with an
// in-memory source.

use std::path::PathBuf;

use async_trait::async_trait;
use statline_core::stats::{DataFormat, SeasonError, SeasonRow};
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },
}

/// Fetching or parsing the score file failed.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("failed to parse {location}: {source}")]
    Parse {
        location: String,
        source: SeasonError,
    },
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ScoreSource: Send + Sync {
    /// Human-readable location (path or URL) for logs and errors.
    fn describe(&self) -> String;

    /// Fetch the raw bytes of the score file.
    async fn fetch(&self) -> Result<Vec<u8>, SourceError>;
}

// ---------------------------------------------------------------------------
// Implementations
// ---------------------------------------------------------------------------

/// Score file on the local filesystem.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

#[async_trait]
impl ScoreSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| SourceError::Io {
                path: self.path.clone(),
                source: e,
            })
    }
}

/// Score file served over HTTP(S). Any non-2xx status is an error.
pub struct HttpSource {
    url: String,
    http: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        HttpSource {
            url: url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured client (timeouts, proxy settings).
    pub fn with_client(url: impl Into<String>, http: reqwest::Client) -> Self {
        HttpSource {
            url: url.into(),
            http,
        }
    }
}

#[async_trait]
impl ScoreSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        let http_err = |e: reqwest::Error| SourceError::Http {
            url: self.url.clone(),
            source: e,
        };
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(http_err)?;
        let bytes = response.bytes().await.map_err(http_err)?;
        Ok(bytes.to_vec())
    }
}

/// In-memory score file, for tests and embedding.
pub struct StaticSource {
    name: String,
    bytes: Vec<u8>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        StaticSource {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl ScoreSource for StaticSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        Ok(self.bytes.clone())
    }
}

// ---------------------------------------------------------------------------
// Construction / loading
// ---------------------------------------------------------------------------

/// Pick a source for a configured location: `http://` and `https://` URLs go
/// over the network, everything else is a file path.
pub fn source_from_location(location: &str) -> Box<dyn ScoreSource> {
    let lower = location.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Fetch and parse the score file.
pub async fn load_rows(
    source: &dyn ScoreSource,
    format: DataFormat,
) -> Result<Vec<SeasonRow>, LoadError> {
    let location = source.describe();
    info!("Loading season rows from {} ({:?})", location, format);

    let bytes = source.fetch().await?;
    debug!("Fetched {} bytes from {}", bytes.len(), location);

    format
        .parse(&bytes)
        .map_err(|e| LoadError::Parse { location, source: e })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
