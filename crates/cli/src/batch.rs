use reqwest::{StatusCode, Url};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The only failure the conversion reports. Decoding, tokenizing and
/// mapping cannot fail; reading the bytes can.
#[derive(Debug, Error)]
pub enum BatchReadFailure {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("fetching {url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

/// What to do with the rest of a batch once one source fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abandon the batch, discarding records from sources already read.
    #[default]
    FailFast,
    /// Keep records from readable sources and report every failure.
    KeepGoing,
}

/// A statement to convert: a local file or the sample file on a web server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Url(String),
}

impl InputSource {
    /// `http://` and `https://` arguments are URLs; anything else is a path.
    pub fn parse(arg: &str) -> Self {
        let lower = arg.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            InputSource::Url(arg.to_string())
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }

    /// Provenance label written to the memo column: the file name.
    pub fn label(&self) -> String {
        match self {
            InputSource::File(path) => file_name(path),
            InputSource::Url(url) => url_file_name(url),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::File(path) => write!(f, "{}", path.display()),
            InputSource::Url(url) => f.write_str(url),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn url_file_name(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
                .filter(|s| !s.is_empty())
                .or_else(|| u.host_str().map(str::to_string))
        })
        .unwrap_or_else(|| url.to_string())
}

/// Reads raw bytes for a source. One instance serves a whole batch.
#[derive(Debug, Clone, Default)]
pub struct SourceReader {
    client: reqwest::Client,
}

impl SourceReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self, source: &InputSource) -> Result<Vec<u8>, BatchReadFailure> {
        match source {
            InputSource::File(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| BatchReadFailure::Read {
                        path: path.clone(),
                        source,
                    })
            }
            InputSource::Url(url) => self.fetch(url).await,
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, BatchReadFailure> {
        let fetch_err = |source| BatchReadFailure::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(fetch_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(BatchReadFailure::Status {
                url: url.to_string(),
                status,
            });
        }
        let body = response.bytes().await.map_err(fetch_err)?;
        Ok(body.to_vec())
    }
}
