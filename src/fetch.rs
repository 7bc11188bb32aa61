//! Retrieval of raw audio bytes for playback and analysis.
//!
//! Remote sources go through `ureq`; everything else is treated as a local
//! file, with or without a `file://` prefix.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::config::FetchSettings;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{url} is larger than {limit} bytes")]
    TooLarge { url: String, limit: u64 },

    #[error("{url} returned an empty body")]
    Empty { url: String },
}

/// Something that can turn an audio resource locator into bytes.
pub trait AudioFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    max_bytes: u64,
    timeout: Option<Duration>,
}

impl HttpFetcher {
    pub fn new(settings: &FetchSettings) -> Self {
        Self {
            max_bytes: settings.max_bytes,
            timeout: (settings.timeout_secs > 0).then(|| Duration::from_secs(settings.timeout_secs)),
        }
    }

    fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let http = |source: ureq::Error| FetchError::Http {
            url: url.to_string(),
            source: Box::new(source),
        };

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(self.timeout)
            .build()
            .into();

        let mut response = agent.get(url).call().map_err(http)?;
        let bytes = response
            .body_mut()
            .with_config()
            .limit(self.max_bytes)
            .read_to_vec()
            .map_err(|e| match e {
                ureq::Error::BodyExceedsLimit(_) => FetchError::TooLarge {
                    url: url.to_string(),
                    limit: self.max_bytes,
                },
                other => http(other),
            })?;

        log::debug!("fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes)
    }

    fn fetch_local(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let path = url.strip_prefix("file://").unwrap_or(url);
        let io = |source: std::io::Error| FetchError::Io {
            path: path.to_string(),
            source,
        };

        let file = fs::File::open(Path::new(path)).map_err(io)?;
        let mut bytes = Vec::new();
        // read one byte past the limit so oversize files are detected
        file.take(self.max_bytes.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(io)?;
        if bytes.len() as u64 > self.max_bytes {
            return Err(FetchError::TooLarge {
                url: url.to_string(),
                limit: self.max_bytes,
            });
        }
        Ok(bytes)
    }
}

impl AudioFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let bytes = if is_remote(url) {
            self.fetch_remote(url)?
        } else {
            self.fetch_local(url)?
        };
        if bytes.is_empty() {
            return Err(FetchError::Empty {
                url: url.to_string(),
            });
        }
        Ok(bytes)
    }
}

pub fn is_remote(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Lower-cased extension of the resource, ignoring any query string or fragment.
pub fn extension_hint(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit('/').next()?;
    let (_, ext) = name.rsplit_once('.')?;
    (!ext.is_empty()).then(|| ext.to_ascii_lowercase())
}
