//! Remote retrieval.
//!
//! Generators fetch everything through the [`Fetcher`] trait so they can run
//! against [`StaticFetcher`] fixtures without network access. [`HttpFetcher`]
//! is the real implementation; it is blocking and sequential, with no retry.

pub mod archive;

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;
use tracing::{debug, trace};

/// Source of remote resources
pub trait Fetcher {
    /// Fetches `url` into memory
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;

    /// Fetches `url` into a temporary file that is deleted when dropped
    fn fetch_to_file(&self, url: &str) -> Result<NamedTempFile> {
        let bytes = self.fetch(url)?;
        let mut file = NamedTempFile::new()?;
        file.write_all(&bytes)
            .map_err(|e| Error::file_write(file.path(), e))?;
        file.flush()?;
        trace!("Spooled {} bytes to {}", bytes.len(), file.path().display());
        Ok(file)
    }
}

/// Blocking HTTP fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Creates a new fetcher with a default client
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("mapgen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::retrieval("<client>", e))?;
        Ok(Self { client })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::retrieval(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http_status(url, status.as_u16()));
        }
        Ok(response)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let bytes = self
            .get(url)?
            .bytes()
            .map_err(|e| Error::retrieval(url, e))?;
        trace!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }

    fn fetch_to_file(&self, url: &str) -> Result<NamedTempFile> {
        let mut response = self.get(url)?;
        let mut file = NamedTempFile::new()?;
        let written = response
            .copy_to(&mut file)
            .map_err(|e| Error::retrieval(url, e))?;
        file.flush()?;
        trace!("Downloaded {} bytes to {}", written, file.path().display());
        Ok(file)
    }
}

/// Fetcher serving a fixed url → bytes table
///
/// Unknown URLs answer with a 404 status error.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    resources: HashMap<String, Vec<u8>>,
}

impl StaticFetcher {
    /// Creates an empty fetcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `body` under `url`
    pub fn with(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.resources.insert(url.into(), body.into());
        self
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.resources
            .get(url)
            .cloned()
            .ok_or_else(|| Error::http_status(url, 404))
    }
}
