//! Error types for the mapgen-core library.
//!
//! Every variant here is fatal for the pipeline that raised it. Conditions the
//! generators treat as "no mapping available" (a method absent from the reference
//! tree, an identity rename, an excluded synthetic name) are never reported as
//! errors; they are logged and skipped where they occur.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mapgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error type for all mapgen operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Transport-level failure while retrieving a remote resource
    #[error("failed to retrieve '{url}': {source}")]
    Retrieval {
        /// URL being fetched
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Remote resource answered with a non-success status
    #[error("failed to retrieve '{url}': server responded with status {status}")]
    HttpStatus {
        /// URL being fetched
        url: String,
        /// HTTP status code returned by the server
        status: u16,
    },

    /// Mapping source does not conform to its declared format
    #[error("malformed {format} mapping at line {line}: {details}")]
    Parse {
        /// Declared format of the source
        format: &'static str,
        /// 1-based line number of the offending line
        line: usize,
        /// Detailed description of the issue
        details: String,
    },

    /// Requested entry is absent from an archive
    #[error("entry '{entry}' not found in archive '{archive}'")]
    ArchiveEntryNotFound {
        /// Path of the archive that was searched
        archive: PathBuf,
        /// Name of the missing entry
        entry: String,
    },

    /// Archive could not be opened or decoded
    #[error("failed to read archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Release is not listed in the version manifest
    #[error("version '{version}' not found in version manifest")]
    VersionNotFound {
        /// Requested release identifier
        version: String,
    },

    /// Version document does not declare a required download
    #[error("version '{version}' does not declare a '{download}' download")]
    MissingDownload {
        /// Requested release identifier
        version: String,
        /// Name of the missing download entry
        download: String,
    },

    /// JSON document could not be decoded into, or encoded from, the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A namespace name was requested that the tree does not declare
    #[error("namespace '{name}' is not declared (available: {available})")]
    UnknownNamespace {
        /// The requested namespace name
        name: String,
        /// Comma-separated list of declared namespaces
        available: String,
    },

    /// Two trees with different namespace layouts were merged
    #[error("namespace mismatch: expected [{expected}], found [{found}]")]
    NamespaceMismatch {
        /// Namespaces of the target tree
        expected: String,
        /// Namespaces of the incoming tree
        found: String,
    },

    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O failure on an in-memory or already-open stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new retrieval error
    pub fn retrieval(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Retrieval {
            url: url.into(),
            source,
        }
    }

    /// Creates a new HTTP status error
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a new parse error
    pub fn parse(format: &'static str, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    /// Creates a new archive-entry-not-found error
    pub fn archive_entry_not_found(archive: impl Into<PathBuf>, entry: impl Into<String>) -> Self {
        Self::ArchiveEntryNotFound {
            archive: archive.into(),
            entry: entry.into(),
        }
    }

    /// Creates a new version-not-found error
    pub fn version_not_found(version: impl Into<String>) -> Self {
        Self::VersionNotFound {
            version: version.into(),
        }
    }

    /// Creates a new missing-download error
    pub fn missing_download(version: impl Into<String>, download: impl Into<String>) -> Self {
        Self::MissingDownload {
            version: version.into(),
            download: download.into(),
        }
    }

    /// Creates a new unknown-namespace error
    pub fn unknown_namespace(name: impl Into<String>, available: &[String]) -> Self {
        Self::UnknownNamespace {
            name: name.into(),
            available: available.join(", "),
        }
    }

    /// Creates a new namespace-mismatch error
    pub fn namespace_mismatch(expected: &[String], found: &[String]) -> Self {
        Self::NamespaceMismatch {
            expected: expected.join(", "),
            found: found.join(", "),
        }
    }

    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file write error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }
}
