//! Archive and compression helpers.

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

/// Reads a single entry out of the zip archive at `path`
pub fn read_zip_entry(path: &Path, entry: &str) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| Error::file_read(path, e))?;
    let mut archive = ZipArchive::new(file)?;

    let mut zipped = match archive.by_name(entry) {
        Ok(zipped) => zipped,
        Err(ZipError::FileNotFound) => return Err(Error::archive_entry_not_found(path, entry)),
        Err(e) => return Err(e.into()),
    };

    let mut bytes = Vec::with_capacity(zipped.size() as usize);
    zipped
        .read_to_end(&mut bytes)
        .map_err(|e| Error::file_read(path, e))?;
    debug!("Extracted {} ({} bytes) from {}", entry, bytes.len(), path.display());
    Ok(bytes)
}

/// Decompresses a gzip stream held in memory
pub fn gunzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut out)?;
    Ok(out)
}
