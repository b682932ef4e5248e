//! Generator pipelines.
//!
//! Each generator retrieves its mapping sources, reconciles them with one of
//! the [`reconcile`](crate::reconcile) policies and returns an [`Output`]
//! document. [`run`] drives a generator end to end and writes
//! `<name>.json` into the output directory.
//!
//! Generators are independent of one another and take all release
//! identifiers from their configuration, so they can be pointed at fixture
//! data through a [`StaticFetcher`](crate::fetch::StaticFetcher).

mod bukkit;
mod mcp;
mod mojang;
mod yarn;

pub use bukkit::{BukkitConfig, BukkitGenerator};
pub use mcp::{McpConfig, McpGenerator};
pub use mojang::{MojangConfig, MojangGenerator};
pub use yarn::{YarnConfig, YarnGenerator};

use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::reconcile::Output;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Release targeted by the default configurations
pub const DEFAULT_VERSION: &str = "1.21";

/// A pipeline producing one output document
pub trait Generator {
    /// Short name of the generator, also the output file stem
    fn name(&self) -> &'static str;

    /// Retrieves, parses and reconciles the generator's mapping sources
    fn generate(&self, fetcher: &dyn Fetcher) -> Result<Output>;

    /// File name of the output document
    fn output_file_name(&self) -> String {
        format!("{}.json", self.name())
    }
}

/// Runs `generator` and writes its document into `output_dir`
///
/// Returns the path of the written file. Nothing is written if any step fails.
pub fn run(generator: &dyn Generator, fetcher: &dyn Fetcher, output_dir: &Path) -> Result<PathBuf> {
    let output = generator.generate(fetcher)?;
    info!(
        "{}: {} classes, {} methods",
        generator.name(),
        output.class_count(),
        output.method_count()
    );

    info!("Writing output...");
    let path = output_dir.join(generator.output_file_name());
    write_output(&output, &path)?;
    info!("Done!");

    Ok(path)
}

/// Serializes `output` as pretty JSON into `path`
///
/// The document is written to a temporary file next to `path` and moved into
/// place once complete.
pub fn write_output(output: &Output, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| Error::file_write(dir, e))?;

    let mut file = NamedTempFile::new_in(dir).map_err(|e| Error::file_write(dir, e))?;
    {
        let mut writer = BufWriter::new(file.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, output)?;
        writer
            .write_all(b"\n")
            .and_then(|()| writer.flush())
            .map_err(|e| Error::file_write(path, e))?;
    }

    file.persist(path)
        .map_err(|e| Error::file_write(path, e.error))?;
    Ok(())
}

/// Serializes `output` as the same pretty JSON [`write_output`] produces
pub fn to_json_string(output: &Output) -> Result<String> {
    let mut json = serde_json::to_string_pretty(output)?;
    json.push('\n');
    Ok(json)
}
