//! Bukkit: Spigot BuildData class mappings, renamed directly.

use super::{Generator, DEFAULT_VERSION};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::format::{self, MappingFormat};
use crate::reconcile::{direct, Output};
use crate::tree::{MappingTree, NamespaceId};
use std::io::BufRead;
use tracing::info;

/// Spigot BuildData commit the default configuration is pinned to
pub const DEFAULT_BUILD_DATA_COMMIT: &str = "ae1e7b1e31cd3a3892bb05a6ccdcecc48c73c455";

/// Default location of the BuildData mapping files
pub const DEFAULT_BUILD_DATA_URL: &str =
    "https://hub.spigotmc.org/stash/projects/SPIGOT/repos/builddata/raw/mappings";

/// Configuration for [`BukkitGenerator`]
#[derive(Debug, Clone)]
pub struct BukkitConfig {
    /// Release the mappings belong to
    pub version: String,
    /// BuildData commit to read the mappings at
    pub commit: String,
    /// Base URL of the BuildData mapping directory
    pub base_url: String,
    /// Lines skipped before parsing
    pub header_lines: usize,
}

impl Default for BukkitConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            commit: DEFAULT_BUILD_DATA_COMMIT.to_string(),
            base_url: DEFAULT_BUILD_DATA_URL.to_string(),
            header_lines: 1,
        }
    }
}

impl BukkitConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the release version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the BuildData commit
    pub fn commit(mut self, commit: impl Into<String>) -> Self {
        self.commit = commit.into();
        self
    }

    /// Sets the BuildData base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the number of header lines to skip
    pub fn header_lines(mut self, lines: usize) -> Self {
        self.header_lines = lines;
        self
    }

    /// URL of the class mapping file
    pub fn mappings_url(&self) -> String {
        format!(
            "{}/bukkit-{}-cl.csrg?at={}",
            self.base_url, self.version, self.commit
        )
    }
}

/// Emits obfuscated → Bukkit class and method renames
#[derive(Debug, Clone, Default)]
pub struct BukkitGenerator {
    config: BukkitConfig,
}

impl BukkitGenerator {
    /// Creates a generator with the given configuration
    pub fn new(config: BukkitConfig) -> Self {
        Self { config }
    }
}

impl Generator for BukkitGenerator {
    fn name(&self) -> &'static str {
        "bukkit"
    }

    fn generate(&self, fetcher: &dyn Fetcher) -> Result<Output> {
        info!("Reading mappings...");
        let bytes = fetcher.fetch(&self.config.mappings_url())?;

        let mut reader = bytes.as_slice();
        let mut skipped = String::new();
        for _ in 0..self.config.header_lines {
            skipped.clear();
            reader.read_line(&mut skipped)?;
        }

        let mut tree = MappingTree::new();
        format::read(reader, MappingFormat::Csrg, &mut tree, None)?;
        let target = tree.namespace(format::DEFAULT_NAMESPACES[1])?;

        Ok(direct::reconcile(&tree, NamespaceId::SOURCE, target))
    }
}
