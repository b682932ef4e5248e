//! Mapping source readers.
//!
//! [`read`] parses a complete mapping source in one of the supported
//! [`MappingFormat`]s and adds its classes and methods to a [`MappingTree`].
//!
//! ## Guarantees
//!
//! - The whole stream is parsed into a scratch tree first; the target tree is
//!   only touched once parsing has succeeded.
//! - Namespace 0 holds the identifiers the file lists first; further
//!   namespaces follow in file order.
//! - Names are stored verbatim (internal `/`-separated form).
//! - A [`NamespaceAdapter`] can re-root the parsed tree on another namespace and
//!   rename namespaces before the result reaches the target tree.
//!
//! Field mappings are validated but not stored.

mod csrg;
mod proguard;
mod tiny;
mod tsrg;

use crate::error::{Error, Result};
use crate::tree::MappingTree;
use std::fmt;
use std::io::{self, BufRead};
use tracing::debug;

/// Namespace names used by formats that carry no header
pub const DEFAULT_NAMESPACES: [&str; 2] = ["source", "target"];

/// On-disk syntax of a mapping source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingFormat {
    /// Compact SRG (`.csrg`), as published in Spigot BuildData
    Csrg,
    /// TSRG v1 or v2 (`.tsrg`), as published in MCP config archives
    Tsrg,
    /// Tiny v1, as published by Fabric Yarn
    Tiny,
    /// Proguard mapping files, as published by Mojang
    Proguard,
}

impl MappingFormat {
    /// Short lowercase name used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingFormat::Csrg => "csrg",
            MappingFormat::Tsrg => "tsrg",
            MappingFormat::Tiny => "tiny",
            MappingFormat::Proguard => "proguard",
        }
    }
}

impl fmt::Display for MappingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reshapes the namespaces of a freshly parsed source before it is merged
///
/// ```
/// use mapgen_core::format::NamespaceAdapter;
///
/// // Proguard lists official -> obfuscated; query by obfuscated name instead
/// let adapter = NamespaceAdapter::new()
///     .source("target")
///     .rename("target", "obfuscated")
///     .rename("source", "official");
/// ```
#[derive(Debug, Clone, Default)]
pub struct NamespaceAdapter {
    source: Option<String>,
    renames: Vec<(String, String)>,
}

impl NamespaceAdapter {
    /// Creates an adapter that leaves namespaces untouched
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-roots the tree on the namespace named `ns`
    pub fn source(mut self, ns: impl Into<String>) -> Self {
        self.source = Some(ns.into());
        self
    }

    /// Renames namespace `from` to `to`, applied after re-rooting
    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.renames.push((from.into(), to.into()));
        self
    }

    fn apply(&self, tree: MappingTree) -> Result<MappingTree> {
        let mut tree = match &self.source {
            Some(ns) => {
                let id = tree.namespace(ns)?;
                tree.switch_source(id)
            }
            None => tree,
        };
        for (from, to) in &self.renames {
            tree.rename_namespace(from, to.clone())?;
        }
        Ok(tree)
    }
}

/// Reads a complete mapping source into `tree`
///
/// Fails with a parse error when the input does not conform to `format`, in
/// which case `tree` is left unchanged.
pub fn read<R: BufRead>(
    input: R,
    format: MappingFormat,
    tree: &mut MappingTree,
    adapter: Option<&NamespaceAdapter>,
) -> Result<()> {
    let parsed = match format {
        MappingFormat::Csrg => csrg::parse(input)?,
        MappingFormat::Tsrg => tsrg::parse(input)?,
        MappingFormat::Tiny => tiny::parse(input)?,
        MappingFormat::Proguard => proguard::parse(input)?,
    };

    debug!(
        "Parsed {} mapping: {} classes, {} methods, namespaces [{}]",
        format,
        parsed.len(),
        parsed.method_count(),
        parsed.namespaces().join(", ")
    );

    let parsed = match adapter {
        Some(adapter) => adapter.apply(parsed)?,
        None => parsed,
    };

    if tree.is_empty() && tree.namespaces().is_empty() {
        *tree = parsed;
        Ok(())
    } else {
        tree.merge(&parsed)
    }
}

/// Iterates the lines of `input` with 1-based line numbers
///
/// A line that is not valid UTF-8 is reported as a parse error of `format`.
fn numbered_lines<R: BufRead>(
    input: R,
    format: &'static str,
) -> impl Iterator<Item = (usize, Result<String>)> {
    input.lines().enumerate().map(move |(i, line)| {
        let line_no = i + 1;
        let line = line.map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => Error::parse(format, line_no, e.to_string()),
            _ => Error::Io(e),
        });
        (line_no, line)
    })
}
