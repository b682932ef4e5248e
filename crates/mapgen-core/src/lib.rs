//! # mapgen-core
//!
//! A library for building cross-reference tables between the naming schemes
//! different deobfuscation projects publish for the same game release.
//!
//! This crate provides the core functionality for:
//! - Holding multi-namespace class and method mappings in memory
//! - Reading CSRG, TSRG, Tiny and Proguard mapping sources
//! - Building the official reference mappings of a release
//! - Reconciling a project's mappings into deterministic rename tables
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`tree`]: The in-memory [`MappingTree`]
//! - [`format`]: Mapping source readers
//! - [`fetch`]: Remote retrieval and archive extraction
//! - [`reference`]: Official reference mappings
//! - [`reconcile`]: The four reconciliation policies and their output tables
//! - [`pipeline`]: Generators tying retrieval, parsing and reconciliation together
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use mapgen_core::pipeline::{self, McpConfig, McpGenerator};
//! use mapgen_core::HttpFetcher;
//! use std::path::Path;
//!
//! let fetcher = HttpFetcher::new()?;
//! let generator = McpGenerator::new(McpConfig::new().version("1.21"));
//! let written = pipeline::run(&generator, &fetcher, Path::new("."))?;
//! println!("Wrote {}", written.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Extensibility
//!
//! - [`Fetcher`]: Substitute the retrieval layer, e.g. with fixture data
//! - [`Generator`]: Add further mapping projects

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod error;
pub mod fetch;
pub mod format;
pub mod pipeline;
pub mod reconcile;
pub mod reference;
pub mod tree;

// Re-export primary types for convenience
pub use error::{Error, Result};
pub use fetch::{Fetcher, HttpFetcher, StaticFetcher};
pub use format::{MappingFormat, NamespaceAdapter};
pub use pipeline::Generator;
pub use reconcile::Output;
pub use tree::{ClassEntry, MappingTree, MethodEntry, MethodKey, NamespaceId};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
