//! Canonical reference mappings.
//!
//! The official names for a release come from two Proguard files published
//! alongside it, one for the server and one for the client. Both are read
//! with the obfuscated name as the source namespace and merged into a single
//! tree, client entries winning on conflict.
//!
//! ## Version resolution
//!
//! 1. The version manifest lists every release with the URL of its version document
//! 2. The version document declares `server_mappings` and `client_mappings` downloads
//!
//! A release missing from the manifest, or a version document lacking either
//! download, is fatal. There is no fallback version.

use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::format::{self, MappingFormat, NamespaceAdapter};
use crate::tree::MappingTree;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// Namespace of obfuscated names in the reference tree (the source namespace)
pub const OBFUSCATED: &str = "obfuscated";

/// Namespace of official names in the reference tree
pub const OFFICIAL: &str = "official";

/// Default location of the version manifest
pub const DEFAULT_MANIFEST_URL: &str = "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";

const SERVER_MAPPINGS: &str = "server_mappings";
const CLIENT_MAPPINGS: &str = "client_mappings";

#[derive(Debug, Deserialize)]
struct VersionManifest {
    versions: Vec<VersionEntry>,
}

#[derive(Debug, Deserialize)]
struct VersionEntry {
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct VersionDocument {
    #[serde(default)]
    downloads: HashMap<String, Download>,
}

#[derive(Debug, Deserialize)]
struct Download {
    url: String,
}

/// Locations of the two mapping files of a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingUrls {
    /// Server-side Proguard mapping
    pub server: String,
    /// Client-side Proguard mapping
    pub client: String,
}

/// Builds the official reference tree for a release
#[derive(Debug)]
pub struct ReferenceLoader<'a, F: Fetcher + ?Sized> {
    fetcher: &'a F,
    manifest_url: String,
}

impl<'a, F: Fetcher + ?Sized> ReferenceLoader<'a, F> {
    /// Creates a loader reading the manifest from `manifest_url`
    pub fn new(fetcher: &'a F, manifest_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            manifest_url: manifest_url.into(),
        }
    }

    /// Resolves the server and client mapping URLs of `version`
    pub fn resolve(&self, version: &str) -> Result<MappingUrls> {
        let manifest: VersionManifest =
            serde_json::from_slice(&self.fetcher.fetch(&self.manifest_url)?)?;

        let entry = manifest
            .versions
            .into_iter()
            .find(|v| v.id == version)
            .ok_or_else(|| Error::version_not_found(version))?;
        debug!("Version {} document at {}", version, entry.url);

        let mut document: VersionDocument =
            serde_json::from_slice(&self.fetcher.fetch(&entry.url)?)?;
        let mut download = |name: &str| {
            document
                .downloads
                .remove(name)
                .map(|d| d.url)
                .ok_or_else(|| Error::missing_download(version, name))
        };

        Ok(MappingUrls {
            server: download(SERVER_MAPPINGS)?,
            client: download(CLIENT_MAPPINGS)?,
        })
    }

    /// Resolves `version` and loads its merged reference tree
    pub fn load(&self, version: &str) -> Result<MappingTree> {
        let urls = self.resolve(version)?;

        info!("Loading server mappings for {}", version);
        let server = read_official(&self.fetcher.fetch(&urls.server)?)?;
        info!("Loading client mappings for {}", version);
        let client = read_official(&self.fetcher.fetch(&urls.client)?)?;

        merge_sides(server, &client)
    }
}

/// Reads a Proguard file into a tree keyed by obfuscated name
pub fn read_official(bytes: &[u8]) -> Result<MappingTree> {
    let adapter = NamespaceAdapter::new()
        .source("target")
        .rename("target", OBFUSCATED)
        .rename("source", OFFICIAL);

    let mut tree = MappingTree::new();
    format::read(bytes, MappingFormat::Proguard, &mut tree, Some(&adapter))?;
    Ok(tree)
}

/// Unions the server and client trees; client classes win on conflict
pub fn merge_sides(mut server: MappingTree, client: &MappingTree) -> Result<MappingTree> {
    let server_classes = server.len();
    server.merge(client)?;
    debug!(
        "Merged reference tree: {} server + {} client classes -> {}",
        server_classes,
        client.len(),
        server.len()
    );
    Ok(server)
}
