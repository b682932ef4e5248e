//! MCP: SRG method names cross-referenced to official names.

use super::{Generator, DEFAULT_VERSION};
use crate::error::Result;
use crate::fetch::{archive, Fetcher};
use crate::format::{self, MappingFormat};
use crate::reconcile::{crossref, Output};
use crate::reference::{self, ReferenceLoader};
use crate::tree::MappingTree;
use tracing::info;

/// Default Forge maven repository
pub const DEFAULT_FORGE_MAVEN: &str = "https://maven.minecraftforge.net";

/// Entry of the MCP config archive holding the joined mappings
pub const JOINED_TSRG: &str = "config/joined.tsrg";

/// Configuration for [`McpGenerator`]
#[derive(Debug, Clone)]
pub struct McpConfig {
    /// Release to generate for
    pub version: String,
    /// Base URL of the maven repository
    pub maven_url: String,
    /// Archive entry holding the mappings
    pub entry: String,
    /// Namespace of the project's own method names
    pub named_namespace: String,
    /// Project names starting with this prefix are never emitted
    pub excluded_prefix: String,
    /// Location of the version manifest for the reference mappings
    pub manifest_url: String,
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            maven_url: DEFAULT_FORGE_MAVEN.to_string(),
            entry: JOINED_TSRG.to_string(),
            named_namespace: "srg".to_string(),
            excluded_prefix: crossref::DEFAULT_EXCLUDED_PREFIX.to_string(),
            manifest_url: reference::DEFAULT_MANIFEST_URL.to_string(),
        }
    }
}

impl McpConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the release version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the maven base URL
    pub fn maven_url(mut self, url: impl Into<String>) -> Self {
        self.maven_url = url.into();
        self
    }

    /// Sets the version manifest URL
    pub fn manifest_url(mut self, url: impl Into<String>) -> Self {
        self.manifest_url = url.into();
        self
    }

    /// Sets the excluded name prefix
    pub fn excluded_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.excluded_prefix = prefix.into();
        self
    }

    /// URL of the MCP config archive
    pub fn archive_url(&self) -> String {
        format!(
            "{}/de/oceanlabs/mcp/mcp_config/{v}/mcp_config-{v}.zip",
            self.maven_url,
            v = self.version
        )
    }
}

/// Emits SRG method name → official method name
#[derive(Debug, Clone, Default)]
pub struct McpGenerator {
    config: McpConfig,
}

impl McpGenerator {
    /// Creates a generator with the given configuration
    pub fn new(config: McpConfig) -> Self {
        Self { config }
    }

    fn read_project(&self, fetcher: &dyn Fetcher) -> Result<MappingTree> {
        // dropped (and deleted) once the entry is extracted
        let archive_file = fetcher.fetch_to_file(&self.config.archive_url())?;
        let bytes = archive::read_zip_entry(archive_file.path(), &self.config.entry)?;
        drop(archive_file);

        let mut tree = MappingTree::new();
        format::read(bytes.as_slice(), MappingFormat::Tsrg, &mut tree, None)?;
        Ok(tree)
    }
}

impl Generator for McpGenerator {
    fn name(&self) -> &'static str {
        "mcp"
    }

    fn generate(&self, fetcher: &dyn Fetcher) -> Result<Output> {
        info!("Loading mojang mapping...");
        let reference = ReferenceLoader::new(fetcher, self.config.manifest_url.as_str())
            .load(&self.config.version)?;

        info!("Loading mcp mapping...");
        let project = self.read_project(fetcher)?;

        let named = project.namespace(&self.config.named_namespace)?;
        let official = reference.namespace(reference::OFFICIAL)?;
        let (output, stats) = crossref::reconcile(
            &project,
            named,
            &reference,
            official,
            &self.config.excluded_prefix,
        );

        if stats.missing > 0 {
            info!(
                "{} of {} renamed methods have no official counterpart",
                stats.missing, stats.candidates
            );
        }
        Ok(output)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fetch::archive::tests::zip_bytes;
    use crate::fetch::StaticFetcher;
    use pretty_assertions::assert_eq;

    pub(crate) const MANIFEST: &str = "https://meta.example.invalid/manifest.json";

    /// Reference fixture: class `a` is com.example.Foo, method `m()V` is `run`
    pub(crate) fn reference_fixture() -> StaticFetcher {
        StaticFetcher::new()
            .with(
                MANIFEST,
                r#"{"versions": [{"id": "1.21", "url": "https://meta.example.invalid/1.21.json"}]}"#,
            )
            .with(
                "https://meta.example.invalid/1.21.json",
                r#"{"downloads": {
                    "server_mappings": {"url": "https://data.example.invalid/server.txt"},
                    "client_mappings": {"url": "https://data.example.invalid/client.txt"}
                }}"#,
            )
            .with(
                "https://data.example.invalid/server.txt",
                "com.example.Foo -> a:\n    void run() -> m\n    void stop() -> n\n",
            )
            .with(
                "https://data.example.invalid/client.txt",
                "com.example.Client -> c:\n    void render(com.example.Foo) -> r\ncom.example.Foo -> a:\n    void run() -> m\n",
            )
    }

    fn config() -> McpConfig {
        McpConfig::new()
            .maven_url("https://maven.example.invalid")
            .manifest_url(MANIFEST)
    }

    #[test]
    fn test_archive_url() {
        assert_eq!(
            McpConfig::new().archive_url(),
            "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_config/1.21/mcp_config-1.21.zip"
        );
    }

    #[test]
    fn test_generate() {
        let tsrg = "\
tsrg2 obf srg id
a net/minecraft/Foo 1
\tm ()V doThing 10
\tn ()V f_100_ 11
\tq ()V m_200_ 12
c net/minecraft/Client 2
\tr (La;)V m_300_ 13
";
        let config = config();
        let fetcher = reference_fixture().with(
            config.archive_url(),
            zip_bytes(&[(JOINED_TSRG, tsrg), ("config/constructors.txt", "")]),
        );

        let output = McpGenerator::new(config).generate(&fetcher).unwrap();
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!({ "methods": { "doThing": "run", "m_300_": "render" } })
        );
    }

    #[test]
    fn test_missing_archive_entry_is_fatal() {
        let config = config();
        let fetcher = reference_fixture().with(config.archive_url(), zip_bytes(&[("other", "")]));

        let err = McpGenerator::new(config).generate(&fetcher).unwrap_err();
        assert!(matches!(err, Error::ArchiveEntryNotFound { .. }));
    }

    #[test]
    fn test_unknown_version_is_fatal() {
        let config = config().version("0.0");
        let err = McpGenerator::new(config)
            .generate(&reference_fixture())
            .unwrap_err();
        assert!(matches!(err, Error::VersionNotFound { .. }));
    }
}
