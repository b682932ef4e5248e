//! Mojang: the official mappings as class aggregates.

use super::{Generator, DEFAULT_VERSION};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::reconcile::{aggregate, Output};
use crate::reference::{self, ReferenceLoader};
use tracing::info;

/// Configuration for [`MojangGenerator`]
#[derive(Debug, Clone)]
pub struct MojangConfig {
    /// Release to generate for
    pub version: String,
    /// Location of the version manifest
    pub manifest_url: String,
}

impl Default for MojangConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            manifest_url: reference::DEFAULT_MANIFEST_URL.to_string(),
        }
    }
}

impl MojangConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the release version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the version manifest URL
    pub fn manifest_url(mut self, url: impl Into<String>) -> Self {
        self.manifest_url = url.into();
        self
    }
}

/// Emits each obfuscated class with its official name and method renames
#[derive(Debug, Clone, Default)]
pub struct MojangGenerator {
    config: MojangConfig,
}

impl MojangGenerator {
    /// Creates a generator with the given configuration
    pub fn new(config: MojangConfig) -> Self {
        Self { config }
    }
}

impl Generator for MojangGenerator {
    fn name(&self) -> &'static str {
        "mojang"
    }

    fn generate(&self, fetcher: &dyn Fetcher) -> Result<Output> {
        info!("Loading mapping...");
        let tree = ReferenceLoader::new(fetcher, self.config.manifest_url.as_str())
            .load(&self.config.version)?;

        let official = tree.namespace(reference::OFFICIAL)?;
        Ok(aggregate::reconcile(&tree, official))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::mcp::tests::{reference_fixture, MANIFEST};
    use crate::pipeline::{run, to_json_string};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn generator() -> MojangGenerator {
        MojangGenerator::new(MojangConfig::new().manifest_url(MANIFEST))
    }

    #[test]
    fn test_generate() {
        let output = generator().generate(&reference_fixture()).unwrap();

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!({
                "classes": {
                    "a": {
                        "obfuscated": "a",
                        "mapped": "com.example.Foo",
                        "methods": [
                            { "obfuscated": "m", "mapped": "run", "descriptor": "()V" },
                            { "obfuscated": "n", "mapped": "stop", "descriptor": "()V" }
                        ]
                    },
                    "c": {
                        "obfuscated": "c",
                        "mapped": "com.example.Client",
                        "methods": [
                            { "obfuscated": "r", "mapped": "render", "descriptor": "(La;)V" }
                        ]
                    }
                }
            })
        );
    }

    #[test]
    fn test_repeated_runs_are_byte_identical() {
        let dir = TempDir::new().unwrap();
        let fetcher = reference_fixture();

        let first = std::fs::read(run(&generator(), &fetcher, dir.path()).unwrap()).unwrap();
        let second = std::fs::read(run(&generator(), &fetcher, dir.path()).unwrap()).unwrap();

        assert_eq!(first, second);
        let expected = to_json_string(&generator().generate(&fetcher).unwrap()).unwrap();
        assert_eq!(String::from_utf8(first).unwrap(), expected);
    }
}
