//! Yarn: intermediary → named renames from a single Tiny file.

use super::{Generator, DEFAULT_VERSION};
use crate::error::Result;
use crate::fetch::{archive, Fetcher};
use crate::format::{self, MappingFormat};
use crate::reconcile::{layered, Output};
use crate::tree::MappingTree;
use regex::Regex;
use tracing::info;

/// Yarn build the default configuration is pinned to
pub const DEFAULT_YARN_BUILD: &str = "1.21+build.9";

/// Default Fabric maven repository
pub const DEFAULT_FABRIC_MAVEN: &str = "https://maven.fabricmc.net";

/// Configuration for [`YarnGenerator`]
#[derive(Debug, Clone)]
pub struct YarnConfig {
    /// Yarn build identifier, e.g. `1.21+build.9`
    pub build: String,
    /// Base URL of the maven repository
    pub maven_url: String,
    /// Namespace renames are keyed by
    pub intermediate_namespace: String,
    /// Namespace renames resolve to
    pub final_namespace: String,
    /// Classes whose intermediate name matches are skipped
    pub synthetic_class: Regex,
}

impl Default for YarnConfig {
    fn default() -> Self {
        Self {
            build: DEFAULT_YARN_BUILD.to_string(),
            maven_url: DEFAULT_FABRIC_MAVEN.to_string(),
            intermediate_namespace: "intermediary".to_string(),
            final_namespace: "named".to_string(),
            synthetic_class: layered::default_synthetic_class().clone(),
        }
    }
}

impl YarnConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Yarn build
    pub fn build(mut self, build: impl Into<String>) -> Self {
        self.build = build.into();
        self
    }

    /// Sets the maven base URL
    pub fn maven_url(mut self, url: impl Into<String>) -> Self {
        self.maven_url = url.into();
        self
    }

    /// Sets the synthetic class pattern
    pub fn synthetic_class(mut self, pattern: Regex) -> Self {
        self.synthetic_class = pattern;
        self
    }

    /// Release the build targets, e.g. `1.21` for `1.21+build.9`
    pub fn release(&self) -> &str {
        self.build.split('+').next().unwrap_or(DEFAULT_VERSION)
    }

    /// URL of the gzipped Tiny file
    pub fn mappings_url(&self) -> String {
        format!(
            "{}/net/fabricmc/yarn/{build}/yarn-{build}-tiny.gz",
            self.maven_url,
            build = self.build
        )
    }
}

/// Emits intermediary → named class and method renames
#[derive(Debug, Clone, Default)]
pub struct YarnGenerator {
    config: YarnConfig,
}

impl YarnGenerator {
    /// Creates a generator with the given configuration
    pub fn new(config: YarnConfig) -> Self {
        Self { config }
    }
}

impl Generator for YarnGenerator {
    fn name(&self) -> &'static str {
        "yarn"
    }

    fn generate(&self, fetcher: &dyn Fetcher) -> Result<Output> {
        info!("Reading mappings for {}...", self.config.release());
        let compressed = fetcher.fetch(&self.config.mappings_url())?;
        let bytes = archive::gunzip(&compressed)?;

        let mut tree = MappingTree::new();
        format::read(bytes.as_slice(), MappingFormat::Tiny, &mut tree, None)?;

        let intermediate = tree.namespace(&self.config.intermediate_namespace)?;
        let final_ns = tree.namespace(&self.config.final_namespace)?;
        Ok(layered::reconcile(
            &tree,
            intermediate,
            final_ns,
            &self.config.synthetic_class,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fetch::archive::tests::gzip_bytes;
    use crate::fetch::StaticFetcher;
    use pretty_assertions::assert_eq;

    const TINY: &str = "v1\tofficial\tintermediary\tnamed
CLASS\ta\tnet/minecraft/class_1\tnet/minecraft/world/World
CLASS\tb\tnet/minecraft/class_1$1\tnet/minecraft/world/World$1
METHOD\ta\t()V\tc\tmethod_1\ttick
METHOD\tb\t()V\td\tmethod_2\trun
";

    #[test]
    fn test_mappings_url() {
        assert_eq!(
            YarnConfig::new().mappings_url(),
            "https://maven.fabricmc.net/net/fabricmc/yarn/1.21+build.9/yarn-1.21+build.9-tiny.gz"
        );
        assert_eq!(YarnConfig::new().release(), "1.21");
    }

    #[test]
    fn test_generate() {
        let config = YarnConfig::new().maven_url("https://example.invalid");
        let fetcher = StaticFetcher::new().with(config.mappings_url(), gzip_bytes(TINY));

        let output = YarnGenerator::new(config).generate(&fetcher).unwrap();
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!({
                "classes": { "net.minecraft.class_1": "net.minecraft.world.World" },
                "methods": { "method_1": "tick" }
            })
        );
    }

    #[test]
    fn test_missing_namespace_is_fatal() {
        let config = YarnConfig::new().maven_url("https://example.invalid");
        let fetcher = StaticFetcher::new().with(
            config.mappings_url(),
            gzip_bytes("v1\tofficial\tnamed\nCLASS\ta\tFoo\n"),
        );

        let err = YarnGenerator::new(config).generate(&fetcher).unwrap_err();
        assert!(matches!(err, Error::UnknownNamespace { .. }));
    }
}
