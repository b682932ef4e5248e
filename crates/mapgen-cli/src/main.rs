//! mapgen - Generate cross-reference rename tables between mapping sets
//!
//! Each generator downloads the mapping sources of one project for a pinned
//! release, reconciles them and writes `<generator>.json` into the output
//! directory.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use mapgen_core::pipeline::{
    self, BukkitConfig, BukkitGenerator, McpConfig, McpGenerator, MojangConfig, MojangGenerator,
    YarnConfig, YarnGenerator,
};
use mapgen_core::{Fetcher, Generator, HttpFetcher};
use std::path::{Path, PathBuf};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// Generate cross-reference rename tables between mapping sets
#[derive(Parser, Debug)]
#[command(name = "mapgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Generator to run
    #[arg(value_enum)]
    generator: GeneratorKind,

    /// Output directory for generated .json files
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Which mapping project to generate a table for
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GeneratorKind {
    /// Spigot BuildData class renames (bukkit.json)
    Bukkit,
    /// MCP SRG names to official names (mcp.json)
    Mcp,
    /// Official names per obfuscated class (mojang.json)
    Mojang,
    /// Yarn intermediary to named renames (yarn.json)
    Yarn,
    /// Every generator, one after another
    All,
}

impl GeneratorKind {
    /// Generators selected by this kind, with their pinned default configuration
    fn generators(self) -> Vec<Box<dyn Generator>> {
        let bukkit = || Box::new(BukkitGenerator::new(BukkitConfig::default())) as Box<dyn Generator>;
        let mcp = || Box::new(McpGenerator::new(McpConfig::default())) as Box<dyn Generator>;
        let mojang = || Box::new(MojangGenerator::new(MojangConfig::default())) as Box<dyn Generator>;
        let yarn = || Box::new(YarnGenerator::new(YarnConfig::default())) as Box<dyn Generator>;

        match self {
            GeneratorKind::Bukkit => vec![bukkit()],
            GeneratorKind::Mcp => vec![mcp()],
            GeneratorKind::Mojang => vec![mojang()],
            GeneratorKind::Yarn => vec![yarn()],
            GeneratorKind::All => vec![bukkit(), mcp(), mojang(), yarn()],
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let fetcher = HttpFetcher::new().context("Failed to initialize HTTP client")?;
    run_generators(&cli.generator.generators(), &fetcher, &cli.output)
}

/// Runs each generator in turn
///
/// A failing generator does not stop the others, but any failure makes the
/// whole run fail.
fn run_generators(
    generators: &[Box<dyn Generator>],
    fetcher: &dyn Fetcher,
    output: &Path,
) -> Result<()> {
    if generators.len() == 1 {
        let generator = &generators[0];
        let path = pipeline::run(generator.as_ref(), fetcher, output)
            .with_context(|| format!("Generator '{}' failed", generator.name()))?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let mut failed = Vec::new();
    for generator in generators {
        info!("Running generator: {}", generator.name());
        match pipeline::run(generator.as_ref(), fetcher, output) {
            Ok(path) => println!("Wrote {}", path.display()),
            Err(e) => {
                error!("Generator '{}' failed: {:#}", generator.name(), anyhow::Error::from(e));
                failed.push(generator.name());
            }
        }
    }

    if !failed.is_empty() {
        bail!("{} generator(s) failed: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapgen_core::reconcile::{Output, RenameTable};
    use mapgen_core::StaticFetcher;
    use tempfile::TempDir;

    struct Fixed(&'static str);

    impl Generator for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn generate(&self, fetcher: &dyn Fetcher) -> mapgen_core::Result<Output> {
            fetcher.fetch(&format!("https://example.invalid/{}", self.0))?;
            let mut methods = RenameTable::new();
            methods.insert("a".to_string(), "b".to_string());
            Ok(Output {
                classes: None,
                methods: Some(methods),
            })
        }
    }

    #[test]
    fn test_generator_selection() {
        let names = |kind: GeneratorKind| {
            kind.generators()
                .iter()
                .map(|g| g.name())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(GeneratorKind::Mcp), vec!["mcp"]);
        assert_eq!(names(GeneratorKind::All), vec!["bukkit", "mcp", "mojang", "yarn"]);
    }

    #[test]
    fn test_run_generators_continues_after_failure() {
        let dir = TempDir::new().unwrap();
        let fetcher = StaticFetcher::new().with("https://example.invalid/good", "");
        let generators: Vec<Box<dyn Generator>> =
            vec![Box::new(Fixed("bad")), Box::new(Fixed("good"))];

        let err = run_generators(&generators, &fetcher, dir.path()).unwrap_err();
        assert!(err.to_string().contains("bad"));
        assert!(dir.path().join("good.json").exists());
        assert!(!dir.path().join("bad.json").exists());
    }

    #[test]
    fn test_single_generator_failure_propagates() {
        let dir = TempDir::new().unwrap();
        let generators: Vec<Box<dyn Generator>> = vec![Box::new(Fixed("bad"))];
        assert!(run_generators(&generators, &StaticFetcher::new(), dir.path()).is_err());
    }

    #[test]
    fn test_generator_is_positional() {
        let cli = Cli::try_parse_from(["mapgen", "yarn", "-o", "out", "-vv"]).unwrap();
        assert_eq!(cli.generator, GeneratorKind::Yarn);
        assert_eq!(cli.output, PathBuf::from("out"));
        assert_eq!(cli.verbose, 2);

        assert!(Cli::try_parse_from(["mapgen", "forge"]).is_err());
        assert!(Cli::try_parse_from(["mapgen"]).is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
