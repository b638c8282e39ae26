//! Command-line interface for depgraph.
//!
//! `depgraph` reads a resolved lock file (`project.assets.json`) and writes one of:
//!
//! - the full dependency graph of the first resolution target (default)
//! - the same graph limited to declared dependencies and project references (`--immediate`)
//! - one graph per declared framework (`--frameworks`)
//! - one graph per resolution target (`--targets`)
//! - a reference-count report (`--map`), also echoed to stdout
//!
//! ```bash
//! # DGML graph at ./generated.dgml
//! depgraph obj/project.assets.json
//!
//! # JSON graph of direct dependencies at out/deps.json
//! depgraph obj/project.assets.json -i -f json -d out -n deps
//!
//! # Reference counts at ./generated.txt
//! depgraph obj/project.assets.json --map
//! ```
//!
//! Logging goes to stderr. `--verbose` enables debug output, `--quiet` limits it to
//! errors, and `RUST_LOG` takes precedence over both.

mod graph;

pub use graph::{GraphOptions, run};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::export::GraphFormat;
use crate::projection::Projection;

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Suppress the summary of written files
    pub quiet: bool,
}

impl CliConfig {
    /// Install the global `tracing` subscriber, writing to stderr.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Generate dependency graphs from a resolved lock file.
#[derive(Parser, Debug)]
#[command(
    name = "depgraph",
    about = "Generate dependency graphs from resolved NuGet lock files",
    version,
    long_about = "Reads a project.assets.json lock file and writes its dependency graph as DGML or JSON, \
                  or a report of how often each direct dependency is referenced."
)]
pub struct Cli {
    /// Lock file to read
    source: PathBuf,

    /// Output directory, created if missing [default: current directory]
    #[arg(short, long, env = "DEPGRAPH_DESTINATION")]
    destination: Option<PathBuf>,

    /// Base name of the generated files
    #[arg(short, long, default_value = "generated")]
    name: String,

    /// Only include declared dependencies and project references
    #[arg(short, long, conflicts_with_all = ["map", "frameworks", "targets"])]
    immediate: bool,

    /// Write a reference-count report instead of a graph
    #[arg(short, long, conflicts_with_all = ["frameworks", "targets"])]
    map: bool,

    /// Write one graph per declared framework
    #[arg(long, conflicts_with = "targets")]
    frameworks: bool,

    /// Write one graph per resolution target
    #[arg(long)]
    targets: bool,

    /// Graph output format
    #[arg(short, long, value_enum, default_value_t = GraphFormat::Dgml)]
    format: GraphFormat,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors and skip the summary
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Run the command.
    ///
    /// # Errors
    ///
    /// Returns an error if options are invalid, the lock file cannot be read, the
    /// projection fails, or an output file cannot be written.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();

        let options = self.graph_options()?;
        let written = run(&options)?;

        if !config.quiet {
            for path in &written {
                println!("{} {}", "✓".green(), path.display());
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
            quiet: self.quiet,
        }
    }

    /// Projection selected by the mode flags.
    #[must_use]
    pub const fn projection(&self) -> Projection {
        if self.map {
            Projection::ReferenceCount
        } else if self.immediate {
            Projection::ImmediateOnly
        } else if self.frameworks {
            Projection::PerFramework
        } else if self.targets {
            Projection::PerTarget
        } else {
            Projection::Full
        }
    }

    /// Collect the options for [`run`].
    ///
    /// # Errors
    ///
    /// Returns an error if no destination is given and the current directory is
    /// unavailable.
    pub fn graph_options(&self) -> Result<GraphOptions> {
        let destination = match &self.destination {
            Some(destination) => destination.clone(),
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };

        Ok(GraphOptions {
            source: self.source.clone(),
            destination,
            name: self.name.clone(),
            projection: self.projection(),
            format: self.format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("depgraph").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["project.assets.json"]).unwrap();
        assert_eq!(cli.source, PathBuf::from("project.assets.json"));
        assert_eq!(cli.name, "generated");
        assert_eq!(cli.format, GraphFormat::Dgml);
        assert_eq!(cli.projection(), Projection::Full);
    }

    #[test]
    fn test_source_is_required() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_mode_flags() {
        let cases = [
            ("-i", Projection::ImmediateOnly),
            ("--immediate", Projection::ImmediateOnly),
            ("-m", Projection::ReferenceCount),
            ("--frameworks", Projection::PerFramework),
            ("--targets", Projection::PerTarget),
        ];
        for (flag, expected) in cases {
            let cli = parse(&["a.json", flag]).unwrap();
            assert_eq!(cli.projection(), expected, "{flag}");
        }
    }

    #[test]
    fn test_mode_flags_conflict() {
        for pair in [
            ["-i", "-m"],
            ["-i", "--frameworks"],
            ["-m", "--targets"],
            ["--frameworks", "--targets"],
        ] {
            let err = parse(&["a.json", pair[0], pair[1]]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict, "{pair:?}");
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(parse(&["a.json", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_format_values() {
        assert_eq!(parse(&["a.json", "-f", "json"]).unwrap().format, GraphFormat::Json);
        assert!(parse(&["a.json", "--format", "dot"]).is_err());
    }

    #[test]
    fn test_build_config_log_level() {
        let config = parse(&["a.json", "-v"]).unwrap().build_config();
        assert_eq!(config.log_level, "debug");
        assert!(!config.quiet);

        let config = parse(&["a.json", "-q"]).unwrap().build_config();
        assert_eq!(config.log_level, "error");
        assert!(config.quiet);

        let config = parse(&["a.json"]).unwrap().build_config();
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_graph_options() {
        let cli = parse(&["in/project.assets.json", "-d", "out", "-n", "deps", "--targets"]).unwrap();
        let options = cli.graph_options().unwrap();

        assert_eq!(options.source, PathBuf::from("in/project.assets.json"));
        assert_eq!(options.destination, PathBuf::from("out"));
        assert_eq!(options.name, "deps");
        assert_eq!(options.projection, Projection::PerTarget);
    }
}
