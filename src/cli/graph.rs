use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::core::DepGraphError;
use crate::export::{
    GraphFormat, HashedColors, artifact_name, is_valid_file_name, write_graph, write_report,
};
use crate::lockfile::{AssetsFileReader, LockFileReader};
use crate::logging::TracingLogSink;
use crate::projection::{NamedGraph, Projection, ProjectionEngine, ProjectionOutput};
use crate::utils::fs::ensure_dir;

/// Everything one run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOptions {
    /// Lock file to read
    pub source: PathBuf,
    /// Directory the artifacts are written to
    pub destination: PathBuf,
    /// Base name of the artifacts
    pub name: String,
    /// Which projection to run
    pub projection: Projection,
    /// Output format for graphs
    pub format: GraphFormat,
}

impl GraphOptions {
    /// Check the options that do not depend on the filesystem.
    ///
    /// # Errors
    ///
    /// [`DepGraphError::InvalidArgument`] if `name` is not usable as a file name.
    pub fn validate(&self) -> Result<(), DepGraphError> {
        if !is_valid_file_name(&self.name) {
            return Err(DepGraphError::InvalidArgument {
                name: "name".to_string(),
                reason: format!("'{}' is not a valid file name", self.name),
            });
        }
        Ok(())
    }
}

/// File stems for per-framework or per-target graphs, in graph order.
///
/// # Errors
///
/// [`DepGraphError::InvalidArgument`] if two graph names map to the same file.
fn artifact_stems(options: &GraphOptions, graphs: &[NamedGraph]) -> Result<Vec<String>, DepGraphError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut stems = Vec::with_capacity(graphs.len());

    for named in graphs {
        let stem = format!("{}.{}", options.name, artifact_name(&named.name));
        if let Some(previous) = seen.insert(stem.clone(), &named.name) {
            let argument = if options.projection == Projection::PerFramework {
                "frameworks"
            } else {
                "targets"
            };
            return Err(DepGraphError::InvalidArgument {
                name: argument.to_string(),
                reason: format!(
                    "'{previous}' and '{}' both map to the artifact '{stem}'",
                    named.name
                ),
            });
        }
        stems.push(stem);
    }

    Ok(stems)
}

/// Read the lock file, run the projection and write its artifacts.
///
/// Reference-count reports are echoed to stdout as well. Returns the written paths.
///
/// # Errors
///
/// Returns an error if the options are invalid, the lock file cannot be read, the
/// projection fails or a file cannot be written. Nothing is written when reading or
/// projecting fails, or when two graphs would share a file name.
pub fn run(options: &GraphOptions) -> Result<Vec<PathBuf>> {
    options.validate()?;

    let lockfile = AssetsFileReader::new()
        .read(&options.source, Some(&TracingLogSink))
        .with_context(|| format!("Failed to read lock file {}", options.source.display()))?;

    let colors = HashedColors;
    let output = ProjectionEngine::new(&colors).project(&lockfile, options.projection)?;

    let stems = match &output {
        ProjectionOutput::Graphs(graphs) => artifact_stems(options, graphs)?,
        _ => Vec::new(),
    };

    ensure_dir(&options.destination)?;

    let written = match output {
        ProjectionOutput::Counts(counts) => {
            let lines = counts.lines();
            for line in &lines {
                println!("{line}");
            }
            vec![write_report(&lines, &options.destination, &options.name)?]
        }
        ProjectionOutput::Graph(graph) => {
            if graph.dangling_edges().next().is_some() {
                tracing::debug!(
                    "{} link(s) point at libraries outside the graph",
                    graph.dangling_edges().count()
                );
            }
            vec![write_graph(&graph, options.format, &options.destination, &options.name)?]
        }
        ProjectionOutput::Graphs(graphs) => graphs
            .iter()
            .zip(&stems)
            .map(|(named, stem)| write_graph(&named.graph, options.format, &options.destination, stem))
            .collect::<Result<Vec<_>>>()?,
    };

    Ok(written)
}
