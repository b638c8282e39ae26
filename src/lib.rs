//! depgraph - dependency graphs from resolved NuGet lock files
//!
//! Reads the `project.assets.json` lock file a NuGet restore leaves behind and turns
//! its overlapping views (declared dependencies per framework, raw direct-dependency
//! declarations, resolved libraries per target) into node/edge graphs, written as DGML
//! or JSON, or into a report of how often each direct dependency is referenced.
//!
//! # Pipeline
//!
//! ```text
//! project.assets.json ──► lockfile::AssetsFileReader ──► LockFile
//!                                                          │
//!                          projection::ProjectionEngine ◄──┘
//!                                   │
//!              ┌────────────────────┴──────────────────┐
//!              ▼                                       ▼
//!        Graph / Graphs                         ReferenceCounts
//!              │                                       │
//!   export::write_graph (.dgml/.json)       export::write_report (.txt)
//! ```
//!
//! # Modules
//!
//! - [`lockfile`] - lock file model, version normalization and reader
//! - [`logging`] - log sink the reader reports diagnostics through
//! - [`graph`] - node/edge/category graph model
//! - [`projection`] - the projections from lock file to graphs and counts
//! - [`export`] - DGML/JSON/report writers and category colors
//! - [`cli`] - the `depgraph` command
//! - [`core`] - error types and user-facing error formatting
//! - [`utils`] - atomic file writes
//!
//! # Example
//!
//! ```rust,no_run
//! use depgraph::export::{GraphFormat, HashedColors, write_graph};
//! use depgraph::lockfile::{AssetsFileReader, LockFileReader};
//! use depgraph::logging::TracingLogSink;
//! use depgraph::projection::{Projection, ProjectionEngine, ProjectionOutput};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let lockfile = AssetsFileReader::new()
//!     .read(Path::new("obj/project.assets.json"), Some(&TracingLogSink))?;
//!
//! let colors = HashedColors;
//! if let ProjectionOutput::Graph(graph) =
//!     ProjectionEngine::new(&colors).project(&lockfile, Projection::Full)?
//! {
//!     write_graph(&graph, GraphFormat::Dgml, Path::new("out"), "generated")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod export;
pub mod graph;
pub mod lockfile;
pub mod logging;
pub mod projection;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
