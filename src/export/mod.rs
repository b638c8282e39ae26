//! Writing projection results to disk.
//!
//! Graphs are written as DGML or pretty-printed JSON, reference-count reports as plain
//! text. Every file goes through [`crate::utils::fs::atomic_write`], so a failed run
//! never leaves a half-written artifact behind.

pub mod dgml;

use anyhow::{Context, Result};
use clap::ValueEnum;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::graph::{Color, Graph};
use crate::utils::fs::atomic_write;

/// Supplies background colors for node categories.
pub trait CategoryColors {
    /// Color for the category with this id. Must be deterministic.
    fn color_for(&self, category_id: &str) -> Color;
}

/// Colors derived from the first three bytes of the SHA-256 digest of the category id.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashedColors;

impl CategoryColors for HashedColors {
    fn color_for(&self, category_id: &str) -> Color {
        let digest = Sha256::digest(category_id.as_bytes());
        Color::rgb(digest[0], digest[1], digest[2])
    }
}

/// Output format for graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GraphFormat {
    /// Directed Graph Markup Language
    #[default]
    Dgml,
    /// Pretty-printed JSON
    Json,
}

impl GraphFormat {
    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Dgml => "dgml",
            Self::Json => "json",
        }
    }

    /// Render `graph` in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render(self, graph: &Graph) -> Result<String> {
        match self {
            Self::Dgml => dgml::to_dgml(graph).context("Failed to render DGML"),
            Self::Json => serde_json::to_string_pretty(graph).context("Failed to render JSON"),
        }
    }
}

impl fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Write `graph` to `{destination}/{name}.{extension}` and return the path written.
///
/// # Errors
///
/// Returns an error if rendering or writing fails.
pub fn write_graph(
    graph: &Graph,
    format: GraphFormat,
    destination: &Path,
    name: &str,
) -> Result<PathBuf> {
    let path = destination.join(format!("{name}.{}", format.extension()));
    let content = format.render(graph)?;

    atomic_write(&path, content.as_bytes())
        .with_context(|| format!("Failed to write graph to {}", path.display()))?;

    tracing::info!(
        "Wrote {} ({} nodes, {} links)",
        path.display(),
        graph.nodes().len(),
        graph.edges().len()
    );
    Ok(path)
}

/// Write report lines to `{destination}/{name}.txt`, one per line.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_report(lines: &[String], destination: &Path, name: &str) -> Result<PathBuf> {
    let path = destination.join(format!("{name}.txt"));
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }

    atomic_write(&path, content.as_bytes())
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    tracing::info!("Wrote {} ({} entries)", path.display(), lines.len());
    Ok(path)
}

/// Make `raw` usable as part of a file name.
///
/// Characters that are invalid in file names on common platforms are replaced with `_`.
#[must_use]
pub fn artifact_name(raw: &str) -> String {
    raw.chars().map(|c| if is_invalid_file_char(c) { '_' } else { c }).collect()
}

/// Whether `name` can be used unchanged as an output base name.
#[must_use]
pub fn is_valid_file_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.chars().any(is_invalid_file_char) && name != "." && name != ".."
}

fn is_invalid_file_char(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || c.is_control()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};
    use std::fs;
    use tempfile::TempDir;

    fn small_graph() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(Node::new("App"));
        graph.add_node(Node::new("Lib").with_label("Lib [1.0.0]"));
        graph.add_edge(Edge::new("App", "Lib").with_label("[1.0.0, )"));
        graph
    }

    #[test]
    fn test_hashed_colors_are_deterministic() {
        let colors = HashedColors;
        assert_eq!(colors.color_for("package"), colors.color_for("package"));
        assert_ne!(colors.color_for("package"), colors.color_for("project"));
    }

    #[test]
    fn test_hashed_colors_use_digest_prefix() {
        // SHA-256("abc") = ba7816bf...
        assert_eq!(HashedColors.color_for("abc").to_string(), "#FFBA7816");
    }

    #[test]
    fn test_write_graph_dgml() {
        let temp = TempDir::new().unwrap();
        let path = write_graph(&small_graph(), GraphFormat::Dgml, temp.path(), "generated").unwrap();

        assert_eq!(path, temp.path().join("generated.dgml"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains(r#"<Node Id="Lib" Label="Lib [1.0.0]"/>"#));
    }

    #[test]
    fn test_write_graph_json() {
        let temp = TempDir::new().unwrap();
        let path = write_graph(&small_graph(), GraphFormat::Json, temp.path(), "deps").unwrap();

        assert_eq!(path, temp.path().join("deps.json"));
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(value["edges"][0]["label"], "[1.0.0, )");
    }

    #[test]
    fn test_write_graph_creates_destination() {
        let temp = TempDir::new().unwrap();
        let destination = temp.path().join("nested").join("out");
        write_graph(&small_graph(), GraphFormat::Dgml, &destination, "generated").unwrap();

        assert!(destination.join("generated.dgml").is_file());
        assert!(!destination.join("generated.dgml.tmp").exists());
    }

    #[test]
    fn test_write_report() {
        let temp = TempDir::new().unwrap();
        let lines = vec!["2\tSerilog".to_string(), "0\tNewtonsoft.Json".to_string()];
        let path = write_report(&lines, temp.path(), "generated").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "2\tSerilog\n0\tNewtonsoft.Json\n");
    }

    #[test]
    fn test_write_empty_report() {
        let temp = TempDir::new().unwrap();
        let path = write_report(&[], temp.path(), "empty").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "");
    }

    #[test]
    fn test_artifact_name() {
        assert_eq!(artifact_name("net6.0"), "net6.0");
        assert_eq!(artifact_name(".NETCoreApp,Version=v2.0/win-x64"), ".NETCoreApp,Version=v2.0_win-x64");
        assert_eq!(artifact_name("a<b>c:d\"e\\f|g?h*i"), "a_b_c_d_e_f_g_h_i");
        assert_eq!(artifact_name("tab\there"), "tab_here");
    }

    #[test]
    fn test_is_valid_file_name() {
        assert!(is_valid_file_name("generated"));
        assert!(is_valid_file_name("my graph.v2"));
        assert!(!is_valid_file_name(""));
        assert!(!is_valid_file_name("   "));
        assert!(!is_valid_file_name("a/b"));
        assert!(!is_valid_file_name("what?"));
        assert!(!is_valid_file_name(".."));
    }
}
