//! Graphs over resolved libraries.

use std::collections::HashSet;

use super::NamedGraph;
use crate::core::DepGraphError;
use crate::export::CategoryColors;
use crate::graph::{Category, Edge, Graph, Node};
use crate::lockfile::{LibraryType, LockFile, PackageSpec, ResolvedLibrary};

/// Graph of every library resolved for the first target.
///
/// Contains the project node, one node per library, every dependency edge, an edge
/// from the project to each directly referenced library, and an edge from the project
/// to each dependency the first framework declares. The last two groups can produce
/// parallel edges; they are kept.
///
/// # Errors
///
/// [`DepGraphError::MissingTarget`] when the lock file has no targets.
pub fn full_target_graph(
    lockfile: &LockFile,
    colors: &dyn CategoryColors,
) -> Result<Graph, DepGraphError> {
    let target = lockfile.first_target().ok_or(DepGraphError::MissingTarget)?;
    let libraries: Vec<&ResolvedLibrary> = target.libraries.iter().collect();

    Ok(build_target_graph(lockfile, &libraries, colors))
}

/// [`full_target_graph`] restricted to declared dependencies and project references.
///
/// A library is kept when the first framework declares it or it is a project. Edges of
/// kept libraries that point at dropped ones are left dangling.
///
/// # Errors
///
/// - [`DepGraphError::MissingTarget`] when the lock file has no targets
/// - [`DepGraphError::MissingFramework`] when no framework is declared
pub fn immediate_only_graph(
    lockfile: &LockFile,
    colors: &dyn CategoryColors,
) -> Result<Graph, DepGraphError> {
    let target = lockfile.first_target().ok_or(DepGraphError::MissingTarget)?;
    let framework =
        lockfile.package_spec.first_framework().ok_or(DepGraphError::MissingFramework)?;

    let declared: HashSet<&str> =
        framework.dependencies.iter().map(|dependency| dependency.name.as_str()).collect();
    let libraries: Vec<&ResolvedLibrary> = target
        .libraries
        .iter()
        .filter(|library| {
            declared.contains(library.name.as_str()) || library.library_type == LibraryType::Project
        })
        .collect();

    tracing::debug!(
        "Kept {} of {} libraries as immediate dependencies",
        libraries.len(),
        target.libraries.len()
    );

    Ok(build_target_graph(lockfile, &libraries, colors))
}

/// One graph per resolution target, without the project node or categories.
///
/// Nodes are labelled with the library name and carry its version as the `Version`
/// property; dependency edges are unlabeled.
///
/// # Errors
///
/// [`DepGraphError::MissingTarget`] when the lock file has no targets.
pub fn per_target_graphs(lockfile: &LockFile) -> Result<Vec<NamedGraph>, DepGraphError> {
    if lockfile.targets.is_empty() {
        return Err(DepGraphError::MissingTarget);
    }

    let graphs = lockfile
        .targets
        .iter()
        .map(|target| {
            let mut graph = Graph::new();
            for library in &target.libraries {
                graph.add_node(
                    Node::new(&library.name)
                        .with_label(&library.name)
                        .with_property("Version", &library.version),
                );
                for dependency in &library.dependencies {
                    graph.add_edge(Edge::new(&library.name, &dependency.id));
                }
            }
            NamedGraph {
                name: target.name.clone(),
                graph,
            }
        })
        .collect();

    Ok(graphs)
}

fn build_target_graph(
    lockfile: &LockFile,
    libraries: &[&ResolvedLibrary],
    colors: &dyn CategoryColors,
) -> Graph {
    let spec = &lockfile.package_spec;
    let direct_refs: HashSet<&str> = lockfile.direct_reference_names().into_iter().collect();

    let mut graph = Graph::new();
    graph.add_node(Node::new(&spec.name));

    for library in libraries {
        graph.add_node(library_node(library));

        let category = library.library_type.as_str();
        if !graph.categories().iter().any(|c| c.id == category) {
            graph.add_category(Category {
                id: category.to_string(),
                label: category.to_string(),
                background: Some(colors.color_for(category)),
            });
        }

        if direct_refs.contains(library.name.as_str()) {
            graph.add_edge(Edge::new(&spec.name, &library.name));
        }
        for dependency in &library.dependencies {
            graph.add_edge(
                Edge::new(&library.name, &dependency.id).with_label(&dependency.version_range),
            );
        }
    }

    add_declared_edges(&mut graph, spec);
    graph
}

fn library_node(library: &ResolvedLibrary) -> Node {
    Node::new(&library.name)
        .with_label(format!("{} [{}]", library.name, library.version))
        .with_category(library.library_type.as_str())
}

fn add_declared_edges(graph: &mut Graph, spec: &PackageSpec) {
    let Some(framework) = spec.first_framework() else {
        return;
    };
    for dependency in &framework.dependencies {
        graph.add_edge(
            Edge::new(&spec.name, &dependency.name).with_label(&dependency.version_range),
        );
    }
}
