//! Graphs of declared dependencies, one per target framework.

use super::NamedGraph;
use crate::core::DepGraphError;
use crate::graph::{Edge, Graph, Node};
use crate::lockfile::PackageSpec;

/// One graph per declared framework: the project and its declared dependencies.
///
/// # Errors
///
/// [`DepGraphError::MissingFramework`] when the package spec declares no frameworks.
pub fn per_framework_graphs(spec: &PackageSpec) -> Result<Vec<NamedGraph>, DepGraphError> {
    if spec.target_frameworks.is_empty() {
        return Err(DepGraphError::MissingFramework);
    }

    let graphs = spec
        .target_frameworks
        .iter()
        .map(|framework| {
            let mut graph = Graph::new();
            graph.add_node(Node::new(&spec.name));
            for dependency in &framework.dependencies {
                graph.add_node(Node::new(&dependency.name));
                graph.add_edge(
                    Edge::new(&spec.name, &dependency.name).with_label(&dependency.version_range),
                );
            }
            NamedGraph {
                name: framework.framework_name.clone(),
                graph,
            }
        })
        .collect();

    Ok(graphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lockfile::{FrameworkSpec, LibraryDependency};
    use crate::test_utils::sample_lock_file;

    fn dependency(name: &str, range: &str) -> LibraryDependency {
        LibraryDependency {
            name: name.to_string(),
            version_range: range.to_string(),
        }
    }

    #[test]
    fn test_one_graph_per_framework() {
        let mut spec = sample_lock_file().package_spec;
        spec.target_frameworks.push(FrameworkSpec {
            framework_name: "net48".to_string(),
            dependencies: vec![dependency("System.Memory", "[4.5.4, )")],
        });

        let graphs = per_framework_graphs(&spec).unwrap();
        assert_eq!(graphs.len(), spec.target_frameworks.len());

        for (named, framework) in graphs.iter().zip(&spec.target_frameworks) {
            assert_eq!(named.name, framework.framework_name);
            assert_eq!(named.graph.nodes().len(), framework.dependencies.len() + 1);
            assert_eq!(named.graph.nodes()[0].id, "App");
            assert!(named.graph.categories().is_empty());
        }

        let net48 = &graphs[1].graph;
        assert_eq!(
            net48.edges(),
            &[Edge::new("App", "System.Memory").with_label("[4.5.4, )")]
        );
    }

    #[test]
    fn test_framework_without_dependencies() {
        let spec = PackageSpec {
            name: "Empty".to_string(),
            target_frameworks: vec![FrameworkSpec {
                framework_name: "netstandard2.0".to_string(),
                dependencies: Vec::new(),
            }],
        };

        let graphs = per_framework_graphs(&spec).unwrap();
        assert_eq!(graphs[0].graph.nodes().len(), 1);
        assert!(graphs[0].graph.edges().is_empty());
    }

    #[test]
    fn test_no_frameworks() {
        let spec = PackageSpec {
            name: "App".to_string(),
            target_frameworks: Vec::new(),
        };
        assert!(matches!(per_framework_graphs(&spec), Err(DepGraphError::MissingFramework)));
    }
}
