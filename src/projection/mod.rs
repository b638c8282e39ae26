//! Projection engine: lock file in, graphs or a count report out.
//!
//! Every projection is a pure function of the (immutable) [`LockFile`]. The engine picks
//! one by the tagged [`Projection`] mode:
//!
//! | Mode                          | Output                                   |
//! |-------------------------------|------------------------------------------|
//! | [`Projection::Full`]          | one graph of the first resolution target |
//! | [`Projection::ImmediateOnly`] | the same graph without transitive packages |
//! | [`Projection::PerFramework`]  | one graph per declared framework         |
//! | [`Projection::PerTarget`]     | one graph per resolution target          |
//! | [`Projection::ReferenceCount`]| direct dependency reference counts       |
//!
//! Category colors come from the [`CategoryColors`] capability the exporter supplies.
//! A failed projection returns an error and no partial output.

mod counts;
mod framework;
mod target;

pub use counts::{ReferenceCounts, reference_counts};
pub use framework::per_framework_graphs;
pub use target::{full_target_graph, immediate_only_graph, per_target_graphs};

use crate::core::DepGraphError;
use crate::export::CategoryColors;
use crate::graph::Graph;
use crate::lockfile::LockFile;

/// Projection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// Every resolved library of the first target
    #[default]
    Full,
    /// Declared dependencies and project references of the first target
    ImmediateOnly,
    /// Declared dependencies, one graph per framework
    PerFramework,
    /// Every resolved library, one graph per target
    PerTarget,
    /// How often each direct dependency is referenced by resolved libraries
    ReferenceCount,
}

/// A graph destined for its own artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedGraph {
    /// Framework or target name the graph was built for
    pub name: String,
    /// The graph
    pub graph: Graph,
}

/// Result of a projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionOutput {
    /// A single graph
    Graph(Graph),
    /// Several independent graphs, in lock file order
    Graphs(Vec<NamedGraph>),
    /// A reference-count report
    Counts(ReferenceCounts),
}

/// Runs projections over a lock file.
pub struct ProjectionEngine<'a> {
    colors: &'a dyn CategoryColors,
}

impl<'a> ProjectionEngine<'a> {
    /// Create an engine that colors categories with `colors`.
    #[must_use]
    pub fn new(colors: &'a dyn CategoryColors) -> Self {
        Self {
            colors,
        }
    }

    /// Run the projection selected by `projection`.
    ///
    /// # Errors
    ///
    /// - [`DepGraphError::MissingTarget`] for full, immediate, per-target and count
    ///   projections when the lock file has no resolution targets
    /// - [`DepGraphError::MissingFramework`] for immediate and per-framework projections
    ///   when the package spec declares no frameworks
    pub fn project(
        &self,
        lockfile: &LockFile,
        projection: Projection,
    ) -> Result<ProjectionOutput, DepGraphError> {
        tracing::debug!("Running {projection:?} projection for '{}'", lockfile.package_spec.name);

        let output = match projection {
            Projection::Full => ProjectionOutput::Graph(self.full(lockfile)?),
            Projection::ImmediateOnly => ProjectionOutput::Graph(self.immediate_only(lockfile)?),
            Projection::PerFramework => ProjectionOutput::Graphs(self.per_framework(lockfile)?),
            Projection::PerTarget => ProjectionOutput::Graphs(self.per_target(lockfile)?),
            Projection::ReferenceCount => ProjectionOutput::Counts(self.reference_counts(lockfile)?),
        };

        Ok(output)
    }

    /// See [`full_target_graph`].
    ///
    /// # Errors
    ///
    /// [`DepGraphError::MissingTarget`] when the lock file has no targets.
    pub fn full(&self, lockfile: &LockFile) -> Result<Graph, DepGraphError> {
        full_target_graph(lockfile, self.colors)
    }

    /// See [`immediate_only_graph`].
    ///
    /// # Errors
    ///
    /// [`DepGraphError::MissingTarget`] or [`DepGraphError::MissingFramework`].
    pub fn immediate_only(&self, lockfile: &LockFile) -> Result<Graph, DepGraphError> {
        immediate_only_graph(lockfile, self.colors)
    }

    /// See [`per_framework_graphs`].
    ///
    /// # Errors
    ///
    /// [`DepGraphError::MissingFramework`] when no framework is declared.
    pub fn per_framework(&self, lockfile: &LockFile) -> Result<Vec<NamedGraph>, DepGraphError> {
        per_framework_graphs(&lockfile.package_spec)
    }

    /// See [`per_target_graphs`].
    ///
    /// # Errors
    ///
    /// [`DepGraphError::MissingTarget`] when the lock file has no targets.
    pub fn per_target(&self, lockfile: &LockFile) -> Result<Vec<NamedGraph>, DepGraphError> {
        per_target_graphs(lockfile)
    }

    /// See [`fn@reference_counts`].
    ///
    /// # Errors
    ///
    /// [`DepGraphError::MissingTarget`] when the lock file has no targets.
    pub fn reference_counts(&self, lockfile: &LockFile) -> Result<ReferenceCounts, DepGraphError> {
        reference_counts(lockfile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::HashedColors;
    use crate::test_utils::{app_scenario, sample_lock_file};

    #[test]
    fn test_project_dispatches_by_mode() {
        let lockfile = sample_lock_file();
        let engine = ProjectionEngine::new(&HashedColors);

        assert!(matches!(
            engine.project(&lockfile, Projection::Full).unwrap(),
            ProjectionOutput::Graph(_)
        ));
        assert!(matches!(
            engine.project(&lockfile, Projection::ImmediateOnly).unwrap(),
            ProjectionOutput::Graph(_)
        ));
        assert!(matches!(
            engine.project(&lockfile, Projection::PerFramework).unwrap(),
            ProjectionOutput::Graphs(_)
        ));
        assert!(matches!(
            engine.project(&lockfile, Projection::PerTarget).unwrap(),
            ProjectionOutput::Graphs(_)
        ));
        assert!(matches!(
            engine.project(&lockfile, Projection::ReferenceCount).unwrap(),
            ProjectionOutput::Counts(_)
        ));
    }

    #[test]
    fn test_every_projection_is_idempotent() {
        let lockfile = sample_lock_file();
        let engine = ProjectionEngine::new(&HashedColors);

        for projection in [
            Projection::Full,
            Projection::ImmediateOnly,
            Projection::PerFramework,
            Projection::PerTarget,
            Projection::ReferenceCount,
        ] {
            let first = engine.project(&lockfile, projection).unwrap();
            let second = engine.project(&lockfile, projection).unwrap();
            assert_eq!(first, second, "{projection:?} is not idempotent");
        }
    }

    #[test]
    fn test_missing_target_errors() {
        let mut lockfile = app_scenario();
        lockfile.targets.clear();
        let engine = ProjectionEngine::new(&HashedColors);

        for projection in [
            Projection::Full,
            Projection::ImmediateOnly,
            Projection::PerTarget,
            Projection::ReferenceCount,
        ] {
            let err = engine.project(&lockfile, projection).unwrap_err();
            assert!(matches!(err, DepGraphError::MissingTarget), "{projection:?}: {err:?}");
        }

        // Per-framework output ignores resolved targets
        assert!(engine.project(&lockfile, Projection::PerFramework).is_ok());
    }

    #[test]
    fn test_missing_framework_errors() {
        let mut lockfile = app_scenario();
        lockfile.package_spec.target_frameworks.clear();
        let engine = ProjectionEngine::new(&HashedColors);

        for projection in [Projection::ImmediateOnly, Projection::PerFramework] {
            let err = engine.project(&lockfile, projection).unwrap_err();
            assert!(matches!(err, DepGraphError::MissingFramework), "{projection:?}: {err:?}");
        }

        assert!(engine.project(&lockfile, Projection::Full).is_ok());
        assert!(engine.project(&lockfile, Projection::ReferenceCount).is_ok());
    }
}
