//! Lock file fixtures.

use crate::lockfile::{
    DependencyRef, DirectDependencyGroup, FrameworkSpec, LibraryDependency, LibraryType,
    LockFile, PackageSpec, ResolutionTarget, ResolvedLibrary,
};

/// Contents of `tests/fixtures/sample.assets.json`.
pub const SAMPLE_ASSETS_JSON: &str = include_str!("../../tests/fixtures/sample.assets.json");

/// Build a resolved library from `(id, range)` dependency pairs.
pub fn library(
    name: &str,
    version: &str,
    library_type: LibraryType,
    dependencies: &[(&str, &str)],
) -> ResolvedLibrary {
    ResolvedLibrary {
        name: name.to_string(),
        version: version.to_string(),
        library_type,
        dependencies: dependencies
            .iter()
            .map(|(id, range)| DependencyRef {
                id: (*id).to_string(),
                version_range: (*range).to_string(),
            })
            .collect(),
    }
}

fn declared(name: &str, range: &str) -> LibraryDependency {
    LibraryDependency {
        name: name.to_string(),
        version_range: range.to_string(),
    }
}

/// `App` targeting `net6.0` with a single reference to `Newtonsoft.Json` 13.0.1.
pub fn app_scenario() -> LockFile {
    LockFile {
        version: 3,
        package_spec: PackageSpec {
            name: "App".to_string(),
            target_frameworks: vec![FrameworkSpec {
                framework_name: "net6.0".to_string(),
                dependencies: vec![declared("Newtonsoft.Json", "13.0.1")],
            }],
        },
        dependency_groups: vec![DirectDependencyGroup {
            framework_label: "net6.0".to_string(),
            entries: vec!["Newtonsoft.Json 13.0.1".to_string()],
        }],
        targets: vec![ResolutionTarget {
            name: "net6.0".to_string(),
            libraries: vec![
                library("App", "1.0.0", LibraryType::Project, &[]),
                library("Newtonsoft.Json", "13.0.1", LibraryType::Package, &[]),
            ],
        }],
    }
}

/// The model [`SAMPLE_ASSETS_JSON`] reads into.
pub fn sample_lock_file() -> LockFile {
    LockFile {
        version: 3,
        package_spec: PackageSpec {
            name: "App".to_string(),
            target_frameworks: vec![FrameworkSpec {
                framework_name: "net6.0".to_string(),
                dependencies: vec![
                    declared("Newtonsoft.Json", "[13.0.1, )"),
                    declared("Serilog.Sinks.Console", "[4.0.0, )"),
                ],
            }],
        },
        dependency_groups: vec![DirectDependencyGroup {
            framework_label: "net6.0".to_string(),
            entries: vec![
                "Lib >= 1.0.0".to_string(),
                "Newtonsoft.Json >= 13.0.1".to_string(),
                "Serilog.Sinks.Console >= 4.0.0".to_string(),
            ],
        }],
        targets: vec![ResolutionTarget {
            name: "net6.0".to_string(),
            libraries: vec![
                library("Newtonsoft.Json", "13.0.1", LibraryType::Package, &[]),
                library("Serilog", "2.10.0", LibraryType::Package, &[]),
                library(
                    "Serilog.Sinks.Console",
                    "4.0.0",
                    LibraryType::Package,
                    &[("Serilog", "[2.10.0, )")],
                ),
                library("Lib", "1.0.0", LibraryType::Project, &[("Newtonsoft.Json", "[13.0.1, )")]),
            ],
        }],
    }
}
