//! In-memory model of a resolved lock file (`project.assets.json`).
//!
//! The model is read once per invocation by a [`LockFileReader`] and never mutated
//! afterwards. It keeps the three overlapping views the lock file records:
//!
//! - [`PackageSpec`] - the project and the dependencies each target framework declares
//! - [`DirectDependencyGroup`] - raw `"Name >= 1.0.0"` declarations per framework
//! - [`ResolutionTarget`] - the libraries resolved for one runtime/framework combination,
//!   each with its outgoing [`DependencyRef`]s
//!
//! Every sequence keeps file order; the projections depend on it.

pub mod reader;
pub mod version;

pub use reader::{AssetsFileReader, LockFileReader};

use std::fmt;

/// The only lock file format version this crate understands.
pub const SUPPORTED_VERSION: u32 = 3;

/// A complete lock file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockFile {
    /// Format version recorded in the file
    pub version: u32,
    /// The project the lock file was restored for
    pub package_spec: PackageSpec,
    /// Raw direct-dependency declarations, one group per framework
    pub dependency_groups: Vec<DirectDependencyGroup>,
    /// Resolved libraries per target
    pub targets: Vec<ResolutionTarget>,
}

impl LockFile {
    /// The first resolution target, if any.
    #[must_use]
    pub fn first_target(&self) -> Option<&ResolutionTarget> {
        self.targets.first()
    }

    /// Names declared by the first direct-dependency group, in declaration order.
    ///
    /// Duplicates are kept; callers that need a set collapse them.
    #[must_use]
    pub fn direct_reference_names(&self) -> Vec<&str> {
        self.dependency_groups
            .first()
            .map(DirectDependencyGroup::names)
            .unwrap_or_default()
    }
}

/// The project itself and its per-framework declarations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageSpec {
    /// Project name; becomes the root node of every graph
    pub name: String,
    /// Declared frameworks in file order
    pub target_frameworks: Vec<FrameworkSpec>,
}

impl PackageSpec {
    /// The first declared framework, if any.
    #[must_use]
    pub fn first_framework(&self) -> Option<&FrameworkSpec> {
        self.target_frameworks.first()
    }
}

/// Dependencies declared for one target framework.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameworkSpec {
    /// Framework moniker, e.g. `net6.0`
    pub framework_name: String,
    /// Declared dependencies in file order
    pub dependencies: Vec<LibraryDependency>,
}

/// A dependency declared by the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryDependency {
    /// Package or project name
    pub name: String,
    /// Normalized version range
    pub version_range: String,
}

/// Raw declarations for one framework, e.g. `"Newtonsoft.Json >= 13.0.1"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectDependencyGroup {
    /// Framework label as written in the file
    pub framework_label: String,
    /// Declarations in file order
    pub entries: Vec<String>,
}

impl DirectDependencyGroup {
    /// Names of every entry, in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| split_declaration(entry).0).collect()
    }
}

/// Split a raw declaration on its first space into `(name, rest)`.
///
/// `rest` is empty when the declaration has no space.
#[must_use]
pub fn split_declaration(entry: &str) -> (&str, &str) {
    entry.split_once(' ').unwrap_or((entry, ""))
}

/// Libraries resolved for one runtime/framework combination.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolutionTarget {
    /// Target name, e.g. `net6.0` or `.NETCoreApp,Version=v2.0/win-x64`
    pub name: String,
    /// Resolved libraries in file order
    pub libraries: Vec<ResolvedLibrary>,
}

/// One resolved library within a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLibrary {
    /// Library name
    pub name: String,
    /// Normalized version
    pub version: String,
    /// Project reference or external package
    pub library_type: LibraryType,
    /// Outgoing dependency edges in file order
    pub dependencies: Vec<DependencyRef>,
}

/// An outgoing dependency edge of a resolved library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRef {
    /// Name of the library depended on
    pub id: String,
    /// Normalized version range
    pub version_range: String,
}

/// Kind of a resolved library.
///
/// Unknown kinds are carried verbatim in [`LibraryType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LibraryType {
    /// Another project in the same build
    Project,
    /// An external package
    Package,
    /// Anything else the lock file records
    Other(String),
}

impl LibraryType {
    /// The lowercase text used for categories and serialization.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Project => "project",
            Self::Package => "package",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for LibraryType {
    fn from(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "project" => Self::Project,
            "package" => Self::Package,
            _ => Self::Other(raw.to_string()),
        }
    }
}

impl fmt::Display for LibraryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_declaration() {
        assert_eq!(split_declaration("Newtonsoft.Json >= 13.0.1"), ("Newtonsoft.Json", ">= 13.0.1"));
        assert_eq!(split_declaration("Serilog"), ("Serilog", ""));
        assert_eq!(split_declaration(""), ("", ""));
    }

    #[test]
    fn test_direct_reference_names_uses_first_group() {
        let lockfile = LockFile {
            dependency_groups: vec![
                DirectDependencyGroup {
                    framework_label: "net6.0".to_string(),
                    entries: vec!["A >= 1.0.0".to_string(), "B".to_string(), "A >= 2.0.0".to_string()],
                },
                DirectDependencyGroup {
                    framework_label: "net48".to_string(),
                    entries: vec!["C >= 1.0.0".to_string()],
                },
            ],
            ..LockFile::default()
        };

        assert_eq!(lockfile.direct_reference_names(), vec!["A", "B", "A"]);
    }

    #[test]
    fn test_direct_reference_names_without_groups() {
        assert!(LockFile::default().direct_reference_names().is_empty());
    }

    #[test]
    fn test_library_type_from_str() {
        assert_eq!(LibraryType::from("project"), LibraryType::Project);
        assert_eq!(LibraryType::from("Package"), LibraryType::Package);
        assert_eq!(LibraryType::from("msbuildproject"), LibraryType::Other("msbuildproject".to_string()));
    }

    #[test]
    fn test_library_type_display() {
        assert_eq!(LibraryType::Project.to_string(), "project");
        assert_eq!(LibraryType::Other("Reference".to_string()).to_string(), "Reference");
        assert_eq!(LibraryType::Package.to_string(), "package");
    }
}
