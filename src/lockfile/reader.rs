//! Reading `project.assets.json` into a [`LockFile`].
//!
//! The reader checks its inputs before touching the file contents: a missing source
//! file is reported first, then a missing log sink. Parsing goes through a set of raw
//! `serde` structs that mirror the on-disk layout, which are then folded into the model
//! types. `serde_json` is built with `preserve_order`, so object keys (targets,
//! frameworks, libraries, dependencies) come out in file order.
//!
//! # Layout
//!
//! ```text
//! {
//!   "version": 3,
//!   "targets": { "<target>": { "<Name>/<Version>": { "type": "package", "dependencies": { "<Id>": "<range>" } } } },
//!   "projectFileDependencyGroups": { "<framework>": [ "<Name> >= <Version>" ] },
//!   "project": {
//!     "restore": { "projectName": "<Name>" },
//!     "frameworks": { "<framework>": { "dependencies": { "<Name>": { "version": "<range>" } } } }
//!   },
//!   "logs": [ { "level": "Warning", "code": "NU1603", "message": "..." } ]
//! }
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use super::version::{normalize_range, normalize_version};
use super::{
    DependencyRef, DirectDependencyGroup, FrameworkSpec, LibraryDependency, LibraryType,
    LockFile, PackageSpec, ResolutionTarget, ResolvedLibrary, SUPPORTED_VERSION,
};
use crate::core::DepGraphError;
use crate::logging::{LogLevel, LogSink};

/// Project name used when the lock file does not record one.
const FALLBACK_PROJECT_NAME: &str = "project";

/// Source of [`LockFile`]s.
pub trait LockFileReader {
    /// Read the lock file at `path`, reporting diagnostics to `sink`.
    ///
    /// # Errors
    ///
    /// - [`DepGraphError::FileNotFound`] if `path` is not an existing file
    /// - [`DepGraphError::InvalidArgument`] if no sink is supplied
    /// - [`DepGraphError::LockFileParse`] if the contents are not a lock file
    fn read(&self, path: &Path, sink: Option<&dyn LogSink>) -> Result<LockFile, DepGraphError>;
}

/// Reader for NuGet `project.assets.json` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssetsFileReader;

impl AssetsFileReader {
    /// Create a reader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse lock file contents. `file` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`DepGraphError::LockFileParse`] for malformed JSON or an unexpected shape.
    pub fn parse(
        &self,
        content: &str,
        file: &str,
        sink: &dyn LogSink,
    ) -> Result<LockFile, DepGraphError> {
        let raw: RawAssetsFile =
            serde_json::from_str(content).map_err(|e| parse_error(file, &e))?;

        for entry in &raw.logs {
            match &entry.code {
                Some(code) => sink.log(entry.level, &format!("{code}: {}", entry.message)),
                None => sink.log(entry.level, &entry.message),
            }
        }

        if raw.version != SUPPORTED_VERSION {
            sink.log(
                LogLevel::Warning,
                &format!(
                    "Lock file {file} has version {}, only version {SUPPORTED_VERSION} is supported",
                    raw.version
                ),
            );
        }

        let lockfile = raw.into_lock_file(file)?;
        tracing::debug!(
            "Read {file}: project '{}', {} framework(s), {} target(s)",
            lockfile.package_spec.name,
            lockfile.package_spec.target_frameworks.len(),
            lockfile.targets.len()
        );
        Ok(lockfile)
    }
}

impl LockFileReader for AssetsFileReader {
    fn read(&self, path: &Path, sink: Option<&dyn LogSink>) -> Result<LockFile, DepGraphError> {
        if !path.is_file() {
            return Err(DepGraphError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let Some(sink) = sink else {
            return Err(DepGraphError::InvalidArgument {
                name: "sink".to_string(),
                reason: "a log sink is required to read lock files".to_string(),
            });
        };

        let file = path.display().to_string();
        tracing::debug!("Reading lock file {file}");
        let content = fs::read_to_string(path)?;
        self.parse(&content, &file, sink)
    }
}

fn parse_error(file: &str, error: &dyn std::fmt::Display) -> DepGraphError {
    DepGraphError::LockFileParse {
        file: file.to_string(),
        reason: error.to_string(),
    }
}

fn from_value<T: for<'de> Deserialize<'de>>(
    value: Value,
    file: &str,
    what: &str,
) -> Result<T, DepGraphError> {
    serde_json::from_value(value).map_err(|e| parse_error(file, &format!("{what}: {e}")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAssetsFile {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    targets: Map<String, Value>,
    #[serde(default)]
    project_file_dependency_groups: Map<String, Value>,
    #[serde(default)]
    project: Option<RawProject>,
    #[serde(default)]
    logs: Vec<RawLogMessage>,
}

#[derive(Debug, Deserialize)]
struct RawProject {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    restore: Option<RawRestore>,
    #[serde(default)]
    frameworks: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRestore {
    #[serde(default)]
    project_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFramework {
    #[serde(default)]
    dependencies: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDeclaredDependency {
    Range(String),
    Detailed {
        #[serde(default)]
        version: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct RawTargetLibrary {
    #[serde(rename = "type", default)]
    library_type: Option<String>,
    #[serde(default)]
    dependencies: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawLogMessage {
    level: LogLevel,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: String,
}

impl RawAssetsFile {
    fn into_lock_file(self, file: &str) -> Result<LockFile, DepGraphError> {
        let package_spec = match self.project {
            Some(project) => project.into_package_spec(file)?,
            None => PackageSpec {
                name: FALLBACK_PROJECT_NAME.to_string(),
                target_frameworks: Vec::new(),
            },
        };

        let dependency_groups = self
            .project_file_dependency_groups
            .into_iter()
            .map(|(framework_label, entries)| {
                let entries: Vec<String> =
                    from_value(entries, file, &format!("dependency group '{framework_label}'"))?;
                Ok(DirectDependencyGroup {
                    framework_label,
                    entries,
                })
            })
            .collect::<Result<Vec<_>, DepGraphError>>()?;

        let targets = self
            .targets
            .into_iter()
            .map(|(name, libraries)| read_target(name, libraries, file))
            .collect::<Result<Vec<_>, DepGraphError>>()?;

        Ok(LockFile {
            version: self.version,
            package_spec,
            dependency_groups,
            targets,
        })
    }
}

impl RawProject {
    fn into_package_spec(self, file: &str) -> Result<PackageSpec, DepGraphError> {
        let name = self
            .restore
            .and_then(|restore| restore.project_name)
            .or(self.name)
            .unwrap_or_else(|| FALLBACK_PROJECT_NAME.to_string());

        let target_frameworks = self
            .frameworks
            .into_iter()
            .map(|(framework_name, value)| {
                let framework: RawFramework =
                    from_value(value, file, &format!("framework '{framework_name}'"))?;
                let dependencies = framework
                    .dependencies
                    .into_iter()
                    .map(|(name, value)| {
                        let declared: RawDeclaredDependency =
                            from_value(value, file, &format!("dependency '{name}'"))?;
                        let range = match declared {
                            RawDeclaredDependency::Range(range) => range,
                            RawDeclaredDependency::Detailed {
                                version,
                            } => version.unwrap_or_default(),
                        };
                        Ok(LibraryDependency {
                            name,
                            version_range: normalize_range(&range),
                        })
                    })
                    .collect::<Result<Vec<_>, DepGraphError>>()?;
                Ok(FrameworkSpec {
                    framework_name,
                    dependencies,
                })
            })
            .collect::<Result<Vec<_>, DepGraphError>>()?;

        Ok(PackageSpec {
            name,
            target_frameworks,
        })
    }
}

fn read_target(name: String, libraries: Value, file: &str) -> Result<ResolutionTarget, DepGraphError> {
    let libraries: Map<String, Value> = from_value(libraries, file, &format!("target '{name}'"))?;

    let libraries = libraries
        .into_iter()
        .map(|(key, value)| {
            let raw: RawTargetLibrary = from_value(value, file, &format!("library '{key}'"))?;
            let (library_name, version) = key.rsplit_once('/').unwrap_or((key.as_str(), ""));

            let dependencies = raw
                .dependencies
                .into_iter()
                .map(|(id, range)| {
                    let range: String = from_value(range, file, &format!("dependency '{id}'"))?;
                    Ok(DependencyRef {
                        id,
                        version_range: normalize_range(&range),
                    })
                })
                .collect::<Result<Vec<_>, DepGraphError>>()?;

            Ok(ResolvedLibrary {
                name: library_name.to_string(),
                version: normalize_version(version),
                library_type: LibraryType::from(raw.library_type.as_deref().unwrap_or("package")),
                dependencies,
            })
        })
        .collect::<Result<Vec<_>, DepGraphError>>()?;

    Ok(ResolutionTarget {
        name,
        libraries,
    })
}
