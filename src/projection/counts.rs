//! How often the project's direct dependencies are referenced by resolved libraries.

use crate::core::DepGraphError;
use crate::lockfile::LockFile;

/// Reference counts keyed by direct dependency name, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceCounts {
    entries: Vec<(String, usize)>,
}

impl ReferenceCounts {
    /// `(name, count)` pairs in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// Count for `name`, or `None` if it is not a direct dependency.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<usize> {
        self.entries.iter().find(|(key, _)| key == name).map(|(_, count)| *count)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Report lines, `"{count}\t{name}"` each.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|(name, count)| format!("{count}\t{name}")).collect()
    }
}

/// Count references to each direct dependency within the first target.
///
/// The key set is the direct-reference names of the first dependency group; references
/// to anything else are ignored.
///
/// # Errors
///
/// [`DepGraphError::MissingTarget`] when the lock file has no targets.
pub fn reference_counts(lockfile: &LockFile) -> Result<ReferenceCounts, DepGraphError> {
    let target = lockfile.first_target().ok_or(DepGraphError::MissingTarget)?;

    let mut entries: Vec<(String, usize)> = Vec::new();
    for name in lockfile.direct_reference_names() {
        if !entries.iter().any(|(key, _)| key == name) {
            entries.push((name.to_string(), 0));
        }
    }

    for dependency in target.libraries.iter().flat_map(|library| &library.dependencies) {
        if let Some((_, count)) = entries.iter_mut().find(|(key, _)| *key == dependency.id) {
            *count += 1;
        }
    }

    Ok(ReferenceCounts {
        entries,
    })
}
