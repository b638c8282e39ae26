//! Normalized rendering of versions and version ranges.
//!
//! Lock files write the same version in several spellings (`1.0`, `1.0.0.0`,
//! `1.0.0+sha.abc`) and bare minimum versions where a range is meant (`4.3.0` for
//! `>= 4.3.0`). Labels in the generated graphs use one canonical form:
//!
//! | Input            | Normalized        |
//! |------------------|-------------------|
//! | `1.0`            | `1.0.0`           |
//! | `1.2.3.0`        | `1.2.3`           |
//! | `1.2.3+build.7`  | `1.2.3`           |
//! | `4.3.0` (range)  | `[4.3.0, )`       |
//! | `1.*` (range)    | `[1.*, )`         |
//! | `[1.2]` (range)  | `[1.2.0, 1.2.0]`  |
//! | `(,2.0]` (range) | `(, 2.0.0]`       |
//!
//! Anything that does not parse is returned trimmed but otherwise untouched.

/// Normalize a single version string.
#[must_use]
pub fn normalize_version(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_metadata = trimmed.split_once('+').map_or(trimmed, |(version, _)| version);
    let (release, prerelease) = match without_metadata.split_once('-') {
        Some((release, prerelease)) => (release, Some(prerelease)),
        None => (without_metadata, None),
    };

    let Some(mut parts) = parse_release(release) else {
        return trimmed.to_string();
    };

    while parts.len() < 3 {
        parts.push(0);
    }
    if parts.len() == 4 && parts[3] == 0 {
        parts.pop();
    }

    let mut normalized = parts.iter().map(u64::to_string).collect::<Vec<_>>().join(".");
    if let Some(prerelease) = prerelease {
        normalized.push('-');
        normalized.push_str(prerelease);
    }
    normalized
}

/// Normalize a version range expression.
#[must_use]
pub fn normalize_range(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let lower = trimmed.chars().next();
    let upper = trimmed.chars().last();
    match (lower, upper) {
        (Some(lb @ ('[' | '(')), Some(ub @ (']' | ')'))) if trimmed.len() >= 2 => {
            let inner = &trimmed[1..trimmed.len() - 1];
            match inner.split_once(',') {
                Some((min, max)) => {
                    format!("{lb}{}, {}{ub}", normalize_bound(min), normalize_bound(max))
                }
                None if lb == '[' && ub == ']' && is_version(inner) => {
                    let version = normalize_version(inner);
                    format!("[{version}, {version}]")
                }
                None => trimmed.to_string(),
            }
        }
        _ if is_version(trimmed) => format!("[{}, )", normalize_version(trimmed)),
        _ if is_floating(trimmed) => format!("[{trimmed}, )"),
        _ => trimmed.to_string(),
    }
}

fn normalize_bound(raw: &str) -> String {
    let bound = raw.trim();
    if bound.is_empty() { String::new() } else { normalize_version(bound) }
}

fn is_version(raw: &str) -> bool {
    let release = raw.trim().split(['-', '+']).next().unwrap_or_default();
    parse_release(release).is_some()
}

/// A floating version such as `*`, `1.*`, `1.2.*` or `1.0.0-beta*`.
fn is_floating(raw: &str) -> bool {
    let Some(prefix) = raw.strip_suffix('*') else {
        return false;
    };
    if prefix.contains('*') {
        return false;
    }
    if prefix.is_empty() {
        return true;
    }
    if let Some(release) = prefix.strip_suffix('.') {
        return parse_release(release).is_some();
    }
    // Floating prerelease: `1.0.0-beta*` or `1.0.0-*`
    match prefix.split_once('-') {
        Some((release, label)) => {
            parse_release(release).is_some()
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        }
        None => false,
    }
}

fn parse_release(release: &str) -> Option<Vec<u64>> {
    let parts = release
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;
    (1..=4).contains(&parts.len()).then_some(parts)
}
