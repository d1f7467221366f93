//! Slash-separated path helpers.
//!
//! Classification and filtering operate on `&str` paths with `/` separators
//! regardless of platform. `PathBuf` appears only at the I/O boundary; these
//! helpers convert and canonicalize at that boundary.

use std::path::{Component, Path};

/// Canonicalize a slash-separated path string.
///
/// Collapses repeated separators, drops `.` segments, and strips any
/// trailing separator. A leading `/` (rooted path) is preserved.
pub fn normalize(path: &str) -> String {
    let rooted = path.starts_with('/');
    let joined = path
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    if rooted {
        format!("/{}", joined)
    } else {
        joined
    }
}

/// The remainder of `path` under `root`, both normalized.
///
/// Returns `Some("")` when the two are equal and `None` when `path` does not
/// sit under `root`. The comparison is segment-aware: `foo/barbaz` is not
/// under `foo/bar`.
pub fn relative_to(path: &str, root: &str) -> Option<String> {
    let path = normalize(path);
    let root = normalize(root);

    if root.is_empty() {
        return Some(path);
    }
    if path == root {
        return Some(String::new());
    }

    let prefix = format!("{}/", root);
    path.strip_prefix(&prefix).map(|rest| rest.to_string())
}

/// Convert a platform path to a slash-separated string.
///
/// Uses `components()` so the result is stable on Windows, where the raw
/// string may contain backslashes.
pub fn to_slash(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => out.push('/'),
            Component::CurDir => {}
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}
