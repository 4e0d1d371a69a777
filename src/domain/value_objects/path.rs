//! Path normalization for record keys and dependency sets
//!
//! Make compares prerequisite names textually, so `./App.py` and `App.py`
//! must collapse to a single spelling before they are stored or compared.

use std::path::{Component, Path, PathBuf};

/// Drop `.` components, keeping everything else verbatim.
///
/// `..` is kept on purpose: resolving it lexically changes meaning when a
/// parent is a symlink. An all-`.` path normalizes to `.`.
pub fn normalize(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if normalized.as_os_str().is_empty() && !path.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Directory containing `path`, with the empty parent of a bare file name
/// mapped to `.`
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
