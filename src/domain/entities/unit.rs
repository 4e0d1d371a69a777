//! Check unit entity - one `check-py` invocation's worth of paths

use std::path::{Path, PathBuf};

/// The paths that identify one incrementally checked file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckUnit {
    /// Source file being checked
    pub target: PathBuf,
    /// Stamp whose mtime records the last successful check
    pub stamp: PathBuf,
    /// Make-include file holding the dependency record
    pub dep_file: PathBuf,
    /// Root the target's absolute imports are resolved against
    pub source_root: PathBuf,
    /// Extra library path (vendored or generated modules)
    pub lib_path: PathBuf,
}

impl CheckUnit {
    pub fn new(
        target: impl Into<PathBuf>,
        stamp: impl Into<PathBuf>,
        dep_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            target: target.into(),
            stamp: stamp.into(),
            dep_file: dep_file.into(),
            source_root: PathBuf::from("."),
            lib_path: PathBuf::from("."),
        }
    }

    pub fn with_roots(
        mut self,
        source_root: impl Into<PathBuf>,
        lib_path: impl Into<PathBuf>,
    ) -> Self {
        self.source_root = source_root.into();
        self.lib_path = lib_path.into();
        self
    }

    pub fn target(&self) -> &Path {
        &self.target
    }
}
