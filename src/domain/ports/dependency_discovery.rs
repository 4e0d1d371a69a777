//! DependencyDiscovery port - which files a unit depends on
//!
//! How dependencies are discovered is left to the implementation; the
//! runner only needs the resulting set of paths.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::domain::entities::CheckUnit;
use crate::error::StampResult;

pub trait DependencyDiscovery {
    /// Files whose change should trigger a recheck of `unit`.
    ///
    /// `reported` carries whatever the checker reported as its inputs.
    fn discover(
        &self,
        unit: &CheckUnit,
        reported: Option<&[PathBuf]>,
    ) -> StampResult<BTreeSet<PathBuf>>;
}
