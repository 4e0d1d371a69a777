//! Dependency Discovery Implementations
//!
//! Concrete implementations of the DependencyDiscovery port:
//!
//! - `TargetOnly` - the target file alone
//! - `ReportedDependencies` - whatever the checker wrote to `{deps_out}`
//! - `PythonImportScanner` - static scan of `import` statements
//!
//! `ConfiguredDiscovery` picks one of them from `[check] discovery`.

mod imports;
mod python;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::DiscoveryMode;
use crate::domain::entities::CheckUnit;
use crate::domain::ports::{DependencyDiscovery, FileSystem};
use crate::domain::value_objects::normalize;
use crate::error::StampResult;
use crate::infrastructure::fs::LocalFs;

pub use imports::PythonImportScanner;
pub use python::{parse_imports, ImportStatement};

/// Only the target itself
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetOnly;

impl DependencyDiscovery for TargetOnly {
    fn discover(
        &self,
        unit: &CheckUnit,
        _reported: Option<&[PathBuf]>,
    ) -> StampResult<BTreeSet<PathBuf>> {
        Ok(BTreeSet::from([normalize(unit.target())]))
    }
}

/// Inputs reported by the checker, falling back to the target alone
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportedDependencies;

impl DependencyDiscovery for ReportedDependencies {
    fn discover(
        &self,
        unit: &CheckUnit,
        reported: Option<&[PathBuf]>,
    ) -> StampResult<BTreeSet<PathBuf>> {
        let mut deps: BTreeSet<PathBuf> = reported
            .unwrap_or_default()
            .iter()
            .map(|p| normalize(p))
            .collect();
        deps.insert(normalize(unit.target()));
        Ok(deps)
    }
}

/// The strategy selected by configuration
pub enum ConfiguredDiscovery<F: FileSystem = LocalFs> {
    Target(TargetOnly),
    Reported(ReportedDependencies),
    Imports(PythonImportScanner<F>),
}

impl ConfiguredDiscovery<LocalFs> {
    pub fn from_mode(mode: DiscoveryMode) -> Self {
        match mode {
            DiscoveryMode::Target => Self::Target(TargetOnly),
            DiscoveryMode::Reported => Self::Reported(ReportedDependencies),
            DiscoveryMode::Imports => Self::Imports(PythonImportScanner::new()),
        }
    }
}

impl<F: FileSystem> DependencyDiscovery for ConfiguredDiscovery<F> {
    fn discover(
        &self,
        unit: &CheckUnit,
        reported: Option<&[PathBuf]>,
    ) -> StampResult<BTreeSet<PathBuf>> {
        match self {
            Self::Target(d) => d.discover(unit, reported),
            Self::Reported(d) => d.discover(unit, reported),
            Self::Imports(d) => d.discover(unit, reported),
        }
    }
}

/// Parse a `{deps_out}` report: one path per line, `#` comments and blank
/// lines skipped
pub fn parse_reported(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| normalize(Path::new(line)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> CheckUnit {
        CheckUnit::new("./App.py", "build/.App.py.stamp", ".dep-py~")
    }

    #[test]
    fn target_only_is_just_the_target() {
        let deps = TargetOnly.discover(&unit(), None).unwrap();

        assert_eq!(deps, BTreeSet::from([PathBuf::from("App.py")]));
    }

    #[test]
    fn reported_includes_target_and_dedups() {
        let reported = vec![PathBuf::from("App.py"), PathBuf::from("./lib/util.py")];

        let deps = ReportedDependencies
            .discover(&unit(), Some(&reported))
            .unwrap();

        assert_eq!(
            deps,
            BTreeSet::from([PathBuf::from("App.py"), PathBuf::from("lib/util.py")])
        );
    }

    #[test]
    fn reported_falls_back_to_target() {
        let deps = ReportedDependencies.discover(&unit(), None).unwrap();

        assert_eq!(deps.len(), 1);
    }

    #[test]
    fn parse_reported_skips_comments_and_blanks() {
        let paths = parse_reported("# mypy inputs\nApp.py\n\n  ./MainWindow.py  \n");

        assert_eq!(
            paths,
            vec![PathBuf::from("App.py"), PathBuf::from("MainWindow.py")]
        );
    }
}
