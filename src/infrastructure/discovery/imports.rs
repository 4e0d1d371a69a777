//! Transitive Python import scanner
//!
//! Resolves the imports of the target against its search roots and follows
//! every resolved file in turn. Modules that do not resolve under a root
//! (the standard library, site-packages such as `PyQt5`) are ignored.

use std::collections::{BTreeSet, VecDeque};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::python::{parse_imports, ImportStatement};
use crate::domain::entities::CheckUnit;
use crate::domain::ports::{DependencyDiscovery, FileSystem};
use crate::domain::value_objects::{normalize, parent_dir};
use crate::error::StampResult;
use crate::infrastructure::fs::LocalFs;

/// Candidate files for module `name` inside a directory, in lookup order
const MODULE_CANDIDATES: &[&str] = &["{}.py", "{}.pyi", "{}/__init__.py", "{}/__init__.pyi"];

/// Static dependency discovery over Python imports
pub struct PythonImportScanner<F: FileSystem = LocalFs> {
    fs: F,
}

impl PythonImportScanner<LocalFs> {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for PythonImportScanner<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> PythonImportScanner<F> {
    /// Create with a custom file system (for testing)
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    /// The target's directory, then `source_root`, then `lib_path`
    fn search_roots(unit: &CheckUnit) -> Vec<PathBuf> {
        let mut roots: Vec<PathBuf> = Vec::with_capacity(3);
        for root in [
            parent_dir(unit.target()),
            normalize(&unit.source_root),
            normalize(&unit.lib_path),
        ] {
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
        roots
    }

    /// First existing file implementing module `name` in `dir`
    fn module_file(&self, dir: &Path, name: &str) -> Option<PathBuf> {
        MODULE_CANDIDATES
            .iter()
            .map(|pattern| dir.join(pattern.replace("{}", name)))
            .find(|candidate| self.fs.exists(candidate))
    }

    fn package_init(&self, dir: &Path) -> Option<PathBuf> {
        ["__init__.py", "__init__.pyi"]
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| self.fs.exists(candidate))
    }

    /// Resolve `module` (possibly empty, for `from . import x`) and the
    /// submodules among `names` under one base directory.
    ///
    /// `None` when nothing resolved, so the caller can try the next root.
    fn resolve_in(&self, base: &Path, module: &[&str], names: &[String]) -> Option<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut dir = base.to_path_buf();

        let main = match module.split_last() {
            Some((last, parents)) => {
                for part in parents {
                    dir = dir.join(part);
                    files.extend(self.package_init(&dir));
                }
                let main = self.module_file(&dir, last);
                dir = dir.join(last);
                main
            }
            None => None,
        };

        let submodules: Vec<PathBuf> = names
            .iter()
            .filter(|n| n.as_str() != "*")
            .filter_map(|name| self.module_file(&dir, name))
            .collect();

        if main.is_none() && submodules.is_empty() {
            return None;
        }
        files.extend(main);
        files.extend(submodules);
        Some(files)
    }

    fn resolve(&self, file: &Path, stmt: &ImportStatement, roots: &[PathBuf]) -> Vec<PathBuf> {
        match stmt {
            ImportStatement::Import(modules) => modules
                .iter()
                .filter_map(|module| {
                    let parts: Vec<&str> = module.split('.').collect();
                    roots.iter().find_map(|root| self.resolve_in(root, &parts, &[]))
                })
                .flatten()
                .collect(),
            ImportStatement::From {
                level: 0,
                module: Some(module),
                names,
            } => {
                let parts: Vec<&str> = module.split('.').collect();
                roots
                    .iter()
                    .find_map(|root| self.resolve_in(root, &parts, names))
                    .unwrap_or_default()
            }
            ImportStatement::From {
                level,
                module,
                names,
            } => {
                let mut base = parent_dir(file);
                for _ in 1..*level {
                    base = ascend(&base);
                }
                let parts: Vec<&str> = module
                    .as_deref()
                    .map(|m| m.split('.').collect())
                    .unwrap_or_default();

                let mut files: Vec<PathBuf> = self.package_init(&base).into_iter().collect();
                files.extend(self.resolve_in(&base, &parts, names).unwrap_or_default());
                files
            }
        }
    }
}

/// Lexical parent that keeps climbing through `.` and `..`
fn ascend(dir: &Path) -> PathBuf {
    match dir.file_name() {
        Some(_) => parent_dir(dir),
        None => normalize(&dir.join("..")),
    }
}

impl<F: FileSystem> DependencyDiscovery for PythonImportScanner<F> {
    fn discover(
        &self,
        unit: &CheckUnit,
        _reported: Option<&[PathBuf]>,
    ) -> StampResult<BTreeSet<PathBuf>> {
        let roots = Self::search_roots(unit);
        let target = normalize(unit.target());

        let mut found = BTreeSet::from([target.clone()]);
        let mut queue = VecDeque::from([target]);

        while let Some(file) = queue.pop_front() {
            let content = match self.fs.read(&file) {
                Ok(content) => content,
                Err(e) => {
                    debug!(file = %file.display(), error = %e, "not scanning for imports");
                    continue;
                }
            };

            for stmt in parse_imports(&content) {
                for dep in self.resolve(&file, &stmt, &roots) {
                    let dep = normalize(&dep);
                    if found.insert(dep.clone()) {
                        trace!(from = %file.display(), dep = %dep.display(), "import resolved");
                        queue.push_back(dep);
                    }
                }
            }
        }

        Ok(found)
    }
}
