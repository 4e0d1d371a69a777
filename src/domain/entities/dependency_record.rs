//! Dependency record entity
//!
//! A set of make rules `stamp: prerequisite...`. One record file may track
//! several units; each unit owns exactly one rule keyed by its stamp path.
//! This is a pure data structure - the make-include format lives in
//! `infrastructure::repositories::depfile`.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::domain::value_objects::normalize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyRecord {
    rules: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
}

impl DependencyRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of rules (tracked units)
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Prerequisites recorded for `stamp`
    pub fn dependencies_of(&self, stamp: &Path) -> Option<&BTreeSet<PathBuf>> {
        self.rules.get(&normalize(stamp))
    }

    /// Replace the rule for `stamp`
    pub fn set_rule<I, P>(&mut self, stamp: &Path, prerequisites: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let deps = prerequisites
            .into_iter()
            .map(|p| normalize(p.as_ref()))
            .collect();
        self.rules.insert(normalize(stamp), deps);
    }

    /// Merge prerequisites into the rule for `stamp` (make semantics for a
    /// target named twice)
    pub fn add_prerequisites<I, P>(&mut self, stamp: &Path, prerequisites: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.rules
            .entry(normalize(stamp))
            .or_default()
            .extend(prerequisites.into_iter().map(|p| normalize(p.as_ref())));
    }

    pub fn remove_rule(&mut self, stamp: &Path) -> Option<BTreeSet<PathBuf>> {
        self.rules.remove(&normalize(stamp))
    }

    pub fn rules(&self) -> impl Iterator<Item = (&Path, &BTreeSet<PathBuf>)> {
        self.rules.iter().map(|(k, v)| (k.as_path(), v))
    }

    /// Union of all prerequisites, for the phony rules
    pub fn all_prerequisites(&self) -> BTreeSet<&Path> {
        self.rules
            .values()
            .flat_map(|deps| deps.iter().map(PathBuf::as_path))
            .collect()
    }
}
