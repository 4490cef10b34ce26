//! Ephemeral view of repository status consumed by the reconciliation engine.
//!
//! A [`StatusSnapshot`] is fetched fresh for every reconciliation pass and thrown
//! away afterwards. It carries only already-classified sets; raw status records
//! stay inside the git adapter that implements [`StatusSource`].

use crate::core::error::Result;
use crate::core::git_status::GitStatus;
use crate::core::path::normalize_path;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Paths git does not track at all
    pub untracked: BTreeSet<String>,
    /// Tracked paths with any change, staged or not; renames by current path only
    pub changed: BTreeSet<String>,
    /// Subset of `changed` currently in the index
    pub staged: BTreeSet<String>,
    /// Current path -> previous path for renamed entries
    pub renamed_from: BTreeMap<String, String>,
    /// Display status per path
    pub kinds: BTreeMap<String, GitStatus>,
}

impl StatusSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_untracked<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            let path = normalize_path(path.as_ref());
            self.kinds.insert(path.clone(), GitStatus::Untracked);
            self.untracked.insert(path);
        }
        self
    }

    pub fn with_changed<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            let path = normalize_path(path.as_ref());
            self.kinds.entry(path.clone()).or_insert(GitStatus::Modified);
            self.changed.insert(path);
        }
        self
    }

    pub fn with_staged<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            let path = normalize_path(path.as_ref());
            self.changed.insert(path.clone());
            self.staged.insert(path);
        }
        self
    }

    pub fn with_rename(mut self, from: &str, to: &str) -> Self {
        let to = normalize_path(to);
        self.kinds.insert(to.clone(), GitStatus::Renamed);
        self.changed.insert(to.clone());
        self.renamed_from.insert(to, normalize_path(from));
        self
    }

    /// Canonicalize every path and make `untracked` and `changed` disjoint.
    ///
    /// Sources are trusted to keep the two sets apart; if one does not, untracked
    /// membership takes priority.
    pub fn normalized(self) -> Self {
        let untracked: BTreeSet<String> =
            self.untracked.iter().map(|p| normalize_path(p)).collect();
        let changed: BTreeSet<String> = self
            .changed
            .iter()
            .map(|p| normalize_path(p))
            .filter(|p| !untracked.contains(p))
            .collect();
        let overlap = self.changed.len().saturating_sub(changed.len());
        if overlap > 0 {
            log::warn!("{overlap} path(s) reported both untracked and changed; treating as untracked");
        }
        let staged = self
            .staged
            .iter()
            .map(|p| normalize_path(p))
            .filter(|p| changed.contains(p))
            .collect();
        let renamed_from = self
            .renamed_from
            .iter()
            .map(|(to, from)| (normalize_path(to), normalize_path(from)))
            .collect();
        let kinds = self
            .kinds
            .into_iter()
            .map(|(path, kind)| (normalize_path(&path), kind))
            .collect();

        Self {
            untracked,
            changed,
            staged,
            renamed_from,
            kinds,
        }
    }

    /// Whether git still reports this path at all
    pub fn is_live(&self, path: &str) -> bool {
        self.untracked.contains(path) || self.changed.contains(path)
    }

    pub fn is_staged(&self, path: &str) -> bool {
        self.staged.contains(path)
    }

    pub fn kind(&self, path: &str) -> Option<GitStatus> {
        self.kinds.get(path).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.untracked.is_empty() && self.changed.is_empty()
    }
}

/// Port to whatever knows the live status of a repository
pub trait StatusSource {
    fn status_snapshot(&self, repo_root: &Path) -> Result<StatusSnapshot>;
}

impl<T: StatusSource + ?Sized> StatusSource for &T {
    fn status_snapshot(&self, repo_root: &Path) -> Result<StatusSnapshot> {
        (**self).status_snapshot(repo_root)
    }
}

impl<T: StatusSource + ?Sized> StatusSource for std::sync::Arc<T> {
    fn status_snapshot(&self, repo_root: &Path) -> Result<StatusSnapshot> {
        (**self).status_snapshot(repo_root)
    }
}
