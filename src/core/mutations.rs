//! Explicit user mutations of a repository's changelists.
//!
//! Each use case is one load, one in-memory change and one save. They keep the
//! same invariants as reconciliation (system lists present, one owner per path)
//! but only [`ChangelistEngine::delete`] consults live status, to re-route the
//! files of the list being removed. Nothing here serializes against a concurrent
//! reconcile pass; callers request a refresh afterwards and the last write wins.

use crate::core::changelist::{
    generate_id, is_system_id, validate_name, Changelist, DEFAULT_ID, UNVERSIONED_ID,
};
use crate::core::engine::ChangelistEngine;
use crate::core::error::{ChangelistError, Result};
use crate::core::path::normalize_path;
use crate::core::snapshot::StatusSource;
use crate::core::store::PartitionStore;
use std::collections::BTreeSet;
use std::path::Path;

impl<S, P> ChangelistEngine<S, P>
where
    S: StatusSource,
    P: PartitionStore,
{
    /// Create an empty changelist and return it.
    pub fn create(&self, repo_root: &Path, name: &str) -> Result<Changelist> {
        let name = validate_name(name)?;
        let mut partition = self.load_or_default(repo_root)?;

        if partition.name_taken(&name, None) {
            return Err(ChangelistError::duplicate_name(name));
        }

        let list = Changelist::new(generate_id(), name);
        partition.lists.push(list.clone());
        self.commit(repo_root, &partition)?;

        log::info!("Created changelist '{}' ({})", list.name, list.id);
        Ok(list)
    }

    /// Delete a user changelist, re-routing its files by live status.
    ///
    /// Returns false when there was nothing to delete.
    pub fn delete(&self, repo_root: &Path, id: &str) -> Result<bool> {
        if is_system_id(id) {
            return Err(ChangelistError::SystemChangelistDelete);
        }

        let Some(mut partition) = self.load_existing(repo_root)? else {
            log::debug!("Delete of '{id}' skipped: no changelists stored");
            return Ok(false);
        };
        let Some(position) = partition.position(id) else {
            log::debug!("Delete of '{id}' skipped: no such changelist");
            return Ok(false);
        };

        let removed = partition.lists.remove(position);
        if !removed.is_empty() {
            let snapshot = self.snapshot(repo_root)?;
            let mut dropped = 0;
            for path in removed.files {
                let target = if snapshot.untracked.contains(&path) {
                    UNVERSIONED_ID
                } else if snapshot.changed.contains(&path) {
                    DEFAULT_ID
                } else {
                    dropped += 1;
                    continue;
                };
                if let Some(list) = partition.get_mut(target) {
                    list.files.insert(path);
                }
            }
            if dropped > 0 {
                log::debug!("Dropped {dropped} path(s) git no longer reports");
            }
        }

        partition.normalize();
        self.commit(repo_root, &partition)?;

        log::info!("Deleted changelist '{}' ({})", removed.name, removed.id);
        Ok(true)
    }

    /// Give a user changelist a new name.
    pub fn rename(&self, repo_root: &Path, id: &str, new_name: &str) -> Result<()> {
        if is_system_id(id) {
            return Err(ChangelistError::SystemChangelistRename);
        }
        let name = validate_name(new_name)?;
        let mut partition = self.load_or_default(repo_root)?;

        if partition.get(id).is_none() {
            return Err(ChangelistError::not_found(id));
        }
        if partition.name_taken(&name, Some(id)) {
            return Err(ChangelistError::duplicate_name(name));
        }
        if let Some(list) = partition.get_mut(id) {
            list.name = name;
        }

        self.commit(repo_root, &partition)
    }

    /// Move paths into a target changelist, taking them out of every other list.
    ///
    /// Returns how many paths were newly added to the target.
    pub fn move_files<I, T>(&self, repo_root: &Path, paths: I, target_id: &str) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let paths: BTreeSet<String> = paths
            .into_iter()
            .map(|p| normalize_path(p.as_ref()))
            .filter(|p| !p.is_empty())
            .collect();
        if paths.is_empty() {
            return Ok(0);
        }

        let Some(mut partition) = self.load_existing(repo_root)? else {
            log::debug!("Move skipped: no changelists stored");
            return Ok(0);
        };
        let Some(target) = partition.position(target_id) else {
            return Err(ChangelistError::not_found(target_id));
        };

        let mut moved = 0;
        for path in paths {
            for (index, list) in partition.lists.iter_mut().enumerate() {
                if index != target {
                    list.files.remove(&path);
                }
            }
            if partition.lists[target].files.insert(path) {
                moved += 1;
            }
        }

        self.commit(repo_root, &partition)?;
        log::info!("Moved {moved} file(s) to '{}'", partition.lists[target].name);
        Ok(moved)
    }
}
