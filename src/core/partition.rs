//! The persisted partition of a repository's files into changelists.
//!
//! [`PersistedPartition`] is what the store saves per repository root. The store
//! does not enforce any invariant on it, so every read-modify-write cycle heals
//! the partition first: [`PersistedPartition::ensure_system_lists`] guarantees both
//! system lists exist exactly once at the front, and
//! [`PersistedPartition::normalize`] canonicalizes paths and keeps each path in at
//! most one list.

use crate::core::changelist::{
    Changelist, DEFAULT_ID, DEFAULT_NAME, UNVERSIONED_ID, UNVERSIONED_NAME,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Schema version written by this crate; anything else is treated as absent data
pub const PARTITION_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedPartition {
    pub version: u32,
    #[serde(default)]
    pub lists: Vec<Changelist>,
}

impl Default for PersistedPartition {
    fn default() -> Self {
        Self {
            version: PARTITION_VERSION,
            lists: vec![Changelist::default_list(), Changelist::unversioned_list()],
        }
    }
}

impl PersistedPartition {
    /// Make sure both system lists exist exactly once and lead the list order.
    ///
    /// Duplicate records sharing an id are merged into the first one. Returns true
    /// if anything had to be repaired.
    pub fn ensure_system_lists(&mut self) -> bool {
        let before = self.lists.len();
        let was_ordered = before >= 2
            && self.lists[0].id == DEFAULT_ID
            && self.lists[1].id == UNVERSIONED_ID;
        let mut default: Option<Changelist> = None;
        let mut unversioned: Option<Changelist> = None;
        let mut custom: Vec<Changelist> = Vec::with_capacity(before);
        let mut repaired = false;

        for list in self.lists.drain(..) {
            let slot = match list.id.as_str() {
                DEFAULT_ID => &mut default,
                UNVERSIONED_ID => &mut unversioned,
                _ => {
                    if let Some(existing) = custom.iter_mut().find(|l| l.id == list.id) {
                        log::warn!("Merging duplicate changelist record '{}'", list.id);
                        existing.files.extend(list.files);
                        repaired = true;
                    } else {
                        custom.push(list);
                    }
                    continue;
                }
            };
            if let Some(existing) = slot.as_mut() {
                log::warn!("Merging duplicate system changelist '{}'", list.id);
                existing.files.extend(list.files);
                repaired = true;
            } else {
                *slot = Some(list);
            }
        }

        let mut default = default.unwrap_or_else(|| {
            log::debug!("Inserting missing '{DEFAULT_ID}' changelist");
            repaired = true;
            Changelist::default_list()
        });
        let mut unversioned = unversioned.unwrap_or_else(|| {
            log::debug!("Inserting missing '{UNVERSIONED_ID}' changelist");
            repaired = true;
            Changelist::unversioned_list()
        });
        default.name = DEFAULT_NAME.to_string();
        unversioned.name = UNVERSIONED_NAME.to_string();

        self.lists = Vec::with_capacity(custom.len() + 2);
        self.lists.push(default);
        self.lists.push(unversioned);
        self.lists.extend(custom);
        self.version = PARTITION_VERSION;

        repaired || !was_ordered
    }

    /// Canonicalize every list and drop paths already owned by an earlier list.
    pub fn normalize(&mut self) {
        for list in &mut self.lists {
            list.normalize();
        }
        self.enforce_single_owner();
    }

    /// Keep each path only in the first list that contains it, in list order.
    pub fn enforce_single_owner(&mut self) {
        let mut seen: HashSet<String> = HashSet::new();
        for list in &mut self.lists {
            list.files.retain(|path| {
                if seen.contains(path) {
                    log::debug!("Dropping duplicate entry '{}' from '{}'", path, list.id);
                    false
                } else {
                    seen.insert(path.clone());
                    true
                }
            });
        }
    }

    /// Map each path to the index of the first list that contains it.
    ///
    /// Lists are visited in stored order, which after [`Self::ensure_system_lists`]
    /// means system lists first, then custom lists in persisted order.
    pub fn owner_index(&self) -> HashMap<String, usize> {
        let mut owners = HashMap::new();
        for (index, list) in self.lists.iter().enumerate() {
            for path in &list.files {
                owners.entry(path.clone()).or_insert(index);
            }
        }
        owners
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.lists.iter().position(|l| l.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Changelist> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Changelist> {
        self.lists.iter_mut().find(|l| l.id == id)
    }

    /// Look a list up by exact id, falling back to a case-insensitive name match.
    pub fn find(&self, id_or_name: &str) -> Option<&Changelist> {
        self.get(id_or_name).or_else(|| {
            let wanted = id_or_name.trim().to_lowercase();
            self.lists.iter().find(|l| l.name.to_lowercase() == wanted)
        })
    }

    /// Whether another list (other than `except_id`) already uses this name, ignoring case.
    pub fn name_taken(&self, name: &str, except_id: Option<&str>) -> bool {
        let wanted = name.trim().to_lowercase();
        self.lists
            .iter()
            .filter(|l| Some(l.id.as_str()) != except_id)
            .any(|l| l.name.to_lowercase() == wanted)
    }

    /// Remove a path from every list; returns how many lists held it.
    pub fn remove_everywhere(&mut self, path: &str) -> usize {
        self.lists
            .iter_mut()
            .map(|l| l.files.remove(path))
            .filter(|removed| *removed)
            .count()
    }

    pub fn owner_of(&self, path: &str) -> Option<&Changelist> {
        self.lists.iter().find(|l| l.contains(path))
    }

    pub fn total_files(&self) -> usize {
        self.lists.iter().map(Changelist::len).sum()
    }
}
