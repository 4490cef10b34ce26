//! The changelist entity and its naming rules.
//!
//! A [`Changelist`] is a named group of repository-relative file paths. Two system
//! changelists always exist in a repository: [`DEFAULT_ID`] ("Changes") receives
//! tracked changes nobody has claimed, and [`UNVERSIONED_ID`] ("Unversioned")
//! holds every untracked file. All other changelists are created by the user.
//!
//! # Public API
//! - [`Changelist`]: One group of files, serialized as `{ id, name, files }`
//! - [`validate_name`]: Trimmed, non-empty, not reserved
//! - [`generate_id`]: Fresh opaque identifier for user changelists

use crate::core::error::{ChangelistError, Result};
use crate::core::path::normalize_path;
use crate::core::snapshot::StatusSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Id of the system list holding claimed-by-nobody tracked changes
pub const DEFAULT_ID: &str = "default";
/// Id of the system list holding untracked files
pub const UNVERSIONED_ID: &str = "unversioned";

/// Display name of the default system list
pub const DEFAULT_NAME: &str = "Changes";
/// Display name of the unversioned system list
pub const UNVERSIONED_NAME: &str = "Unversioned";

const RESERVED_NAMES: [&str; 2] = ["changes", "unversioned"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelist {
    pub id: String,
    pub name: String,
    /// Canonical paths; the ordered set keeps them unique and sorted for stable output
    #[serde(default)]
    pub files: BTreeSet<String>,
}

impl Changelist {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            files: BTreeSet::new(),
        }
    }

    pub fn default_list() -> Self {
        Self::new(DEFAULT_ID, DEFAULT_NAME)
    }

    pub fn unversioned_list() -> Self {
        Self::new(UNVERSIONED_ID, UNVERSIONED_NAME)
    }

    pub fn is_system(&self) -> bool {
        is_system_id(&self.id)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains(path)
    }

    /// Insert a path in canonical form. Returns false if it was already present.
    pub fn insert(&mut self, path: &str) -> bool {
        self.files.insert(normalize_path(path))
    }

    pub fn remove(&mut self, path: &str) -> bool {
        self.files.remove(&normalize_path(path))
    }

    /// Re-canonicalize every stored path, collapsing entries that normalize to the same file.
    pub fn normalize(&mut self) {
        if self.files.iter().all(|p| normalize_path(p) == *p) {
            return;
        }
        self.files = self.files.iter().map(|p| normalize_path(p)).collect();
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files of this list that are currently in the index
    pub fn staged_files<'a>(
        &'a self,
        snapshot: &'a StatusSnapshot,
    ) -> impl Iterator<Item = &'a String> + 'a {
        self.files.iter().filter(|path| snapshot.is_staged(path))
    }
}

pub fn is_system_id(id: &str) -> bool {
    id == DEFAULT_ID || id == UNVERSIONED_ID
}

pub fn is_reserved_name(name: &str) -> bool {
    let lowered = name.trim().to_lowercase();
    RESERVED_NAMES.contains(&lowered.as_str())
}

/// Validate a user-supplied changelist name, returning its trimmed form.
///
/// Uniqueness against existing lists is checked by the partition, not here.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ChangelistError::EmptyName);
    }
    if is_reserved_name(trimmed) {
        return Err(ChangelistError::reserved_name(trimmed));
    }
    Ok(trimmed.to_string())
}

pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
