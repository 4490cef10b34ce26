//! Type-safe git file status enumeration.
//!
//! This module defines [`GitStatus`], the per-file status kind attached to a
//! [`StatusSnapshot`](crate::core::snapshot::StatusSnapshot) for decoration, and the
//! flag inspection that decides whether a path counts as untracked, changed and/or
//! staged.
//!
//! # Public API
//! - [`GitStatus`]: Main enumeration for all git file status types
//!
//! # Key Features
//! - **git2 integration**: Direct conversion from git2::Status flags
//! - **Classification**: Untracked vs. changed vs. staged, as the engine consumes it
//! - **Display formatting**: Short codes and descriptions for CLI output

use serde::{Deserialize, Serialize};
use std::fmt;

fn index_flags() -> git2::Status {
    git2::Status::INDEX_NEW
        | git2::Status::INDEX_MODIFIED
        | git2::Status::INDEX_DELETED
        | git2::Status::INDEX_RENAMED
        | git2::Status::INDEX_TYPECHANGE
}

fn worktree_change_flags() -> git2::Status {
    git2::Status::WT_MODIFIED
        | git2::Status::WT_DELETED
        | git2::Status::WT_RENAMED
        | git2::Status::WT_TYPECHANGE
        | git2::Status::CONFLICTED
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GitStatus {
    /// Modified file (M)
    Modified,
    /// Added/new file in index (A)
    Added,
    /// Deleted file (D)
    Deleted,
    /// Renamed file (R)
    Renamed,
    /// Type changed (T)
    TypeChanged,
    /// Untracked file (??)
    Untracked,
    /// Unmerged/conflicted file (UU)
    Unmerged,
}

impl GitStatus {
    /// Pick the single most relevant status for a set of git2 flags.
    ///
    /// Conflicts win, then index changes, then worktree changes. Returns `None`
    /// for clean or ignored entries.
    pub fn from_git2(flags: git2::Status) -> Option<GitStatus> {
        if flags.contains(git2::Status::CONFLICTED) {
            return Some(GitStatus::Unmerged);
        }
        if flags.contains(git2::Status::INDEX_NEW) {
            return Some(GitStatus::Added);
        }
        if flags.intersects(git2::Status::INDEX_RENAMED | git2::Status::WT_RENAMED) {
            return Some(GitStatus::Renamed);
        }
        if flags.intersects(git2::Status::INDEX_DELETED | git2::Status::WT_DELETED) {
            return Some(GitStatus::Deleted);
        }
        if flags.intersects(git2::Status::INDEX_TYPECHANGE | git2::Status::WT_TYPECHANGE) {
            return Some(GitStatus::TypeChanged);
        }
        if flags.intersects(git2::Status::INDEX_MODIFIED | git2::Status::WT_MODIFIED) {
            return Some(GitStatus::Modified);
        }
        if flags.contains(git2::Status::WT_NEW) {
            return Some(GitStatus::Untracked);
        }

        None
    }

    /// Purely untracked: new in the worktree and absent from the index
    pub fn is_untracked_flags(flags: git2::Status) -> bool {
        flags.contains(git2::Status::WT_NEW) && !flags.intersects(index_flags())
    }

    /// Present in the index with a change against HEAD
    pub fn is_staged_flags(flags: git2::Status) -> bool {
        flags.intersects(index_flags())
    }

    /// Tracked and reporting any change, staged or not
    pub fn is_changed_flags(flags: git2::Status) -> bool {
        !Self::is_untracked_flags(flags)
            && flags.intersects(index_flags() | worktree_change_flags())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GitStatus::Modified => "M",
            GitStatus::Added => "A",
            GitStatus::Deleted => "D",
            GitStatus::Renamed => "R",
            GitStatus::TypeChanged => "T",
            GitStatus::Untracked => "??",
            GitStatus::Unmerged => "UU",
        }
    }

    /// Get human-readable description for status
    pub fn description(&self) -> &'static str {
        match self {
            GitStatus::Modified => "modified",
            GitStatus::Added => "new",
            GitStatus::Deleted => "deleted",
            GitStatus::Renamed => "renamed",
            GitStatus::TypeChanged => "type changed",
            GitStatus::Untracked => "untracked",
            GitStatus::Unmerged => "both modified",
        }
    }
}

impl fmt::Display for GitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
