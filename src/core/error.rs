//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ChangelistError`] which covers every failure mode of the
//! changelist core: git access, partition persistence, changelist validation and
//! refresh scheduling. It uses `thiserror` for ergonomic error definitions and
//! includes constructors for the variants that carry context.
//!
//! # Public API
//! - [`ChangelistError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ChangelistError>`
//!
//! # Error Categories
//! - **Git operations**: Repository not found, git2 library errors, failed git commands
//! - **Validation**: Bad changelist names, unknown ids, system list protection
//! - **Store operations**: Directory, read, write and serialization failures
//! - **Coordination**: Missing runtime, disposed coordinator, failed refreshes

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for git-changelists
#[derive(Error, Debug)]
pub enum ChangelistError {
    // Git repository errors
    #[error("Not in a git repository")]
    NotInGitRepo,

    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    #[error("Repository has no working directory")]
    NoWorkingDirectory,

    #[error("git command failed: {message}")]
    GitCommandFailed { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Validation errors
    #[error("Changelist name cannot be empty")]
    EmptyName,

    #[error("'{name}' is a reserved changelist name")]
    ReservedName { name: String },

    #[error("A changelist named '{name}' already exists")]
    DuplicateName { name: String },

    #[error("Changelist not found: {id}")]
    ChangelistNotFound { id: String },

    #[error("System changelists cannot be deleted.")]
    SystemChangelistDelete,

    #[error("System changelists cannot be renamed.")]
    SystemChangelistRename,

    // Store errors
    #[error("Could not find data directory")]
    StoreDirectoryNotFound,

    #[error("Failed to create store directory '{path}': {source}")]
    StoreDirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize changelists: {source}")]
    StoreSerializationFailed { source: serde_json::Error },

    #[error("Failed to write changelist file '{path}': {source}")]
    StoreWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read changelist file '{path}': {source}")]
    StoreReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    // Coordination errors
    #[error("No async runtime available to schedule refreshes")]
    RuntimeUnavailable,

    #[error("Refresh coordinator has been disposed")]
    CoordinatorDisposed,

    #[error("Refresh failed: {message}")]
    RefreshFailed { message: String },

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),
}

/// Convenience type alias for Results using ChangelistError
pub type Result<T> = std::result::Result<T, ChangelistError>;

impl ChangelistError {
    /// Create a changelist not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::ChangelistNotFound { id: id.into() }
    }

    /// Create a reserved name error
    pub fn reserved_name(name: impl Into<String>) -> Self {
        Self::ReservedName { name: name.into() }
    }

    /// Create a duplicate name error
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Create a git command failed error
    pub fn git_command_failed(message: impl Into<String>) -> Self {
        Self::GitCommandFailed {
            message: message.into(),
        }
    }

    /// Create a refresh failed error
    pub fn refresh_failed(message: impl Into<String>) -> Self {
        Self::RefreshFailed {
            message: message.into(),
        }
    }

    /// Create a store directory creation failed error
    pub fn store_directory_creation_failed(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::StoreDirectoryCreationFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a store serialization failed error
    pub fn store_serialization_failed(source: serde_json::Error) -> Self {
        Self::StoreSerializationFailed { source }
    }

    /// Create a store write failed error
    pub fn store_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StoreWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a store read failed error
    pub fn store_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StoreReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is a user input problem rather than an environment failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyName
                | Self::ReservedName { .. }
                | Self::DuplicateName { .. }
                | Self::ChangelistNotFound { .. }
                | Self::SystemChangelistDelete
                | Self::SystemChangelistRename
        )
    }
}
