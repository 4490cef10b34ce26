//! git-changelists - named groups of working-tree changes for Git repositories.
//!
//! A changelist is a user-maintained group of changed files. Groups are persisted
//! outside Git's index and reconciled against live `git status` on every refresh, so
//! they survive commits, stashes, checkouts and manual `git add`/`reset`. Every path
//! belongs to at most one changelist at a time.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - [`ChangelistEngine`]: reconciliation plus create, delete, rename and move
//! - [`RefreshCoordinator`]: debounced, single-flight refresh scheduling
//! - [`StatusSource`] and [`PartitionStore`]: the ports the engine is generic over

pub mod commands;
pub mod core;

pub use core::{
    reconcile_partition,
    Changelist,
    ChangelistEngine,
    ChangelistError,
    GitRepo,
    GitStatus,
    GitStatusSource,
    JsonPartitionStore,
    MemoryPartitionStore,
    PartitionStore,
    PersistedPartition,
    ReconcileStats,
    Reconciliation,
    RefreshCoordinator,
    Result,
    StatusSnapshot,
    StatusSource,
};
