//! Core functionality for git-changelists.
//!
//! This module holds the changelist model, the status-driven reconciliation engine,
//! the mutation use cases, persistence, and the refresh coordinator, plus the git
//! adapter and output helpers the CLI is built from.

pub mod changelist;
pub mod command_init;
pub mod config;
pub mod coordinator;
pub mod dirs;
pub mod engine;
pub mod error;
pub mod git;
pub mod git_status;
pub mod mutations;
pub mod output;
pub mod partition;
pub mod path;
pub mod snapshot;
pub mod store;

// === Error handling ===
pub use error::{ChangelistError, Result};

// === Model ===
pub use changelist::{Changelist, DEFAULT_ID, UNVERSIONED_ID};
pub use partition::{PersistedPartition, PARTITION_VERSION};
pub use path::normalize_path;

// === Status ===
// Classified repository status consumed by the engine, and the git adapter producing it
pub use git::{GitRepo, GitStatusSource};
pub use git_status::GitStatus;
pub use snapshot::{StatusSnapshot, StatusSource};

// === Persistence ===
pub use store::{JsonPartitionStore, MemoryPartitionStore, PartitionStore};

// === Engine ===
pub use coordinator::RefreshCoordinator;
pub use engine::{reconcile_partition, ChangelistEngine, ReconcileStats, Reconciliation};

// === Command initialization ===
pub use command_init::{CliEngine, CommandContext};
pub use config::Config;

// === Output formatting ===
pub use output::{print_changelists, print_error, print_info, print_section_header, print_success};
