//! Status-driven reconciliation of changelists.
//!
//! [`ChangelistEngine`] merges two sources of truth for one repository root: the
//! live [`StatusSnapshot`] decides which paths exist and whether they are tracked,
//! the stored [`PersistedPartition`] records which changelist the user put each
//! path in. A pass loads once, computes, and saves at most once; a failing status
//! source aborts the pass before anything is written.
//!
//! Routing rules, applied by [`reconcile_partition`]:
//! - paths git no longer reports are dropped from every list
//! - untracked paths always land in the Unversioned list
//! - changed paths stay in the list that owned them, unless that list was
//!   Unversioned or there was no owner, in which case they go to Default
//! - a renamed path with no owner inherits the owner of its previous path

use crate::core::changelist::{DEFAULT_ID, UNVERSIONED_ID};
use crate::core::error::Result;
use crate::core::partition::PersistedPartition;
use crate::core::snapshot::{StatusSnapshot, StatusSource};
use crate::core::store::PartitionStore;
use parking_lot::RwLock;
use std::path::Path;

/// Invoked after every successful save; errors are logged, never propagated
pub type RefreshListener = Box<dyn Fn(&Path, &PersistedPartition) -> Result<()> + Send + Sync>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Paths dropped because git no longer reports them
    pub pruned: usize,
    /// Paths placed in Unversioned
    pub untracked: usize,
    /// Changed paths kept in (or carried over to) a user list
    pub preserved: usize,
    /// Changed paths that fell through to Default
    pub defaulted: usize,
}

/// Result of one reconciliation pass
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub partition: PersistedPartition,
    /// The snapshot the pass was computed from; not cached anywhere
    pub snapshot: StatusSnapshot,
    pub stats: ReconcileStats,
}

/// Recompute list membership from a status snapshot.
///
/// Expects a partition whose system lists are in place and a normalized snapshot.
pub fn reconcile_partition(
    partition: &mut PersistedPartition,
    snapshot: &StatusSnapshot,
) -> ReconcileStats {
    let mut stats = ReconcileStats::default();

    partition.normalize();
    let owners = partition.owner_index();
    let (Some(default_idx), Some(unversioned_idx)) = (
        partition.position(DEFAULT_ID),
        partition.position(UNVERSIONED_ID),
    ) else {
        log::error!("Reconciliation skipped: system changelists missing");
        return stats;
    };

    // Prune what git no longer reports, then lift every live path out so it can be routed.
    for list in &mut partition.lists {
        stats.pruned += list.files.iter().filter(|p| !snapshot.is_live(p)).count();
        list.files.clear();
    }

    for path in &snapshot.untracked {
        partition.lists[unversioned_idx].files.insert(path.clone());
        stats.untracked += 1;
    }

    for path in &snapshot.changed {
        let previous_owner = owners.get(path).copied().or_else(|| {
            snapshot
                .renamed_from
                .get(path)
                .and_then(|previous| owners.get(previous).copied())
        });
        let target = previous_owner
            .filter(|&idx| idx != unversioned_idx)
            .unwrap_or(default_idx);

        if target == default_idx {
            stats.defaulted += 1;
        } else {
            stats.preserved += 1;
        }
        partition.lists[target].files.insert(path.clone());
    }

    stats
}

pub struct ChangelistEngine<S, P> {
    status: S,
    store: P,
    listeners: RwLock<Vec<RefreshListener>>,
}

impl<S, P> ChangelistEngine<S, P>
where
    S: StatusSource,
    P: PartitionStore,
{
    pub fn new(status: S, store: P) -> Self {
        Self {
            status,
            store,
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn status_source(&self) -> &S {
        &self.status
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Register a callback fired after each successful save
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&Path, &PersistedPartition) -> Result<()> + Send + Sync + 'static,
    {
        self.listeners.write().push(Box::new(listener));
    }

    /// Run one reconciliation pass for a repository root.
    pub fn reconcile(&self, repo_root: &Path) -> Result<Reconciliation> {
        log::debug!("Reconciling changelists for {}", repo_root.display());

        let mut partition = self.load_or_default(repo_root)?;

        let snapshot = self
            .status
            .status_snapshot(repo_root)
            .map_err(|e| {
                log::warn!(
                    "Status unavailable for {}, keeping stored changelists: {e}",
                    repo_root.display()
                );
                e
            })?
            .normalized();

        let stats = reconcile_partition(&mut partition, &snapshot);
        log::debug!(
            "Reconciled {}: {} pruned, {} untracked, {} preserved, {} defaulted",
            repo_root.display(),
            stats.pruned,
            stats.untracked,
            stats.preserved,
            stats.defaulted
        );

        self.commit(repo_root, &partition)?;

        Ok(Reconciliation {
            partition,
            snapshot,
            stats,
        })
    }

    /// Current stored partition, healed but not written back
    pub fn partition(&self, repo_root: &Path) -> Result<PersistedPartition> {
        self.load_or_default(repo_root)
    }

    /// Load the stored partition, or `None` if there is nothing usable
    pub(crate) fn load_existing(&self, repo_root: &Path) -> Result<Option<PersistedPartition>> {
        Ok(self.store.load(repo_root)?.map(heal))
    }

    /// Load the stored partition, starting fresh when absent or from another schema version
    pub(crate) fn load_or_default(&self, repo_root: &Path) -> Result<PersistedPartition> {
        Ok(self.load_existing(repo_root)?.unwrap_or_else(|| {
            log::debug!(
                "No usable changelists stored for {}, starting fresh",
                repo_root.display()
            );
            PersistedPartition::default()
        }))
    }

    /// Fetch a normalized snapshot for callers outside the reconcile pass
    pub(crate) fn snapshot(&self, repo_root: &Path) -> Result<StatusSnapshot> {
        Ok(self.status.status_snapshot(repo_root)?.normalized())
    }

    /// Save in one write, then tell listeners
    pub(crate) fn commit(&self, repo_root: &Path, partition: &PersistedPartition) -> Result<()> {
        self.store.save(repo_root, partition)?;

        for listener in self.listeners.read().iter() {
            if let Err(e) = listener(repo_root, partition) {
                log::warn!("Changelist refresh listener failed: {e}");
            }
        }

        Ok(())
    }
}

fn heal(mut partition: PersistedPartition) -> PersistedPartition {
    if partition.ensure_system_lists() {
        log::debug!("Repaired system changelists in stored partition");
    }
    partition.normalize();
    partition
}
