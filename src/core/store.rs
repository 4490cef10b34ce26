//! Persistence of changelist partitions, keyed by repository root.
//!
//! The [`PartitionStore`] port is deliberately dumb: load and save a whole
//! [`PersistedPartition`]. It performs no invariant checks; the engine heals
//! whatever it loads. Data with a different schema version, or data that cannot be
//! parsed, is reported as absent so callers start over instead of failing.
//!
//! # Public API
//! - [`PartitionStore`]: Load/save port used by the engine and mutations
//! - [`JsonPartitionStore`]: One pretty-printed JSON file per repository root
//! - [`MemoryPartitionStore`]: In-process store holding serialized JSON text
//!
//! # Storage Strategy
//! - **JSON serialization**: Human-readable, diff-friendly files
//! - **Repository isolation**: Directory per repository, named by the md5 of its root path
//! - **Atomic replace**: Writes go to a temp file that is renamed over the target

use crate::core::dirs::get_data_directory;
use crate::core::error::{ChangelistError, Result};
use crate::core::partition::{PersistedPartition, PARTITION_VERSION};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const PARTITION_FILE: &str = "changelists.json";

pub trait PartitionStore {
    /// Returns `None` for missing, unreadable-as-JSON or wrong-version data
    fn load(&self, repo_root: &Path) -> Result<Option<PersistedPartition>>;

    fn save(&self, repo_root: &Path, partition: &PersistedPartition) -> Result<()>;
}

impl<T: PartitionStore + ?Sized> PartitionStore for &T {
    fn load(&self, repo_root: &Path) -> Result<Option<PersistedPartition>> {
        (**self).load(repo_root)
    }

    fn save(&self, repo_root: &Path, partition: &PersistedPartition) -> Result<()> {
        (**self).save(repo_root, partition)
    }
}

impl<T: PartitionStore + ?Sized> PartitionStore for Arc<T> {
    fn load(&self, repo_root: &Path) -> Result<Option<PersistedPartition>> {
        (**self).load(repo_root)
    }

    fn save(&self, repo_root: &Path, partition: &PersistedPartition) -> Result<()> {
        (**self).save(repo_root, partition)
    }
}

/// Serialize a partition the way every store writes it
pub fn encode_partition(partition: &PersistedPartition) -> Result<String> {
    let mut json = serde_json::to_string_pretty(partition).map_err(|e| {
        log::error!("Failed to serialize changelists: {e}");
        ChangelistError::store_serialization_failed(e)
    })?;
    json.push('\n');
    Ok(json)
}

/// Parse stored text, treating corrupt or foreign-version data as absent
pub fn decode_partition(content: &str, origin: &str) -> Option<PersistedPartition> {
    let partition: PersistedPartition = match serde_json::from_str(content) {
        Ok(partition) => partition,
        Err(e) => {
            log::warn!("Ignoring unparseable changelist data in {origin}: {e}");
            return None;
        }
    };

    if partition.version != PARTITION_VERSION {
        log::warn!(
            "Ignoring changelist data in {origin}: version {} (expected {PARTITION_VERSION})",
            partition.version
        );
        return None;
    }

    Some(partition)
}

fn repo_key(repo_root: &Path) -> String {
    format!("{:x}", md5::compute(repo_root.to_string_lossy().as_bytes()))
}

#[derive(Debug, Clone)]
pub struct JsonPartitionStore {
    base_dir: PathBuf,
}

impl JsonPartitionStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Store under the platform data directory
    pub fn from_default_location() -> Result<Self> {
        Ok(Self::new(get_data_directory()?))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn file_for(&self, repo_root: &Path) -> PathBuf {
        self.base_dir.join(repo_key(repo_root)).join(PARTITION_FILE)
    }
}

impl PartitionStore for JsonPartitionStore {
    fn load(&self, repo_root: &Path) -> Result<Option<PersistedPartition>> {
        let file = self.file_for(repo_root);
        log::debug!(
            "Loading changelists for {} from {}",
            repo_root.display(),
            file.display()
        );

        let content = match fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No changelist file yet at {}", file.display());
                return Ok(None);
            }
            Err(e) => {
                log::error!("Failed to read changelist file '{}': {}", file.display(), e);
                return Err(ChangelistError::store_read_failed(&file, e));
            }
        };

        Ok(decode_partition(&content, &file.display().to_string()))
    }

    fn save(&self, repo_root: &Path, partition: &PersistedPartition) -> Result<()> {
        let file = self.file_for(repo_root);
        let dir = file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.base_dir.clone());

        if let Err(e) = fs::create_dir_all(&dir) {
            log::error!("Failed to create store directory '{}': {}", dir.display(), e);
            return Err(ChangelistError::store_directory_creation_failed(&dir, e));
        }

        let json = encode_partition(partition)?;
        let temp = file.with_extension("json.tmp");

        if let Err(e) = fs::write(&temp, json) {
            log::error!("Failed to write changelist file '{}': {}", temp.display(), e);
            return Err(ChangelistError::store_write_failed(&temp, e));
        }
        if let Err(e) = fs::rename(&temp, &file) {
            log::error!("Failed to replace changelist file '{}': {}", file.display(), e);
            return Err(ChangelistError::store_write_failed(&file, e));
        }

        log::debug!(
            "Saved {} changelists ({} files) to {}",
            partition.lists.len(),
            partition.total_files(),
            file.display()
        );
        Ok(())
    }
}

/// Keeps serialized partitions in memory, so saved bytes can be inspected
#[derive(Debug, Default)]
pub struct MemoryPartitionStore {
    entries: Mutex<HashMap<PathBuf, String>>,
    saves: Mutex<usize>,
}

impl MemoryPartitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The exact text last saved for a root
    pub fn raw(&self, repo_root: &Path) -> Option<String> {
        self.entries.lock().get(repo_root).cloned()
    }

    /// Seed arbitrary text, e.g. a foreign schema version
    pub fn put_raw(&self, repo_root: &Path, content: impl Into<String>) {
        self.entries
            .lock()
            .insert(repo_root.to_path_buf(), content.into());
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

impl PartitionStore for MemoryPartitionStore {
    fn load(&self, repo_root: &Path) -> Result<Option<PersistedPartition>> {
        let entries = self.entries.lock();
        Ok(entries
            .get(repo_root)
            .and_then(|content| decode_partition(content, "memory store")))
    }

    fn save(&self, repo_root: &Path, partition: &PersistedPartition) -> Result<()> {
        let json = encode_partition(partition)?;
        self.entries.lock().insert(repo_root.to_path_buf(), json);
        *self.saves.lock() += 1;
        Ok(())
    }
}
