//! Centralized initialization for changelist commands.
//!
//! Every command starts the same way: find the repository around the current
//! directory, load the user config, and build an engine wired to real git status
//! and the on-disk partition store. [`CommandContext`] bundles the result.

use crate::core::{
    changelist::Changelist,
    config::Config,
    engine::ChangelistEngine,
    error::{ChangelistError, Result},
    git::{GitRepo, GitStatusSource},
    store::JsonPartitionStore,
};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub type CliEngine = ChangelistEngine<GitStatusSource, JsonPartitionStore>;

pub struct CommandContext {
    pub git_repo: GitRepo,
    pub root: PathBuf,
    pub config: Config,
    pub engine: Arc<CliEngine>,
}

impl CommandContext {
    /// Initialize from the current working directory
    pub fn initialize() -> Result<Self> {
        let current_dir = env::current_dir()?;
        Self::initialize_at(&current_dir, Config::load_or_create()?)
    }

    pub fn initialize_at(path: &Path, config: Config) -> Result<Self> {
        let git_repo = GitRepo::open(path).map_err(|_| ChangelistError::NotInGitRepo)?;
        let root = git_repo.root()?;

        let store = match &config.store_dir {
            Some(dir) => JsonPartitionStore::new(dir),
            None => JsonPartitionStore::from_default_location()?,
        };
        log::debug!(
            "Using repository {} with store {}",
            root.display(),
            store.base_dir().display()
        );

        Ok(Self {
            git_repo,
            root,
            config,
            engine: Arc::new(ChangelistEngine::new(GitStatusSource, store)),
        })
    }

    /// Resolve a changelist argument by id, then by case-insensitive name
    pub fn resolve(&self, id_or_name: &str) -> Result<Changelist> {
        let partition = self.engine.partition(&self.root)?;
        partition
            .find(id_or_name)
            .cloned()
            .ok_or_else(|| ChangelistError::not_found(id_or_name))
    }
}
