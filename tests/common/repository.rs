//! Git repository management and setup utilities
//!
//! Provides functions for creating and managing test repositories, plus an isolated
//! home directory so config and stored changelists never touch the real user profile.

#![allow(dead_code)]

use git_changelists::core::command_init::CliEngine;
use git_changelists::core::error::{ChangelistError, Result};
use git_changelists::core::git::{GitRepo, GitStatusSource};
use git_changelists::core::store::JsonPartitionStore;
use git_changelists::ChangelistEngine;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test repository plus a separate home directory. Both TempDirs must be kept
/// alive for the duration of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub home: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Working tree root as git reports it; the key changelists are stored under
    pub fn root(&self) -> Result<PathBuf> {
        GitRepo::open(&self.path)?.root()
    }

    /// Where the CLI stores partitions given the XDG_DATA_HOME set by `cli_in`
    pub fn store_dir(&self) -> PathBuf {
        self.home
            .path()
            .join("data")
            .join("git-changelists")
            .join("partitions")
    }

    /// Engine wired to real git status and a JSON store inside the test home
    pub fn engine(&self) -> CliEngine {
        ChangelistEngine::new(GitStatusSource, JsonPartitionStore::new(self.store_dir()))
    }

    /// The CLI binary, run inside the repository with an isolated home
    pub fn cli(&self) -> Result<std::process::Command> {
        cli_in(&self.path, self.home.path())
    }
}

pub fn cli_in(dir: &Path, home: &Path) -> Result<std::process::Command> {
    use assert_cmd::prelude::*;

    let mut cmd = std::process::Command::cargo_bin("git-changelists")
        .map_err(|e| ChangelistError::git_command_failed(e.to_string()))?;
    cmd.current_dir(dir)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"));
    Ok(cmd)
}

fn git(repo_path: &Path, args: &[&str]) -> Result<()> {
    std::process::Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .map_err(ChangelistError::Io)?;
    Ok(())
}

/// Sets up a fresh git repository for testing
///
/// Creates a temporary directory, initializes it as a git repository,
/// and sets up basic git configuration to avoid user prompts.
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new().map_err(ChangelistError::Io)?;
    let home = TempDir::new().map_err(ChangelistError::Io)?;
    let repo_path = temp_dir.path().to_path_buf();

    git(&repo_path, &["init"])?;
    git(&repo_path, &["config", "user.name", "Test User"])?;
    git(&repo_path, &["config", "user.email", "test@example.com"])?;

    Ok(TestRepo {
        temp_dir,
        home,
        path: repo_path,
    })
}

/// Sets up a git repository with an initial commit containing "initial.txt"
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git_add(&repo.path, "initial.txt")?;
    git_commit(&repo.path, "Initial commit")?;

    Ok(repo)
}

/// Creates a file with specified content, creating parent directories as needed
pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    let path = repo_path.join(filename);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(ChangelistError::Io)?;
    }
    fs::write(path, content).map_err(ChangelistError::Io)?;
    Ok(())
}

/// Adds a file to the git index ("." for all files)
pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    git(repo_path, &["add", filename])
}

pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    git(repo_path, &["commit", "-m", message])
}

/// Renames a tracked file through the index
pub fn git_mv(repo_path: &Path, from: &str, to: &str) -> Result<()> {
    git(repo_path, &["mv", from, to])
}

/// Removes a file from the filesystem (not from git)
pub fn remove_file(repo_path: &Path, filename: &str) -> Result<()> {
    fs::remove_file(repo_path.join(filename)).map_err(ChangelistError::Io)?;
    Ok(())
}

/// Creates multiple test files with sequential content
pub fn create_test_files(repo_path: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        let content = format!("content{}\nline 2\n", i + 1);
        create_file(repo_path, filename, &content)?;
    }
    Ok(())
}

/// Modifies multiple test files with new content
pub fn modify_test_files(repo_path: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        let content = format!("modified{}\nline 2\nnew line\n", i + 1);
        create_file(repo_path, filename, &content)?;
    }
    Ok(())
}

/// Paths currently in the index with a change against HEAD
pub fn staged_paths(repo: &TestRepo) -> Result<Vec<String>> {
    let snapshot = GitRepo::open(&repo.path)?.status_snapshot()?;
    Ok(snapshot.staged.into_iter().collect())
}
