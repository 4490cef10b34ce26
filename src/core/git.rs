//! Git repository access for the changelist core.
//!
//! This module provides [`GitRepo`], a thin wrapper around `git2` that produces a
//! classified [`StatusSnapshot`] for the reconciliation engine, plus the two index
//! operations the CLI needs (stage and unstage), which shell out to the `git`
//! binary so hooks and config behave exactly as they do for the user.
//!
//! # Public API
//! - [`GitRepo`]: Repository handle with status and index operations
//! - [`GitStatusSource`]: [`StatusSource`] implementation that opens the repository per call
//!
//! # Classification
//! - **Untracked**: new in the worktree and absent from the index
//! - **Changed**: any tracked change, staged or not; renames reported by their new path
//! - **Staged**: any change recorded in the index

use crate::core::{
    error::{ChangelistError, Result},
    git_status::GitStatus,
    path::normalize_path,
    snapshot::{StatusSnapshot, StatusSource},
};
use git2::{Repository, StatusEntry, StatusOptions};
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(GitRepo { repo })
    }

    /// Absolute path of the working tree; this is the key changelists are stored under
    pub fn root(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or(ChangelistError::NoWorkingDirectory)
    }

    /// Execute a git command in the repository's working directory
    fn execute_git_command(&self, mut cmd: std::process::Command) -> Result<()> {
        let workdir = self.root()?;
        cmd.current_dir(workdir);

        let output = cmd.output()?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            return Err(ChangelistError::git_command_failed(error_msg.trim()));
        }

        Ok(())
    }

    pub fn status_snapshot(&self) -> Result<StatusSnapshot> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .renames_head_to_index(true);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let mut snapshot = StatusSnapshot::new();

        for entry in statuses.iter() {
            let flags = entry.status();
            let Some(kind) = GitStatus::from_git2(flags) else {
                continue;
            };
            let Some(path) = current_path(&entry) else {
                log::warn!(
                    "Skipping status entry with a non UTF-8 path: {}",
                    String::from_utf8_lossy(entry.path_bytes())
                );
                continue;
            };

            if GitStatus::is_untracked_flags(flags) {
                snapshot.untracked.insert(path.clone());
            } else if GitStatus::is_changed_flags(flags) {
                snapshot.changed.insert(path.clone());
                if GitStatus::is_staged_flags(flags) {
                    snapshot.staged.insert(path.clone());
                }
                if let Some(previous) = previous_path(&entry) {
                    snapshot.renamed_from.insert(path.clone(), previous);
                }
            } else {
                continue;
            }

            snapshot.kinds.insert(path, kind);
        }

        log::debug!(
            "Status snapshot: {} untracked, {} changed, {} staged",
            snapshot.untracked.len(),
            snapshot.changed.len(),
            snapshot.staged.len()
        );

        Ok(snapshot.normalized())
    }

    pub fn add_files(&self, paths: &[String]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }

        let mut cmd = std::process::Command::new("git");
        cmd.arg("add").arg("-A").arg("--");

        for path in paths {
            cmd.arg(path);
        }

        self.execute_git_command(cmd)
    }

    pub fn reset_files(&self, paths: &[String]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }

        let mut cmd = std::process::Command::new("git");
        cmd.arg("reset").arg("-q").arg("--");

        for path in paths {
            cmd.arg(path);
        }

        self.execute_git_command(cmd)
    }

    pub fn get_repository(&self) -> &Repository {
        &self.repo
    }
}

/// The path an entry lives at now; index renames report their destination.
/// `None` when that path is not valid UTF-8.
fn current_path(entry: &StatusEntry<'_>) -> Option<String> {
    if entry.status().contains(git2::Status::INDEX_RENAMED) {
        if let Some(path) = entry.head_to_index().and_then(|d| d.new_file().path()) {
            return path.to_str().map(normalize_path);
        }
    }
    entry.path().map(normalize_path)
}

fn previous_path(entry: &StatusEntry<'_>) -> Option<String> {
    if !entry.status().contains(git2::Status::INDEX_RENAMED) {
        return None;
    }
    entry
        .head_to_index()
        .and_then(|d| d.old_file().path())
        .and_then(Path::to_str)
        .map(normalize_path)
}

/// Reads status straight from the repository at the requested root
#[derive(Debug, Clone, Copy, Default)]
pub struct GitStatusSource;

impl StatusSource for GitStatusSource {
    fn status_snapshot(&self, repo_root: &Path) -> Result<StatusSnapshot> {
        GitRepo::open(repo_root)?.status_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str]) -> Result<()> {
        std::process::Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()?;
        Ok(())
    }

    fn setup_test_repo() -> Result<(TempDir, GitRepo)> {
        let temp_dir = TempDir::new()?;
        let repo_path = temp_dir.path();

        git(repo_path, &["init"])?;
        git(repo_path, &["config", "user.name", "Test User"])?;
        git(repo_path, &["config", "user.email", "test@example.com"])?;

        let git_repo = GitRepo::open(repo_path)?;
        Ok((temp_dir, git_repo))
    }

    fn commit_file(dir: &Path, name: &str, content: &str) -> Result<()> {
        std::fs::write(dir.join(name), content)?;
        git(dir, &["add", name])?;
        git(dir, &["commit", "-m", &format!("Add {name}")])?;
        Ok(())
    }

    #[test]
    fn test_open_non_git_directory() {
        let non_git_path = std::path::PathBuf::from("/tmp/definitely/not/a/git/repo");
        assert!(GitRepo::open(&non_git_path).is_err());
    }

    #[test]
    fn test_snapshot_empty_repo() -> Result<()> {
        let (_temp_dir, git_repo) = setup_test_repo()?;
        let snapshot = git_repo.status_snapshot()?;
        assert!(snapshot.is_empty());
        Ok(())
    }

    #[test]
    fn test_snapshot_untracked_file() -> Result<()> {
        let (temp_dir, git_repo) = setup_test_repo()?;
        std::fs::write(temp_dir.path().join("test.txt"), "test content")?;

        let snapshot = git_repo.status_snapshot()?;
        assert!(snapshot.untracked.contains("test.txt"));
        assert!(snapshot.changed.is_empty());
        assert_eq!(snapshot.kind("test.txt"), Some(GitStatus::Untracked));
        Ok(())
    }

    #[test]
    fn test_snapshot_untracked_directory_is_recursed() -> Result<()> {
        let (temp_dir, git_repo) = setup_test_repo()?;
        let nested = temp_dir.path().join("dir").join("sub");
        std::fs::create_dir_all(&nested)?;
        std::fs::write(nested.join("deep.rs"), "fn main() {}")?;

        let snapshot = git_repo.status_snapshot()?;
        assert!(snapshot.untracked.contains("dir/sub/deep.rs"));
        Ok(())
    }

    #[test]
    fn test_snapshot_staged_new_file() -> Result<()> {
        let (temp_dir, git_repo) = setup_test_repo()?;
        std::fs::write(temp_dir.path().join("new.txt"), "content")?;
        git_repo.add_files(&["new.txt".to_string()])?;

        let snapshot = git_repo.status_snapshot()?;
        assert!(snapshot.changed.contains("new.txt"));
        assert!(snapshot.staged.contains("new.txt"));
        assert!(!snapshot.untracked.contains("new.txt"));
        Ok(())
    }

    #[test]
    fn test_snapshot_unstaged_modification() -> Result<()> {
        let (temp_dir, git_repo) = setup_test_repo()?;
        commit_file(temp_dir.path(), "a.txt", "one")?;
        std::fs::write(temp_dir.path().join("a.txt"), "two")?;

        let snapshot = git_repo.status_snapshot()?;
        assert!(snapshot.changed.contains("a.txt"));
        assert!(!snapshot.staged.contains("a.txt"));
        assert_eq!(snapshot.kind("a.txt"), Some(GitStatus::Modified));
        Ok(())
    }

    #[test]
    fn test_snapshot_committed_file_is_absent() -> Result<()> {
        let (temp_dir, git_repo) = setup_test_repo()?;
        commit_file(temp_dir.path(), "a.txt", "one")?;

        let snapshot = git_repo.status_snapshot()?;
        assert!(!snapshot.is_live("a.txt"));
        Ok(())
    }

    #[test]
    fn test_snapshot_staged_rename_reports_new_path() -> Result<()> {
        let (temp_dir, git_repo) = setup_test_repo()?;
        commit_file(temp_dir.path(), "old.txt", "some stable content\nline two\n")?;
        git(temp_dir.path(), &["mv", "old.txt", "new.txt"])?;

        let snapshot = git_repo.status_snapshot()?;
        assert!(snapshot.changed.contains("new.txt"));
        assert!(!snapshot.is_live("old.txt"));
        assert_eq!(
            snapshot.renamed_from.get("new.txt").map(String::as_str),
            Some("old.txt")
        );
        Ok(())
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_snapshot_skips_non_utf8_names() -> Result<()> {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (temp_dir, git_repo) = setup_test_repo()?;
        std::fs::write(temp_dir.path().join(OsStr::from_bytes(b"bad\xffname.txt")), "x")?;
        std::fs::write(temp_dir.path().join("good.txt"), "y")?;

        let snapshot = git_repo.status_snapshot()?;
        assert!(snapshot.untracked.contains("good.txt"));
        assert_eq!(snapshot.untracked.len(), 1);
        Ok(())
    }

    #[test]
    fn test_reset_files_unstages() -> Result<()> {
        let (temp_dir, git_repo) = setup_test_repo()?;
        commit_file(temp_dir.path(), "a.txt", "one")?;
        std::fs::write(temp_dir.path().join("a.txt"), "two")?;
        git_repo.add_files(&["a.txt".to_string()])?;
        assert!(git_repo.status_snapshot()?.staged.contains("a.txt"));

        git_repo.reset_files(&["a.txt".to_string()])?;

        let snapshot = git_repo.status_snapshot()?;
        assert!(snapshot.changed.contains("a.txt"));
        assert!(!snapshot.staged.contains("a.txt"));
        Ok(())
    }

    #[test]
    fn test_empty_path_lists_are_no_ops() -> Result<()> {
        let (_temp_dir, git_repo) = setup_test_repo()?;
        git_repo.add_files(&[])?;
        git_repo.reset_files(&[])?;
        assert!(git_repo.status_snapshot()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_status_source_opens_by_root() -> Result<()> {
        let (temp_dir, git_repo) = setup_test_repo()?;
        std::fs::write(temp_dir.path().join("x.txt"), "x")?;

        let snapshot = GitStatusSource.status_snapshot(&git_repo.root()?)?;
        assert!(snapshot.untracked.contains("x.txt"));
        Ok(())
    }
}
