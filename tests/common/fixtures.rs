//! Predefined repository scenarios
//!
//! Provides functions for creating repositories with specific file states
//! to test various changelist scenarios consistently.

#![allow(dead_code)]

use super::repository::*;
use git_changelists::core::error::Result;

/// Scenario: three committed files, all modified, plus two untracked files
pub fn create_multi_file_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_test_files(&repo.path, &["file1.txt", "file2.txt", "file3.txt"])?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Initial commit")?;

    modify_test_files(&repo.path, &["file1.txt", "file2.txt", "file3.txt"])?;
    create_test_files(&repo.path, &["file4.txt", "file5.txt"])?;

    Ok(repo)
}
