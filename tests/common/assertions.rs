//! Common assertion helpers for test output validation

#![allow(dead_code)]

use git_changelists::core::partition::PersistedPartition;
use predicates::prelude::*;

/// Creates a predicate that checks for git repository error messages
pub fn not_in_git_repo() -> impl Predicate<str> {
    predicates::str::contains("Not in a git repository")
}

/// Creates a predicate that checks both system changelists are listed
pub fn has_system_lists() -> impl Predicate<str> {
    predicates::str::contains("Changes").and(predicates::str::contains("Unversioned"))
}

pub fn has_staged_marker() -> impl Predicate<str> {
    predicates::str::contains("(staged)")
}

/// Sorted files of the changelist with the given name, or empty if it does not exist
pub fn files_named(partition: &PersistedPartition, name: &str) -> Vec<String> {
    partition
        .find(name)
        .map(|list| list.files.iter().cloned().collect())
        .unwrap_or_default()
}
