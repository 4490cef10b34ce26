//! Unified output formatting utilities for consistent CLI presentation.
//!
//! This module provides the message helpers every command prints through, plus the
//! rendering of changelists and their files.
//!
//! # Color Scheme
//! - **Modified**: Yellow
//! - **Added**: Green
//! - **Deleted**: Red
//! - **Renamed**: Blue
//! - **Untracked**: Cyan
//! - **Unmerged**: Red bold

use crate::core::changelist::Changelist;
use crate::core::git_status::GitStatus;
use crate::core::partition::PersistedPartition;
use crate::core::snapshot::StatusSnapshot;
use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a success message with consistent styling
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// Apply the status color to any text
pub fn colorize(status: GitStatus, text: &str) -> ColoredString {
    match status {
        GitStatus::Modified => text.yellow(),
        GitStatus::Untracked => text.cyan(),
        GitStatus::Deleted => text.red(),
        GitStatus::Added => text.green(),
        GitStatus::Renamed => text.blue(),
        GitStatus::TypeChanged => text.magenta(),
        GitStatus::Unmerged => text.red().bold(),
    }
}

/// Status symbol padded to two columns
pub fn aligned_status(status: GitStatus) -> ColoredString {
    let symbol = status.as_str();
    if symbol.len() == 2 {
        colorize(status, symbol)
    } else {
        colorize(status, &format!("{symbol} "))
    }
}

pub fn format_changelist_header(list: &Changelist, staged: usize) -> String {
    let detail = match (list.len(), staged) {
        (0, _) => "(empty)".to_string(),
        (1, 0) => "(1 file)".to_string(),
        (n, 0) => format!("({n} files)"),
        (n, s) => format!("({n} file{}, {s} staged)", if n == 1 { "" } else { "s" }),
    };
    let id = if list.is_system() {
        String::new()
    } else {
        format!(" [{}]", list.id)
    };

    format!(
        "{} {}{} {}",
        "▸".blue(),
        list.name.white().bold(),
        id.bright_black(),
        detail.bright_black()
    )
}

pub fn format_file_line(path: &str, kind: Option<GitStatus>, staged: bool) -> String {
    let (status, colored_path) = match kind {
        Some(kind) => (aligned_status(kind), colorize(kind, path)),
        None => ("  ".normal(), path.normal()),
    };
    let marker = if staged {
        format!(" {}", "(staged)".green())
    } else {
        String::new()
    };
    format!("    {status} {colored_path}{marker}")
}

/// Print every changelist in partition order with its files
pub fn print_changelists(partition: &PersistedPartition, snapshot: &StatusSnapshot) {
    println!();
    for list in &partition.lists {
        let staged = list.staged_files(snapshot).count();
        println!("{}", format_changelist_header(list, staged));
        for path in &list.files {
            println!(
                "{}",
                format_file_line(path, snapshot.kind(path), snapshot.is_staged(path))
            );
        }
    }
    println!();
}
