//! Canonical form for repository-relative paths.
//!
//! Every path stored in a changelist goes through [`normalize_path`] so that the
//! same file always compares equal regardless of where it was reported from:
//! forward slashes only, no leading `./`, no trailing or doubled separators, and a
//! lowercase drive letter when one is present.

/// Normalize a repository-relative path into its canonical string form.
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");

    let mut segments: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => continue,
            _ => segments.push(segment),
        }
    }

    let mut joined = segments.join("/");
    if unified.starts_with('/') {
        joined.insert(0, '/');
    }

    lowercase_drive_letter(joined)
}

fn lowercase_drive_letter(path: String) -> String {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        let mut fixed = path;
        fixed[..1].make_ascii_lowercase();
        fixed
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backslashes_become_forward_slashes() {
        assert_eq!(normalize_path("src\\core\\git.rs"), "src/core/git.rs");
    }

    #[test]
    fn test_leading_dot_and_duplicate_separators() {
        assert_eq!(normalize_path("./src//lib.rs"), "src/lib.rs");
        assert_eq!(normalize_path("src/./lib.rs/"), "src/lib.rs");
    }

    #[test]
    fn test_drive_letter_is_lowercased() {
        assert_eq!(normalize_path("C:\\repo\\file.txt"), "c:/repo/file.txt");
        assert_eq!(normalize_path("c:/repo/file.txt"), "c:/repo/file.txt");
    }

    #[test]
    fn test_absolute_unix_paths_keep_root() {
        assert_eq!(normalize_path("/tmp//repo/a.txt"), "/tmp/repo/a.txt");
    }

    #[test]
    fn test_already_canonical_is_unchanged() {
        let canonical = "docs/README.md";
        assert_eq!(normalize_path(canonical), canonical);
        assert_eq!(normalize_path(&normalize_path(canonical)), canonical);
    }

    #[test]
    fn test_surrounding_spaces_are_part_of_the_name() {
        assert_eq!(normalize_path(" notes.txt"), " notes.txt");
        assert_eq!(normalize_path("docs/draft .md "), "docs/draft .md ");
        assert_ne!(normalize_path(" notes.txt"), normalize_path("notes.txt"));
    }
}
