use crate::commands::status::show_changelists;
use crate::core::{
    command_init::CommandContext, error::Result, path::normalize_path, print_info, print_success,
};
use std::env;
use std::path::Path;

pub fn execute_move(list: &str, paths: Vec<String>) -> Result<()> {
    let context = CommandContext::initialize()?;
    let target = context.resolve(list)?;

    let current_dir = env::current_dir()?;
    let relative: Vec<String> = paths
        .iter()
        .map(|path| repo_relative(&context.root, &current_dir, path))
        .collect();
    log::debug!("Moving {relative:?} to '{}'", target.id);

    let moved = context.engine.move_files(&context.root, &relative, &target.id)?;
    if moved == 0 {
        print_info(&format!("Nothing to move; files already in '{}'", target.name));
        return Ok(());
    }

    print_success(&format!("Moved {moved} file(s) to '{}'", target.name));
    show_changelists(&context)
}

/// Turn a path given on the command line into a repository-relative path
pub fn repo_relative(root: &Path, current_dir: &Path, path: &str) -> String {
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let current_dir = current_dir
        .canonicalize()
        .unwrap_or_else(|_| current_dir.to_path_buf());

    let absolute = current_dir.join(path);
    match absolute.strip_prefix(&root) {
        Ok(relative) => normalize_path(&relative.to_string_lossy()),
        Err(_) => normalize_path(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_repo_relative_from_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        assert_eq!(repo_relative(root, root, "src/lib.rs"), "src/lib.rs");
        assert_eq!(repo_relative(root, root, "./a.txt"), "a.txt");
    }

    #[test]
    fn test_repo_relative_from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let nested = root.join("src");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(repo_relative(root, &nested, "lib.rs"), "src/lib.rs");
    }

    #[test]
    fn test_repo_relative_outside_root_keeps_input() {
        let root = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        assert_eq!(
            repo_relative(root.path(), elsewhere.path(), "a.txt"),
            "a.txt"
        );
    }
}
