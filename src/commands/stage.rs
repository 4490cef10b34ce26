use crate::commands::status::show_changelists;
use crate::core::{command_init::CommandContext, error::Result, print_info, print_success};

/// Make the index match one changelist: stage its files, unstage everyone else's
pub fn execute_stage(list: &str) -> Result<()> {
    let context = CommandContext::initialize()?;
    let target = context.resolve(list)?;

    let reconciliation = context.engine.reconcile(&context.root)?;
    let snapshot = &reconciliation.snapshot;
    let Some(current) = reconciliation.partition.get(&target.id) else {
        print_info(&format!("Changelist '{}' no longer exists", target.name));
        return Ok(());
    };

    let to_stage: Vec<String> = current
        .files
        .iter()
        .filter(|path| snapshot.is_live(path))
        .cloned()
        .collect();
    let to_unstage: Vec<String> = reconciliation
        .partition
        .lists
        .iter()
        .filter(|other| other.id != target.id)
        .flat_map(|other| other.staged_files(snapshot).cloned())
        .collect();

    if to_stage.is_empty() && to_unstage.is_empty() {
        print_info(&format!("Nothing to stage in '{}'", target.name));
        return Ok(());
    }

    context.git_repo.reset_files(&to_unstage)?;
    context.git_repo.add_files(&to_stage)?;

    print_success(&format!(
        "Staged {} file(s) from '{}', unstaged {} from other changelists",
        to_stage.len(),
        target.name,
        to_unstage.len()
    ));
    show_changelists(&context)
}
