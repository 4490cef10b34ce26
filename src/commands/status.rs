use crate::core::{command_init::CommandContext, error::Result, output::print_changelists};

pub fn execute_status() -> Result<()> {
    let context = CommandContext::initialize()?;
    show_changelists(&context)
}

/// Reconcile against live status and print the result
pub fn show_changelists(context: &CommandContext) -> Result<()> {
    let reconciliation = context.engine.reconcile(&context.root)?;
    log::debug!(
        "{} changelist(s), {} file(s) tracked",
        reconciliation.partition.lists.len(),
        reconciliation.partition.total_files()
    );
    print_changelists(&reconciliation.partition, &reconciliation.snapshot);
    Ok(())
}
