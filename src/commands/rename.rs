use crate::commands::status::show_changelists;
use crate::core::{command_init::CommandContext, error::Result, print_success};

pub fn execute_rename(list: &str, new_name: &str) -> Result<()> {
    let context = CommandContext::initialize()?;
    let target = context.resolve(list)?;

    context.engine.rename(&context.root, &target.id, new_name)?;

    print_success(&format!(
        "Renamed changelist '{}' to '{}'",
        target.name,
        new_name.trim()
    ));
    show_changelists(&context)
}
