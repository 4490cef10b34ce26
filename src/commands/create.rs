use crate::commands::status::show_changelists;
use crate::core::{command_init::CommandContext, error::Result, print_success};

pub fn execute_create(name: &str) -> Result<()> {
    let context = CommandContext::initialize()?;
    let list = context.engine.create(&context.root, name)?;

    print_success(&format!("Created changelist '{}' [{}]", list.name, list.id));
    show_changelists(&context)
}
