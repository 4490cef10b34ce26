use crate::commands::status::show_changelists;
use crate::core::{command_init::CommandContext, error::Result, print_info, print_success};

pub fn execute_delete(list: &str) -> Result<()> {
    let context = CommandContext::initialize()?;

    // Unknown names fall through as ids so the engine's no-op applies
    let (id, name) = match context.engine.partition(&context.root)?.find(list) {
        Some(found) => (found.id.clone(), found.name.clone()),
        None => (list.to_string(), list.to_string()),
    };

    if context.engine.delete(&context.root, &id)? {
        print_success(&format!("Deleted changelist '{name}'"));
        show_changelists(&context)
    } else {
        print_info(&format!("No changelist matches '{list}'"));
        Ok(())
    }
}
