//! Selection handlers.
//!
//! Ids are resolved against the loaded reference lists; the stored
//! selection is a copy of the matching record.

use stockroom_core::InventoryStore;

use crate::cli::{GlobalOpts, SelectArgs, SelectCommand};
use crate::error::CliError;
use crate::output;

fn not_found(resource_type: &str, id: i64, list_target: &str) -> CliError {
    CliError::NotFound {
        resource_type: resource_type.into(),
        identifier: id.to_string(),
        list_target: list_target.into(),
    }
}

pub fn handle(
    store: &mut InventoryStore,
    args: &SelectArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let snap = store.snapshot();

    match args.command {
        SelectCommand::Type { id } => {
            let selected = snap
                .equipment_types
                .iter()
                .find(|t| t.id == id)
                .cloned()
                .ok_or_else(|| not_found("Equipment type", id, "types"))?;
            let name = selected.name.clone();
            store.set_selected_type(Some(selected));
            output::print_status(&format!("Selected type '{name}'"), global.quiet);
        }

        SelectCommand::Model { id } => {
            let selected = snap
                .equipment_models
                .iter()
                .find(|m| m.id == id)
                .cloned()
                .ok_or_else(|| not_found("Equipment model", id, "models"))?;
            let name = selected.name.clone();
            store.set_selected_model(Some(selected));
            output::print_status(&format!("Selected model '{name}'"), global.quiet);
        }

        SelectCommand::Reset => {
            store.reset_selection();
            output::print_status("Selection cleared", global.quiet);
        }
    }
    Ok(())
}
