//! Error slot handlers.

use stockroom_core::InventoryStore;

use crate::cli::{ErrorArgs, ErrorCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(store: &mut InventoryStore, args: ErrorArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ErrorCommand::Set { message } => {
            store.set_error(Some(message));
            output::print_status("Error recorded", global.quiet);
        }
        ErrorCommand::Clear => {
            store.set_error(None);
            output::print_status("Error cleared", global.quiet);
        }
    }
    Ok(())
}
