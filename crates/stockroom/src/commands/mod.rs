//! Command dispatch: bridges CLI args -> store operations -> output formatting.

pub mod config_cmd;
pub mod consolidated;
pub mod error_slot;
pub mod load;
pub mod page;
pub mod select;
pub mod show;
pub mod util;

use stockroom_config::Config;
use stockroom_core::InventoryStore;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Dispatch a store-bound command to the appropriate handler.
pub fn dispatch(
    cmd: Command,
    store: &mut InventoryStore,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Load(args) => load::handle(store, &args, global),
        Command::Consolidate => consolidated::consolidate(store, global),
        Command::Show(args) => show::handle(store, &args, global),
        Command::Edit(args) => consolidated::edit(store, args, global),
        Command::Baseline(args) => consolidated::baseline(store, &args, global),
        Command::Mark(args) => consolidated::mark(store, &args, global),
        Command::Select(args) => select::handle(store, &args, global),
        Command::Page(args) => page::handle(store, &args, global),
        Command::Error(args) => error_slot::handle(store, args, global),
        Command::Reset => {
            store.reset(cfg.initial_state())?;
            output::print_status(
                &format!("Store '{}' reset", store.storage_key()),
                global.quiet,
            );
            Ok(())
        }
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
