//! Pagination setters. Values are stored as given.

use stockroom_core::InventoryStore;

use crate::cli::{GlobalOpts, PageArgs, PageCommand};
use crate::error::CliError;
use crate::output;

pub fn handle(store: &mut InventoryStore, args: &PageArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        PageCommand::Current { page } => store.set_current_page(page),
        PageCommand::Total { pages } => store.set_total_pages(pages),
        PageCommand::Size { items } => store.set_items_per_page(items),
    }

    let state = store.snapshot();
    output::print_status(
        &format!(
            "Page {}/{} ({} per page)",
            state.current_page, state.total_pages, state.items_per_page
        ),
        global.quiet,
    );
    Ok(())
}
