//! Consolidated view handlers: recompute, hand edits, baseline, flag.

use stockroom_core::{ConsolidatedEquipment, InventoryStore};

use crate::cli::{BaselineArgs, EditArgs, GlobalOpts, MarkArgs, MarkState};
use crate::error::CliError;
use crate::output;

use super::{show, util};

fn print_view(store: &InventoryStore, global: &GlobalOpts) -> Result<(), CliError> {
    let out = show::render_consolidated(&store.snapshot(), global)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn consolidate(store: &mut InventoryStore, global: &GlobalOpts) -> Result<(), CliError> {
    store.consolidate_equipments();
    print_view(store, global)
}

/// Replace one row. Omitted fields keep the row's current values.
pub fn edit(store: &mut InventoryStore, args: EditArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let snap = store.snapshot();
    let record = match snap.consolidated_equipments.get(args.index) {
        Some(current) => ConsolidatedEquipment {
            model: args.model.unwrap_or_else(|| current.model.clone()),
            category: args.category.unwrap_or_else(|| current.category.clone()),
            quantity: args.quantity.unwrap_or(current.quantity),
        },
        // Rejected by the store with the view length attached
        None => ConsolidatedEquipment::new(
            args.model.unwrap_or_default(),
            args.category.unwrap_or_default(),
            args.quantity.unwrap_or_default(),
        ),
    };

    store.update_consolidated_equipment(args.index, record)?;
    print_view(store, global)
}

pub fn baseline(
    store: &mut InventoryStore,
    args: &BaselineArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let rows: Vec<ConsolidatedEquipment> = util::read_json_array(&args.file)?;
    store.set_consolidated_equipments(rows);
    print_view(store, global)
}

pub fn mark(store: &mut InventoryStore, args: &MarkArgs, global: &GlobalOpts) -> Result<(), CliError> {
    store.set_is_consolidation_modified(args.state == MarkState::Dirty);
    let status = store.snapshot().consolidation_status();
    output::print_status(
        &format!(
            "Consolidated view is {}",
            output::status_label(status, output::should_color(&global.color))
        ),
        global.quiet,
    );
    Ok(())
}
