//! Snapshot views.

use std::fmt::Write as _;

use serde::Serialize;
use stockroom_core::{
    ConsolidatedEquipment, Equipment, EquipmentModel, EquipmentType, InventoryState,
    InventoryStore,
};
use tabled::Tabled;

use crate::cli::{GlobalOpts, ShowArgs, ShowTarget};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
pub(super) struct ConsolidatedRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Type")]
    category: String,
    #[tabled(rename = "Quantity")]
    quantity: u64,
}

impl ConsolidatedRow {
    pub(super) fn new(index: usize, row: &ConsolidatedEquipment) -> Self {
        Self {
            index,
            model: row.model.clone(),
            category: row.category.clone(),
            quantity: row.quantity,
        }
    }
}

#[derive(Tabled)]
struct EquipmentRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Equipment> for EquipmentRow {
    fn from(e: &Equipment) -> Self {
        Self {
            id: e.id,
            name: e.name.clone(),
            model: e.model.clone(),
            quantity: e.quantity,
            status: e.status.clone(),
        }
    }
}

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&EquipmentType> for TypeRow {
    fn from(t: &EquipmentType) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
        }
    }
}

#[derive(Tabled)]
struct ModelRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    type_name: String,
}

impl From<&EquipmentModel> for ModelRow {
    fn from(m: &EquipmentModel) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            type_name: m.type_name.clone(),
        }
    }
}

// ── Single-item views ───────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Selection<'a> {
    selected_type: Option<&'a EquipmentType>,
    selected_model: Option<&'a EquipmentModel>,
}

fn selection_detail(sel: &Selection<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Type:   {}",
        sel.selected_type
            .map_or_else(|| "-".to_owned(), |t| format!("{} (#{})", t.name, t.id))
    );
    let _ = write!(
        out,
        "Model:  {}",
        sel.selected_model
            .map_or_else(|| "-".to_owned(), |m| format!("{} (#{})", m.name, m.id))
    );
    out
}

fn state_detail(state: &InventoryState, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Types:         {}", state.equipment_types.len());
    let _ = writeln!(out, "Models:        {}", state.equipment_models.len());
    let _ = writeln!(out, "Equipments:    {}", state.equipments.len());
    let _ = writeln!(
        out,
        "Consolidated:  {} rows, {} units ({})",
        state.consolidated_equipments.len(),
        state.consolidated_total(),
        output::status_label(state.consolidation_status(), color)
    );
    let _ = writeln!(
        out,
        "Page:          {}/{} ({} per page)",
        state.current_page, state.total_pages, state.items_per_page
    );
    let _ = writeln!(out, "Loading:       {}", state.is_loading);
    let _ = write!(
        out,
        "Error:         {}",
        state.error.as_deref().unwrap_or("-")
    );
    out
}

/// Render the consolidated view in the selected format.
pub(super) fn render_consolidated(
    state: &InventoryState,
    global: &GlobalOpts,
) -> Result<String, CliError> {
    output::render_list(
        &global.output,
        &state.consolidated_equipments,
        ConsolidatedRow::new,
        |row| row.model.clone(),
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(store: &InventoryStore, args: &ShowArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let state = store.snapshot();

    let out = match args.target {
        ShowTarget::Consolidated => render_consolidated(&state, global)?,
        ShowTarget::Equipments => output::render_list(
            &global.output,
            &state.equipments,
            |_, e| EquipmentRow::from(e),
            |e| e.id.to_string(),
        )?,
        ShowTarget::Types => output::render_list(
            &global.output,
            &state.equipment_types,
            |_, t| TypeRow::from(t),
            |t| t.id.to_string(),
        )?,
        ShowTarget::Models => output::render_list(
            &global.output,
            &state.equipment_models,
            |_, m| ModelRow::from(m),
            |m| m.id.to_string(),
        )?,
        ShowTarget::Selection => {
            let sel = Selection {
                selected_type: state.selected_type.as_ref(),
                selected_model: state.selected_model.as_ref(),
            };
            output::render_single(&global.output, &sel, selection_detail, |s| {
                [
                    s.selected_type.map(|t| t.id.to_string()),
                    s.selected_model.map(|m| m.id.to_string()),
                ]
                .map(Option::unwrap_or_default)
                .join("\n")
            })?
        }
        ShowTarget::State => {
            let color = output::should_color(&global.color);
            output::render_single(
                &global.output,
                &*state,
                |s| state_detail(s, color),
                |s| s.consolidation_status().to_string(),
            )?
        }
    };

    output::print_output(&out, global.quiet);
    Ok(())
}
