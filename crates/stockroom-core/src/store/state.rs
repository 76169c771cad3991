// ── Inventory state snapshot ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::{ConsolidatedEquipment, Equipment, EquipmentModel, EquipmentType};

/// Page size used when neither configuration nor a stored snapshot sets one.
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 10;

/// Every field the store holds, as one immutable value.
///
/// Serialized in camelCase so snapshots written by the earlier front end
/// load unchanged. Missing fields take their initial values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InventoryState {
    pub selected_type: Option<EquipmentType>,
    pub selected_model: Option<EquipmentModel>,

    pub equipment_types: Vec<EquipmentType>,
    pub equipment_models: Vec<EquipmentModel>,
    pub equipments: Vec<Equipment>,

    pub consolidated_equipments: Vec<ConsolidatedEquipment>,
    pub is_consolidation_modified: bool,

    pub current_page: u32,
    pub total_pages: u32,
    pub items_per_page: u32,

    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for InventoryState {
    fn default() -> Self {
        Self {
            selected_type: None,
            selected_model: None,
            equipment_types: Vec::new(),
            equipment_models: Vec::new(),
            equipments: Vec::new(),
            consolidated_equipments: Vec::new(),
            is_consolidation_modified: false,
            current_page: 1,
            total_pages: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            is_loading: false,
            error: None,
        }
    }
}

impl InventoryState {
    /// Initial state with a non-default page size.
    pub fn with_items_per_page(items_per_page: u32) -> Self {
        Self {
            items_per_page,
            ..Self::default()
        }
    }

    pub fn consolidation_status(&self) -> ConsolidationStatus {
        if self.is_consolidation_modified {
            ConsolidationStatus::Dirty
        } else {
            ConsolidationStatus::Clean
        }
    }

    pub fn consolidated_total(&self) -> u64 {
        self.consolidated_equipments.iter().map(|row| row.quantity).sum()
    }
}

/// Whether the consolidated view has been hand-edited since it was last
/// computed or loaded as a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ConsolidationStatus {
    Clean,
    Dirty,
}

impl ConsolidationStatus {
    pub fn is_dirty(self) -> bool {
        matches!(self, Self::Dirty)
    }
}
