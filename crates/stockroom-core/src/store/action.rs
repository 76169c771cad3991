// ── Store actions ──
//
// Every state mutation is one of these variants. The reducer is the only
// code that interprets them.

use strum::IntoStaticStr;

use crate::model::{ConsolidatedEquipment, Equipment, EquipmentModel, EquipmentType};

/// All possible mutations of an [`InventoryState`](super::InventoryState).
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    // ── Selection ────────────────────────────────────────────────────
    /// Also clears the selected model.
    SetSelectedType(Option<EquipmentType>),
    SetSelectedModel(Option<EquipmentModel>),
    ResetSelection,

    // ── Reference data (wholesale replace) ───────────────────────────
    SetEquipmentTypes(Vec<EquipmentType>),
    SetEquipmentModels(Vec<EquipmentModel>),
    SetEquipments(Vec<Equipment>),

    // ── Pagination ───────────────────────────────────────────────────
    SetCurrentPage(u32),
    SetTotalPages(u32),
    SetItemsPerPage(u32),

    // ── Load status ──────────────────────────────────────────────────
    SetLoading(bool),
    SetError(Option<String>),

    // ── Consolidated view ────────────────────────────────────────────
    /// Replace the view with an externally supplied baseline (clean).
    SetConsolidatedEquipments(Vec<ConsolidatedEquipment>),
    /// Replace one row (dirty). Fails when `index` is out of range.
    UpdateConsolidatedEquipment {
        index: usize,
        record: ConsolidatedEquipment,
    },
    /// Recompute the view from the raw equipment list (clean).
    ConsolidateEquipments,
    SetIsConsolidationModified(bool),
}

impl Action {
    /// Stable snake_case name, used as a tracing field.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// A completed reference-data load, as delivered by a data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded {
    Types(Vec<EquipmentType>),
    Models(Vec<EquipmentModel>),
    Equipments(Vec<Equipment>),
}

impl Loaded {
    /// Number of records delivered.
    pub fn len(&self) -> usize {
        match self {
            Self::Types(types) => types.len(),
            Self::Models(models) => models.len(),
            Self::Equipments(equipments) => equipments.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Loaded> for Action {
    fn from(loaded: Loaded) -> Self {
        match loaded {
            Loaded::Types(types) => Self::SetEquipmentTypes(types),
            Loaded::Models(models) => Self::SetEquipmentModels(models),
            Loaded::Equipments(equipments) => Self::SetEquipments(equipments),
        }
    }
}
