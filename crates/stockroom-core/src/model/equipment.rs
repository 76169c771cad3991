// ── Equipment domain types ──

use serde::{Deserialize, Serialize};

/// A category of equipment (reference list entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentType {
    pub id: i64,
    #[serde(alias = "nom")]
    pub name: String,
}

/// A product model, tagged with the name of the type it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentModel {
    pub id: i64,
    #[serde(alias = "nom")]
    pub name: String,
    /// Name of the owning [`EquipmentType`]. Not validated against the
    /// loaded type list.
    #[serde(rename = "type")]
    pub type_name: String,
}

/// A raw inventory record as supplied by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: i64,
    #[serde(alias = "nom")]
    pub name: String,
    /// Model designator; the consolidation grouping key (exact match).
    #[serde(alias = "modele")]
    pub model: String,
    #[serde(alias = "quantite")]
    pub quantity: u32,
    #[serde(alias = "statut")]
    pub status: String,
}

/// One row of the consolidated view: every raw record sharing `model`,
/// with quantities summed and a single inferred category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedEquipment {
    #[serde(alias = "modele")]
    pub model: String,
    #[serde(rename = "type")]
    pub category: String,
    #[serde(alias = "quantite")]
    pub quantity: u64,
}

impl ConsolidatedEquipment {
    pub fn new(model: impl Into<String>, category: impl Into<String>, quantity: u64) -> Self {
        Self {
            model: model.into(),
            category: category.into(),
            quantity,
        }
    }
}
