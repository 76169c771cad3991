// ── Inventory domain model ──
//
// Reference data (types, models), raw equipment records, and the
// consolidated per-model view derived from them. Field names serialize
// in English; the legacy French keys are accepted on input so snapshots
// written by the earlier front end still hydrate.

pub mod equipment;

pub use equipment::{ConsolidatedEquipment, Equipment, EquipmentModel, EquipmentType};
