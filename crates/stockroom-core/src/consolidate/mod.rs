// ── Consolidation engine ──
//
// Pure transformation from raw equipment records to one row per
// distinct model string. No store dependency.

mod classifier;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::model::{ConsolidatedEquipment, Equipment};

pub use classifier::{ClassificationRule, Classifier, DEFAULT_FALLBACK, default_rules};

/// Group `equipments` by exact `model` string.
///
/// Rows come out in order of each model's first occurrence. A row's
/// category is resolved once, from the first record of its model, and
/// later records only add to its quantity.
pub fn consolidate(equipments: &[Equipment], classifier: &Classifier) -> Vec<ConsolidatedEquipment> {
    let mut groups: IndexMap<&str, ConsolidatedEquipment> = IndexMap::new();

    for equipment in equipments {
        let quantity = u64::from(equipment.quantity);
        match groups.entry(equipment.model.as_str()) {
            Entry::Occupied(mut entry) => {
                let row = entry.get_mut();
                row.quantity = row.quantity.saturating_add(quantity);
            }
            Entry::Vacant(entry) => {
                entry.insert(ConsolidatedEquipment::new(
                    equipment.model.clone(),
                    classifier.classify(&equipment.model),
                    quantity,
                ));
            }
        }
    }

    groups.into_values().collect()
}
