// ── Pure reducer ──
//
// (snapshot, action) -> new snapshot. No I/O, no logging; the store
// owns side effects.

use super::action::Action;
use super::state::InventoryState;
use crate::consolidate::{Classifier, consolidate};
use crate::error::CoreError;

/// Apply `action` to `state`, returning the next snapshot.
///
/// `state` is never modified; on error no new snapshot exists.
pub fn reduce(
    state: &InventoryState,
    action: Action,
    classifier: &Classifier,
) -> Result<InventoryState, CoreError> {
    let mut next = state.clone();

    match action {
        Action::SetSelectedType(selected) => {
            next.selected_type = selected;
            next.selected_model = None;
        }
        Action::SetSelectedModel(selected) => next.selected_model = selected,
        Action::ResetSelection => {
            next.selected_type = None;
            next.selected_model = None;
        }

        Action::SetEquipmentTypes(types) => next.equipment_types = types,
        Action::SetEquipmentModels(models) => next.equipment_models = models,
        Action::SetEquipments(equipments) => next.equipments = equipments,

        Action::SetCurrentPage(page) => next.current_page = page,
        Action::SetTotalPages(pages) => next.total_pages = pages,
        Action::SetItemsPerPage(items) => next.items_per_page = items,

        Action::SetLoading(loading) => next.is_loading = loading,
        Action::SetError(error) => next.error = error,

        Action::SetConsolidatedEquipments(rows) => {
            next.consolidated_equipments = rows;
            next.is_consolidation_modified = false;
        }
        Action::UpdateConsolidatedEquipment { index, record } => {
            let len = next.consolidated_equipments.len();
            let slot = next
                .consolidated_equipments
                .get_mut(index)
                .ok_or(CoreError::IndexOutOfRange { index, len })?;
            *slot = record;
            next.is_consolidation_modified = true;
        }
        Action::ConsolidateEquipments => {
            next.consolidated_equipments = consolidate(&next.equipments, classifier);
            next.is_consolidation_modified = false;
        }
        Action::SetIsConsolidationModified(modified) => {
            next.is_consolidation_modified = modified;
        }
    }

    Ok(next)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::model::{ConsolidatedEquipment, Equipment, EquipmentModel, EquipmentType};

    fn apply(state: &InventoryState, action: Action) -> InventoryState {
        reduce(state, action, &Classifier::default()).unwrap()
    }

    fn laptop_type() -> EquipmentType {
        EquipmentType {
            id: 1,
            name: "Ordinateur Portable".into(),
        }
    }

    fn macbook_model() -> EquipmentModel {
        EquipmentModel {
            id: 10,
            name: "MacBook Pro".into(),
            type_name: "Ordinateur Portable".into(),
        }
    }

    fn equipment(id: i64, model: &str, quantity: u32) -> Equipment {
        Equipment {
            id,
            name: format!("poste-{id}"),
            model: model.into(),
            quantity,
            status: "actif".into(),
        }
    }

    fn with_raw(equipments: Vec<Equipment>) -> InventoryState {
        apply(&InventoryState::default(), Action::SetEquipments(equipments))
    }

    // ── Selection cascade ────────────────────────────────────────────

    #[test]
    fn selecting_type_clears_model() {
        let state = apply(&InventoryState::default(), Action::SetSelectedModel(Some(macbook_model())));
        assert!(state.selected_model.is_some());

        let state = apply(&state, Action::SetSelectedType(Some(laptop_type())));
        assert_eq!(state.selected_type, Some(laptop_type()));
        assert!(state.selected_model.is_none());
    }

    fn arb_type() -> impl Strategy<Value = Option<EquipmentType>> {
        proptest::option::of((any::<i64>(), "[A-Za-zÉé ]{0,16}").prop_map(|(id, name)| {
            EquipmentType { id, name }
        }))
    }

    fn arb_model() -> impl Strategy<Value = Option<EquipmentModel>> {
        proptest::option::of((any::<i64>(), "[A-Za-z0-9 ]{0,16}").prop_map(|(id, name)| {
            EquipmentModel {
                id,
                name,
                type_name: "Serveur".into(),
            }
        }))
    }

    fn arb_raw() -> impl Strategy<Value = Vec<Equipment>> {
        let model = prop_oneof![
            Just("Dell E24".to_owned()),
            Just("MacBook Pro".to_owned()),
            "[A-Z][a-z]{0,6}",
        ];
        prop::collection::vec((model, 0..1_000u32), 0..20).prop_map(|rows| {
            rows.into_iter()
                .zip(1..)
                .map(|((model, quantity), id)| equipment(id, &model, quantity))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn any_type_selection_clears_any_model(model in arb_model(), selected in arb_type()) {
            let state = apply(&InventoryState::default(), Action::SetSelectedModel(model));
            let state = apply(&state, Action::SetSelectedType(selected.clone()));
            prop_assert_eq!(state.selected_type, selected);
            prop_assert!(state.selected_model.is_none());
        }

        #[test]
        fn consolidating_twice_is_idempotent(raw in arb_raw(), dirty in any::<bool>()) {
            let state = apply(&with_raw(raw), Action::SetIsConsolidationModified(dirty));
            let once = apply(&state, Action::ConsolidateEquipments);
            let twice = apply(&once, Action::ConsolidateEquipments);

            prop_assert!(!once.is_consolidation_modified);
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn clearing_type_also_clears_model() {
        let state = apply(&InventoryState::default(), Action::SetSelectedType(Some(laptop_type())));
        let state = apply(&state, Action::SetSelectedModel(Some(macbook_model())));
        let state = apply(&state, Action::SetSelectedType(None));
        assert!(state.selected_type.is_none());
        assert!(state.selected_model.is_none());
    }

    #[test]
    fn selecting_model_keeps_type() {
        let state = apply(&InventoryState::default(), Action::SetSelectedType(Some(laptop_type())));
        let state = apply(&state, Action::SetSelectedModel(Some(macbook_model())));
        assert_eq!(state.selected_type, Some(laptop_type()));
        assert_eq!(state.selected_model, Some(macbook_model()));
    }

    #[test]
    fn reset_selection_clears_both() {
        let state = apply(&InventoryState::default(), Action::SetSelectedType(Some(laptop_type())));
        let state = apply(&state, Action::SetSelectedModel(Some(macbook_model())));
        let state = apply(&state, Action::ResetSelection);
        assert!(state.selected_type.is_none());
        assert!(state.selected_model.is_none());
    }

    // ── Wholesale setters ────────────────────────────────────────────

    #[test]
    fn reference_lists_are_replaced_not_merged() {
        let state = with_raw(vec![equipment(1, "A", 1), equipment(2, "B", 1)]);
        let state = apply(&state, Action::SetEquipments(vec![equipment(3, "C", 1)]));
        assert_eq!(state.equipments, vec![equipment(3, "C", 1)]);
    }

    #[test]
    fn duplicate_ids_are_accepted() {
        let types = vec![laptop_type(), laptop_type()];
        let state = apply(&InventoryState::default(), Action::SetEquipmentTypes(types.clone()));
        assert_eq!(state.equipment_types, types);
    }

    #[test]
    fn pagination_is_not_clamped() {
        let state = apply(&InventoryState::default(), Action::SetCurrentPage(42));
        let state = apply(&state, Action::SetTotalPages(0));
        let state = apply(&state, Action::SetItemsPerPage(0));
        assert_eq!(state.current_page, 42);
        assert_eq!(state.total_pages, 0);
        assert_eq!(state.items_per_page, 0);
    }

    #[test]
    fn loading_and_error_are_independent() {
        let state = apply(&InventoryState::default(), Action::SetLoading(true));
        let state = apply(&state, Action::SetError(Some("timeout".into())));
        assert!(state.is_loading);
        assert_eq!(state.error.as_deref(), Some("timeout"));

        let state = apply(&state, Action::SetLoading(false));
        assert_eq!(state.error.as_deref(), Some("timeout"));
    }

    // ── Consolidation ────────────────────────────────────────────────

    #[test]
    fn consolidate_scenario() {
        let state = with_raw(vec![
            equipment(1, "Dell E24", 3),
            equipment(2, "MacBook Pro", 2),
            equipment(3, "Dell E24", 1),
        ]);
        let state = apply(&state, Action::SetIsConsolidationModified(true));
        let state = apply(&state, Action::ConsolidateEquipments);

        assert_eq!(
            state.consolidated_equipments,
            vec![
                ConsolidatedEquipment::new("Dell E24", "Autre", 4),
                ConsolidatedEquipment::new("MacBook Pro", "Ordinateur Portable", 2),
            ]
        );
        assert!(!state.is_consolidation_modified);
    }

    #[test]
    fn consolidate_empty_list() {
        let state = apply(&InventoryState::default(), Action::ConsolidateEquipments);
        assert!(state.consolidated_equipments.is_empty());
    }

    #[test]
    fn consolidate_is_idempotent() {
        let state = with_raw(vec![equipment(1, "Écran LG", 2), equipment(2, "Écran LG", 5)]);
        let once = apply(&state, Action::ConsolidateEquipments);
        let twice = apply(&once, Action::ConsolidateEquipments);
        assert_eq!(once, twice);
        assert!(!twice.is_consolidation_modified);
    }

    #[test]
    fn consolidate_discards_manual_edits() {
        let state = with_raw(vec![equipment(1, "Dell E24", 3)]);
        let state = apply(&state, Action::ConsolidateEquipments);
        let state = apply(
            &state,
            Action::UpdateConsolidatedEquipment {
                index: 0,
                record: ConsolidatedEquipment::new("Dell E24", "Écran", 99),
            },
        );
        let state = apply(&state, Action::ConsolidateEquipments);
        assert_eq!(
            state.consolidated_equipments,
            vec![ConsolidatedEquipment::new("Dell E24", "Autre", 3)]
        );
    }

    // ── Modified flag ────────────────────────────────────────────────

    #[test]
    fn update_marks_dirty_and_replaces_row() {
        let state = with_raw(vec![equipment(1, "Dell E24", 3), equipment(2, "HP Portable", 1)]);
        let state = apply(&state, Action::ConsolidateEquipments);
        let edited = ConsolidatedEquipment::new("Dell E24", "Écran", 5);

        let state = apply(
            &state,
            Action::UpdateConsolidatedEquipment {
                index: 0,
                record: edited.clone(),
            },
        );
        assert!(state.is_consolidation_modified);
        assert_eq!(state.consolidated_equipments[0], edited);
        assert_eq!(state.consolidated_equipments.len(), 2);
    }

    #[test]
    fn update_with_identical_record_still_marks_dirty() {
        let state = with_raw(vec![equipment(1, "Dell E24", 3)]);
        let state = apply(&state, Action::ConsolidateEquipments);
        let same = state.consolidated_equipments[0].clone();
        let state = apply(&state, Action::UpdateConsolidatedEquipment { index: 0, record: same });
        assert!(state.is_consolidation_modified);
    }

    #[test]
    fn update_out_of_range_is_rejected() {
        let state = with_raw(vec![equipment(1, "Dell E24", 3)]);
        let state = apply(&state, Action::ConsolidateEquipments);

        let err = reduce(
            &state,
            Action::UpdateConsolidatedEquipment {
                index: 1,
                record: ConsolidatedEquipment::new("X", "Autre", 1),
            },
            &Classifier::default(),
        )
        .unwrap_err();

        assert!(matches!(err, CoreError::IndexOutOfRange { index: 1, len: 1 }));
        assert_eq!(state.consolidated_equipments.len(), 1);
        assert!(!state.is_consolidation_modified);
    }

    #[test]
    fn baseline_marks_clean() {
        let state = apply(&InventoryState::default(), Action::SetIsConsolidationModified(true));
        let baseline = vec![ConsolidatedEquipment::new("Serveur X", "Serveur", 2)];
        let state = apply(&state, Action::SetConsolidatedEquipments(baseline.clone()));
        assert_eq!(state.consolidated_equipments, baseline);
        assert!(!state.is_consolidation_modified);
    }

    #[test]
    fn explicit_flag_override() {
        let state = apply(&InventoryState::default(), Action::SetIsConsolidationModified(true));
        assert!(state.is_consolidation_modified);
        let state = apply(&state, Action::SetIsConsolidationModified(true));
        assert!(state.is_consolidation_modified);
        let state = apply(&state, Action::SetIsConsolidationModified(false));
        assert!(!state.is_consolidation_modified);
    }

    #[test]
    fn input_snapshot_is_untouched() {
        let before = with_raw(vec![equipment(1, "Dell E24", 3)]);
        let copy = before.clone();
        let _ = apply(&before, Action::ConsolidateEquipments);
        assert_eq!(before, copy);
    }
}
