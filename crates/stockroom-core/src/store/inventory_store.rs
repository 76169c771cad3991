// ── Inventory store ──
//
// Owns the current snapshot, the classifier, and the persistence
// adapter. Mutation requires `&mut self`: one writer at a time.

use std::fmt::Display;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::action::{Action, Loaded};
use super::reducer::reduce;
use super::state::InventoryState;
use crate::consolidate::Classifier;
use crate::error::CoreError;
use crate::model::{ConsolidatedEquipment, Equipment, EquipmentModel, EquipmentType};
use crate::persist::{MemoryStorage, StateStorage};
use crate::stream::StateStream;

/// Single source of truth for the equipment inventory.
///
/// Construct once per session and pass it to consumers by reference.
/// Every committed change is published to subscribers and then written
/// through the storage adapter. Storage failures are logged, never
/// returned.
pub struct InventoryStore {
    state: watch::Sender<Arc<InventoryState>>,
    classifier: Classifier,
    storage: Arc<dyn StateStorage>,
}

impl InventoryStore {
    /// Open a store, hydrating from `storage` when it holds a usable
    /// snapshot and starting from `initial` otherwise.
    pub fn open(
        storage: Arc<dyn StateStorage>,
        classifier: Classifier,
        initial: InventoryState,
    ) -> Self {
        let state = hydrate(storage.as_ref(), initial);
        let (state, _) = watch::channel(Arc::new(state));

        Self {
            state,
            classifier,
            storage,
        }
    }

    /// A store with default rules and initial values, backed by a private
    /// in-memory map.
    pub fn in_memory() -> Self {
        Self::open(
            Arc::new(MemoryStorage::default()),
            Classifier::default(),
            InventoryState::default(),
        )
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<InventoryState> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> StateStream {
        StateStream::new(self.state.subscribe())
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn storage_key(&self) -> &str {
        self.storage.key()
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Reduce `action` against the current snapshot and commit the result.
    ///
    /// A rejected action leaves the snapshot untouched and writes nothing.
    /// An action that produces an identical snapshot is not republished.
    pub fn dispatch(&mut self, action: Action) -> Result<(), CoreError> {
        let name = action.name();
        let current = self.snapshot();
        let next = reduce(&current, action, &self.classifier)?;

        if next == *current {
            debug!(action = name, "action left state unchanged");
            return Ok(());
        }

        let next = Arc::new(next);
        self.state.send_replace(Arc::clone(&next));
        debug!(action = name, "state committed");

        if let Err(err) = self.storage.save(&next) {
            warn!(key = self.storage.key(), error = %err, "failed to persist inventory state");
        }
        Ok(())
    }

    /// Dispatch an action the reducer never rejects.
    fn apply(&mut self, action: Action) {
        if let Err(err) = self.dispatch(action) {
            warn!(error = %err, "unexpected rejection of infallible action");
        }
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Select a type. Always clears the selected model.
    pub fn set_selected_type(&mut self, selected: Option<EquipmentType>) {
        self.apply(Action::SetSelectedType(selected));
    }

    pub fn set_selected_model(&mut self, selected: Option<EquipmentModel>) {
        self.apply(Action::SetSelectedModel(selected));
    }

    pub fn reset_selection(&mut self) {
        self.apply(Action::ResetSelection);
    }

    // ── Reference data ───────────────────────────────────────────────

    pub fn set_equipment_types(&mut self, types: Vec<EquipmentType>) {
        self.apply(Action::SetEquipmentTypes(types));
    }

    pub fn set_equipment_models(&mut self, models: Vec<EquipmentModel>) {
        self.apply(Action::SetEquipmentModels(models));
    }

    pub fn set_equipments(&mut self, equipments: Vec<Equipment>) {
        self.apply(Action::SetEquipments(equipments));
    }

    // ── Pagination ───────────────────────────────────────────────────

    pub fn set_current_page(&mut self, page: u32) {
        self.apply(Action::SetCurrentPage(page));
    }

    pub fn set_total_pages(&mut self, pages: u32) {
        self.apply(Action::SetTotalPages(pages));
    }

    pub fn set_items_per_page(&mut self, items: u32) {
        self.apply(Action::SetItemsPerPage(items));
    }

    // ── Load status ──────────────────────────────────────────────────

    pub fn set_loading(&mut self, loading: bool) {
        self.apply(Action::SetLoading(loading));
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.apply(Action::SetError(error));
    }

    /// Mark an external load as in flight.
    pub fn begin_load(&mut self) {
        self.set_loading(true);
    }

    /// Record the outcome of an external load and clear the loading flag.
    ///
    /// Success replaces the matching reference list; failure stores the
    /// error message. A previous error is left in place on success.
    pub fn finish_load<E: Display>(&mut self, outcome: Result<Loaded, E>) {
        match outcome {
            Ok(loaded) => self.apply(loaded.into()),
            Err(err) => {
                warn!(error = %err, "inventory load failed");
                self.set_error(Some(err.to_string()));
            }
        }
        self.set_loading(false);
    }

    // ── Consolidated view ────────────────────────────────────────────

    /// Recompute the consolidated view from the raw equipment list.
    pub fn consolidate_equipments(&mut self) {
        self.apply(Action::ConsolidateEquipments);
        let state = self.snapshot();
        info!(
            records = state.equipments.len(),
            rows = state.consolidated_equipments.len(),
            "consolidated equipment view"
        );
    }

    /// Replace the consolidated view with a baseline; marks it clean.
    pub fn set_consolidated_equipments(&mut self, rows: Vec<ConsolidatedEquipment>) {
        self.apply(Action::SetConsolidatedEquipments(rows));
    }

    /// Replace row `index`; marks the view dirty.
    pub fn update_consolidated_equipment(
        &mut self,
        index: usize,
        record: ConsolidatedEquipment,
    ) -> Result<(), CoreError> {
        self.dispatch(Action::UpdateConsolidatedEquipment { index, record })
    }

    pub fn set_is_consolidation_modified(&mut self, modified: bool) {
        self.apply(Action::SetIsConsolidationModified(modified));
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Delete the persisted snapshot and return to `initial`.
    ///
    /// Subscribers observe the reset. Nothing is written back until the
    /// next committed change.
    pub fn reset(&mut self, initial: InventoryState) -> Result<(), CoreError> {
        self.storage.clear()?;
        self.state.send_replace(Arc::new(initial));
        info!(key = self.storage.key(), "inventory state reset");
        Ok(())
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn hydrate(storage: &dyn StateStorage, initial: InventoryState) -> InventoryState {
    let key = storage.key();
    match storage.load_over(&initial) {
        Ok(Some(state)) => {
            debug!(key, "hydrated inventory state");
            state
        }
        Ok(None) => {
            debug!(key, "no stored inventory state, using initial values");
            initial
        }
        Err(err) => {
            warn!(key, error = %err, "could not hydrate inventory state, using initial values");
            initial
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures_util::StreamExt;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::persist::StorageError;

    // ── Fixtures ─────────────────────────────────────────────────────

    fn equipment(id: i64, model: &str, quantity: u32) -> Equipment {
        Equipment {
            id,
            name: format!("poste-{id}"),
            model: model.into(),
            quantity,
            status: "actif".into(),
        }
    }

    fn open_on(storage: &MemoryStorage) -> InventoryStore {
        InventoryStore::open(
            Arc::new(storage.clone()),
            Classifier::default(),
            InventoryState::default(),
        )
    }

    fn broken() -> StorageError {
        StorageError::Io {
            path: PathBuf::from("/unavailable"),
            source: std::io::Error::other("disk gone"),
        }
    }

    struct FailingStorage;

    impl StateStorage for FailingStorage {
        fn key(&self) -> &str {
            "failing"
        }
        fn read(&self) -> Result<Option<String>, StorageError> {
            Err(broken())
        }
        fn save(&self, _state: &InventoryState) -> Result<(), StorageError> {
            Err(broken())
        }
        fn clear(&self) -> Result<(), StorageError> {
            Err(broken())
        }
    }

    #[derive(Default)]
    struct CountingStorage {
        inner: MemoryStorage,
        saves: AtomicUsize,
    }

    impl StateStorage for CountingStorage {
        fn key(&self) -> &str {
            self.inner.key()
        }
        fn read(&self) -> Result<Option<String>, StorageError> {
            self.inner.read()
        }
        fn save(&self, state: &InventoryState) -> Result<(), StorageError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.inner.save(state)
        }
        fn clear(&self) -> Result<(), StorageError> {
            self.inner.clear()
        }
    }

    // ── Hydration ────────────────────────────────────────────────────

    #[test]
    fn empty_storage_uses_initial_values() {
        let store = InventoryStore::open(
            Arc::new(MemoryStorage::default()),
            Classifier::default(),
            InventoryState::with_items_per_page(50),
        );
        assert_eq!(*store.snapshot(), InventoryState::with_items_per_page(50));
    }

    #[test]
    fn reopening_restores_saved_state() {
        let storage = MemoryStorage::default();
        {
            let mut store = open_on(&storage);
            store.set_equipments(vec![equipment(1, "Dell E24", 3)]);
            store.consolidate_equipments();
            store.set_current_page(2);
        }

        let store = open_on(&storage);
        let state = store.snapshot();
        assert_eq!(state.equipments.len(), 1);
        assert_eq!(state.consolidated_equipments.len(), 1);
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn stored_snapshot_overrides_initial_values() {
        let storage = MemoryStorage::default();
        storage.save(&InventoryState::with_items_per_page(7)).unwrap();

        let store = InventoryStore::open(
            Arc::new(storage),
            Classifier::default(),
            InventoryState::with_items_per_page(50),
        );
        assert_eq!(store.snapshot().items_per_page, 7);
    }

    #[test]
    fn partial_snapshot_keeps_initial_values_for_missing_fields() {
        let storage = MemoryStorage::default();
        storage.put_raw(r#"{"state": {"currentPage": 3}, "version": 0}"#);

        let store = InventoryStore::open(
            Arc::new(storage),
            Classifier::default(),
            InventoryState::with_items_per_page(50),
        );
        let state = store.snapshot();
        assert_eq!(state.current_page, 3);
        assert_eq!(state.items_per_page, 50);
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_initial_values() {
        let storage = MemoryStorage::default();
        storage.put_raw(r#"{"state": {"equipments": [{"id": "oops"}]}, "version": 0}"#);

        let store = open_on(&storage);
        assert_eq!(*store.snapshot(), InventoryState::default());
    }

    #[test]
    fn unsupported_version_falls_back_to_initial_values() {
        let storage = MemoryStorage::default();
        storage.put_raw(r#"{"state": {"currentPage": 9}, "version": 1}"#);

        let store = open_on(&storage);
        assert_eq!(store.snapshot().current_page, 1);
    }

    #[test]
    fn failing_storage_is_never_surfaced() {
        let mut store = InventoryStore::open(
            Arc::new(FailingStorage),
            Classifier::default(),
            InventoryState::default(),
        );
        store.set_equipments(vec![equipment(1, "MacBook Air", 1)]);
        store.consolidate_equipments();

        let state = store.snapshot();
        assert_eq!(state.consolidated_equipments[0].category, "Ordinateur Portable");
        assert_eq!(store.storage_key(), "failing");
    }

    // ── Persistence after commit ─────────────────────────────────────

    #[test]
    fn each_commit_is_saved() {
        let storage = Arc::new(CountingStorage::default());
        let mut store = InventoryStore::open(
            storage.clone(),
            Classifier::default(),
            InventoryState::default(),
        );

        store.set_loading(true);
        store.set_equipments(vec![equipment(1, "Dell E24", 1)]);
        store.set_loading(false);
        assert_eq!(storage.saves.load(Ordering::SeqCst), 3);

        let saved = storage.load().unwrap().unwrap();
        assert_eq!(saved, *store.snapshot());
    }

    #[test]
    fn unchanged_state_is_not_saved_again() {
        let storage = Arc::new(CountingStorage::default());
        let mut store = InventoryStore::open(
            storage.clone(),
            Classifier::default(),
            InventoryState::default(),
        );

        store.reset_selection();
        store.set_loading(false);
        assert_eq!(storage.saves.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn rejected_update_changes_nothing() {
        let storage = Arc::new(CountingStorage::default());
        let mut store = InventoryStore::open(
            storage.clone(),
            Classifier::default(),
            InventoryState::default(),
        );
        let before = store.snapshot();

        let err = store
            .update_consolidated_equipment(0, ConsolidatedEquipment::new("X", "Autre", 1))
            .unwrap_err();

        assert!(matches!(err, CoreError::IndexOutOfRange { index: 0, len: 0 }));
        assert_eq!(store.snapshot(), before);
        assert_eq!(storage.saves.load(Ordering::SeqCst), 0);
    }

    // ── Operations through the store ─────────────────────────────────

    #[test]
    fn selection_cascade_through_store() {
        let mut store = InventoryStore::in_memory();
        store.set_selected_model(Some(EquipmentModel {
            id: 3,
            name: "PowerEdge R740".into(),
            type_name: "Serveur".into(),
        }));
        store.set_selected_type(Some(EquipmentType {
            id: 2,
            name: "Serveur".into(),
        }));

        let state = store.snapshot();
        assert!(state.selected_model.is_none());
        assert_eq!(state.selected_type.as_ref().map(|t| t.id), Some(2));
    }

    #[test]
    fn edit_then_consolidate_cycles_flag() {
        let mut store = InventoryStore::in_memory();
        store.set_equipments(vec![
            equipment(1, "Dell E24", 3),
            equipment(2, "MacBook Pro", 2),
            equipment(3, "Dell E24", 1),
        ]);
        store.consolidate_equipments();
        assert!(!store.snapshot().is_consolidation_modified);

        store
            .update_consolidated_equipment(1, ConsolidatedEquipment::new("MacBook Pro", "Ordinateur Portable", 5))
            .unwrap();
        assert!(store.snapshot().is_consolidation_modified);
        assert_eq!(store.snapshot().consolidated_total(), 9);

        store.consolidate_equipments();
        let state = store.snapshot();
        assert!(!state.is_consolidation_modified);
        assert_eq!(
            state.consolidated_equipments,
            vec![
                ConsolidatedEquipment::new("Dell E24", "Autre", 4),
                ConsolidatedEquipment::new("MacBook Pro", "Ordinateur Portable", 2),
            ]
        );
    }

    #[test]
    fn custom_classifier_is_used() {
        let classifier = Classifier::new(
            vec![crate::consolidate::ClassificationRule::new("Moniteur", ["E24"])],
            "Divers",
        );
        let mut store = InventoryStore::open(
            Arc::new(MemoryStorage::default()),
            classifier,
            InventoryState::default(),
        );
        store.set_equipments(vec![equipment(1, "Dell E24", 1), equipment(2, "Clavier", 1)]);
        store.consolidate_equipments();

        let categories: Vec<String> = store
            .snapshot()
            .consolidated_equipments
            .iter()
            .map(|r| r.category.clone())
            .collect();
        assert_eq!(categories, vec!["Moniteur", "Divers"]);
    }

    #[test]
    fn successful_load_sequence() {
        let mut store = InventoryStore::in_memory();
        store.begin_load();
        assert!(store.snapshot().is_loading);

        store.finish_load::<String>(Ok(Loaded::Types(vec![EquipmentType {
            id: 1,
            name: "Écran".into(),
        }])));

        let state = store.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.equipment_types.len(), 1);
        assert!(state.error.is_none());
    }

    #[test]
    fn failed_load_sequence() {
        let mut store = InventoryStore::in_memory();
        store.set_equipments(vec![equipment(1, "Dell E24", 1)]);

        store.begin_load();
        store.finish_load(Err("503 Service Unavailable"));

        let state = store.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("503 Service Unavailable"));
        assert_eq!(state.equipments.len(), 1);
    }

    #[test]
    fn reset_forgets_stored_snapshot() {
        let storage = MemoryStorage::default();
        let mut store = open_on(&storage);
        store.set_equipments(vec![equipment(1, "Dell E24", 3)]);
        assert!(storage.raw().is_some());

        store.reset(InventoryState::default()).unwrap();
        assert!(storage.raw().is_none());
        assert!(store.snapshot().equipments.is_empty());
        assert!(open_on(&storage).snapshot().equipments.is_empty());
    }

    #[test]
    fn reset_surfaces_storage_errors() {
        let mut store = InventoryStore::open(
            Arc::new(FailingStorage),
            Classifier::default(),
            InventoryState::default(),
        );
        store.set_current_page(5);

        let err = store.reset(InventoryState::default()).unwrap_err();
        assert!(matches!(err, CoreError::Storage(StorageError::Io { .. })));
        assert_eq!(store.snapshot().current_page, 5);
    }

    // ── Subscriptions ────────────────────────────────────────────────

    #[tokio::test]
    async fn subscribers_observe_commits() {
        let mut store = InventoryStore::in_memory();
        let mut stream = store.subscribe();
        assert_eq!(stream.current().current_page, 1);

        store.set_current_page(3);
        let snap = stream.changed().await.unwrap();
        assert_eq!(snap.current_page, 3);
        assert_eq!(stream.current().current_page, 3);
        assert_eq!(stream.latest().current_page, 3);
    }

    #[tokio::test]
    async fn changed_returns_none_after_store_drop() {
        let store = InventoryStore::in_memory();
        let mut stream = store.subscribe();
        drop(store);
        assert!(stream.changed().await.is_none());
    }

    #[tokio::test]
    async fn stream_yields_current_then_commits() {
        let mut store = InventoryStore::in_memory();
        let mut stream = store.subscribe().into_stream();

        let first = stream.next().await.unwrap();
        assert_eq!(first.total_pages, 1);

        store.set_total_pages(8);
        let second = stream.next().await.unwrap();
        assert_eq!(second.total_pages, 8);
    }
}
