//! Client-side state container for an equipment inventory.
//!
//! - **[`InventoryStore`]**: owns the current [`InventoryState`] snapshot.
//!   Every mutation is an [`Action`] routed through
//!   [`dispatch()`](InventoryStore::dispatch), reduced by the pure
//!   [`reduce`] function, published to [`StateStream`] subscribers, and then
//!   written through the injected [`StateStorage`] adapter.
//!
//! - **Consolidation** ([`consolidate()`]): groups raw [`Equipment`] records by
//!   exact model string, sums quantities, and assigns each group a category
//!   from an ordered [`Classifier`] rule table. Usable without a store.
//!
//! - **Persistence** ([`persist`]): [`MemoryStorage`] and [`JsonFileStorage`]
//!   adapters keyed by a namespace. Hydration failures fall back to the
//!   initial state; save failures are logged and swallowed.

pub mod consolidate;
pub mod error;
pub mod model;
pub mod persist;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use consolidate::{ClassificationRule, Classifier, consolidate};
pub use error::CoreError;
pub use model::{ConsolidatedEquipment, Equipment, EquipmentModel, EquipmentType};
pub use persist::{DEFAULT_STORAGE_KEY, JsonFileStorage, MemoryStorage, StateStorage, StorageError};
pub use store::{Action, ConsolidationStatus, InventoryState, InventoryStore, Loaded, reduce};
pub use stream::StateStream;
