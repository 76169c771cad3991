// ── Inventory store ──
//
// Immutable snapshots, a pure reducer, and a single dispatch point that
// publishes and persists each committed change.

mod action;
mod inventory_store;
mod reducer;
mod state;

pub use action::{Action, Loaded};
pub use inventory_store::InventoryStore;
pub use reducer::reduce;
pub use state::{ConsolidationStatus, DEFAULT_ITEMS_PER_PAGE, InventoryState};
