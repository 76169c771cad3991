// ── Core error types ──
//
// Dispatch has one failure mode: an edit aimed past the end of the
// consolidated view. Storage errors surface only from an explicit
// `reset`; hydration and save failures are logged instead.

use thiserror::Error;

use crate::persist::StorageError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Consolidated row {index} does not exist (view has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
