// ── Persistence adapters ──
//
// The store hydrates from a `StateStorage` once at open and writes back
// after every committed change. Snapshots are JSON envelopes
// `{"state": {...}, "version": 0}` stored under a namespace key.

mod file;
mod memory;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::store::InventoryState;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

/// Namespace key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "equipment-storage";

/// Envelope version written by this crate. Other versions are not loaded.
pub const SNAPSHOT_VERSION: u32 = 0;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Key-value storage for a single namespaced inventory snapshot.
///
/// Adapters move raw envelope text; decoding and merging live here.
/// `read` returning `Ok(None)` means nothing has been saved under the key.
pub trait StateStorage: Send + Sync {
    fn key(&self) -> &str;

    fn read(&self) -> Result<Option<String>, StorageError>;

    fn save(&self, state: &InventoryState) -> Result<(), StorageError>;

    /// Forget the stored snapshot. Clearing an empty namespace is not an error.
    fn clear(&self) -> Result<(), StorageError>;

    /// Stored snapshot with missing fields at their defaults.
    fn load(&self) -> Result<Option<InventoryState>, StorageError> {
        self.load_over(&InventoryState::default())
    }

    /// Stored snapshot with missing fields taken from `initial`.
    fn load_over(&self, initial: &InventoryState) -> Result<Option<InventoryState>, StorageError> {
        self.read()?
            .map(|text| decode_over(&text, initial))
            .transpose()
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: &'a InventoryState,
    version: u32,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    state: Map<String, Value>,
    #[serde(default)]
    version: u32,
}

/// Serialize `state` into the persisted envelope format.
pub fn encode(state: &InventoryState) -> Result<String, StorageError> {
    let envelope = EnvelopeRef {
        state,
        version: SNAPSHOT_VERSION,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parse a persisted envelope. All-or-nothing: any malformed field fails
/// the whole snapshot.
pub fn decode(text: &str) -> Result<InventoryState, StorageError> {
    decode_over(text, &InventoryState::default())
}

/// Parse a persisted envelope, shallow-merging its top-level fields over
/// `initial`.
pub fn decode_over(text: &str, initial: &InventoryState) -> Result<InventoryState, StorageError> {
    let envelope: Envelope = serde_json::from_str(text)?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(StorageError::UnsupportedVersion {
            found: envelope.version,
            expected: SNAPSHOT_VERSION,
        });
    }

    let mut merged = match serde_json::to_value(initial)? {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    merged.extend(envelope.state);
    Ok(serde_json::from_value(Value::Object(merged))?)
}
