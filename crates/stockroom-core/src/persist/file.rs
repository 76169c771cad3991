// ── JSON file storage ──
//
// One file per namespace key: `<dir>/<key>.json`. Saves write a sibling
// temp file and rename it into place.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{StateStorage, StorageError, encode};
use crate::store::InventoryState;

#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
    key: String,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    /// Full path of the snapshot file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    fn temp_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json.tmp", self.key))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl StateStorage for JsonFileStorage {
    fn key(&self) -> &str {
        &self.key
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&path, err)),
        }
    }

    fn save(&self, state: &InventoryState) -> Result<(), StorageError> {
        let text = encode(state)?;
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        let temp = self.temp_path();
        fs::write(&temp, text).map_err(|e| io_error(&temp, e))?;

        let path = self.path();
        fs::rename(&temp, &path).map_err(|e| io_error(&path, e))
    }

    fn clear(&self) -> Result<(), StorageError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(io_error(&path, err)),
            _ => Ok(()),
        }
    }
}
