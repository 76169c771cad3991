//! Shared helpers for command handlers.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::CliError;

/// Read a file holding a JSON array of records.
pub fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CliError> {
    let invalid = |reason: String| CliError::InvalidInput {
        path: path.display().to_string(),
        reason,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| invalid(format!("invalid JSON: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use stockroom_core::EquipmentType;

    use super::*;

    #[test]
    fn reads_legacy_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 1, "nom": "Écran"}}]"#).unwrap();

        let types: Vec<EquipmentType> = read_json_array(file.path()).unwrap();
        assert_eq!(types[0].name, "Écran");
    }

    #[test]
    fn object_instead_of_array_is_invalid_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"id": 1}}"#).unwrap();

        let err = read_json_array::<EquipmentType>(file.path()).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
    }

    #[test]
    fn missing_file_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json_array::<EquipmentType>(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
    }
}
