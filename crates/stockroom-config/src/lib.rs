//! Shared configuration for stockroom.
//!
//! TOML file + `STOCKROOM_*` environment layering via figment, validation,
//! and translation into the core's storage adapter, classifier, and
//! initial state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use stockroom_core::consolidate::{DEFAULT_FALLBACK, default_rules};
use stockroom_core::store::DEFAULT_ITEMS_PER_PAGE;
use stockroom_core::{
    ClassificationRule, Classifier, DEFAULT_STORAGE_KEY, InventoryState, InventoryStore,
    JsonFileStorage,
};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn invalid(field: impl Into<String>, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub pagination: Pagination,

    #[serde(default)]
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Namespace key the snapshot is stored under.
    #[serde(default = "default_key")]
    pub key: String,

    /// Directory holding snapshot files. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            key: default_key(),
            dir: None,
        }
    }
}

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.into()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Pagination {
    /// Initial page size, used when no stored snapshot sets one.
    #[serde(default = "default_items_per_page")]
    pub items_per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
        }
    }
}

fn default_items_per_page() -> u32 {
    DEFAULT_ITEMS_PER_PAGE
}

/// Model classification table. A configured `rules` array replaces the
/// built-in one entirely.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Classification {
    #[serde(default = "default_fallback")]
    pub fallback: String,

    #[serde(default = "default_rules")]
    pub rules: Vec<ClassificationRule>,
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            fallback: default_fallback(),
            rules: default_rules(),
        }
    }
}

fn default_fallback() -> String {
    DEFAULT_FALLBACK.into()
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "stockroom", "stockroom")
}

fn home_fallback(sub: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(sub);
    p.push("stockroom");
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Directory for snapshot files when `storage.dir` is not set.
pub fn default_storage_dir() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(".local/share"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

// ── Loading & saving ────────────────────────────────────────────────

/// Load config from `path` (missing file is fine) layered under
/// `STOCKROOM_*` environment variables, then validate it.
///
/// Nested keys use a double underscore: `STOCKROOM_STORAGE__KEY`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading configuration");

    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("STOCKROOM_").split("__"))
        .extract()?;

    config.validate()?;
    Ok(config)
}

/// Load config from the canonical path.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Serialize config to TOML at `path`, creating parent directories.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation into core types ─────────────────────────────────────

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.key.trim().is_empty() {
            return Err(invalid("storage.key", "must not be empty"));
        }
        if self.storage.key.contains(['/', '\\']) {
            return Err(invalid("storage.key", "must not contain path separators"));
        }
        if self.pagination.items_per_page == 0 {
            return Err(invalid("pagination.items_per_page", "must be at least 1"));
        }
        if self.classification.fallback.is_empty() {
            return Err(invalid("classification.fallback", "must not be empty"));
        }

        for (i, rule) in self.classification.rules.iter().enumerate() {
            if rule.category.is_empty() {
                return Err(invalid(
                    format!("classification.rules[{i}].category"),
                    "must not be empty",
                ));
            }
            if rule.patterns.is_empty() || rule.patterns.iter().any(String::is_empty) {
                return Err(invalid(
                    format!("classification.rules[{i}].patterns"),
                    "needs at least one pattern and no empty patterns",
                ));
            }
        }
        Ok(())
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(
            self.classification.rules.clone(),
            self.classification.fallback.clone(),
        )
    }

    pub fn initial_state(&self) -> InventoryState {
        InventoryState::with_items_per_page(self.pagination.items_per_page)
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.storage.dir.clone().unwrap_or_else(default_storage_dir)
    }

    pub fn storage(&self) -> JsonFileStorage {
        JsonFileStorage::new(self.storage_dir(), self.storage.key.clone())
    }

    /// Open the file-backed store this configuration describes.
    pub fn open_store(&self) -> InventoryStore {
        InventoryStore::open(
            Arc::new(self.storage()),
            self.classifier(),
            self.initial_state(),
        )
    }
}
