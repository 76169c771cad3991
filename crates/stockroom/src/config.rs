//! CLI-side config resolution.
//!
//! Layers `--storage-dir` and `--key` over the shared config crate's
//! file + environment loading.

use std::path::PathBuf;

use stockroom_config::Config;
use stockroom_core::InventoryStore;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Config file in effect: `--config` if given, else the platform path.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(stockroom_config::config_path)
}

/// Load the config file and apply command-line overrides.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = stockroom_config::load_config_from(&config_file(global))?;

    if let Some(ref dir) = global.storage_dir {
        cfg.storage.dir = Some(dir.clone());
    }
    if let Some(ref key) = global.key {
        cfg.storage.key.clone_from(key);
    }

    cfg.validate()?;
    Ok(cfg)
}

/// Open the persisted store described by the resolved config.
pub fn open_store(global: &GlobalOpts) -> Result<(Config, InventoryStore), CliError> {
    let cfg = resolve(global)?;
    let store = cfg.open_store();
    tracing::debug!(
        dir = %cfg.storage_dir().display(),
        key = %cfg.storage.key,
        "opened inventory store"
    );
    Ok((cfg, store))
}
