//! Reference data loading.
//!
//! Drives the store's load contract: loading flag up, read the file,
//! then either replace the matching list or record the error.

use std::path::Path;

use stockroom_core::{InventoryStore, Loaded};

use crate::cli::{GlobalOpts, LoadArgs, ResourceKind};
use crate::error::CliError;
use crate::output;

use super::util;

fn label(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Types => "equipment types",
        ResourceKind::Models => "equipment models",
        ResourceKind::Equipments => "equipment records",
    }
}

fn read(kind: ResourceKind, path: &Path) -> Result<Loaded, CliError> {
    Ok(match kind {
        ResourceKind::Types => Loaded::Types(util::read_json_array(path)?),
        ResourceKind::Models => Loaded::Models(util::read_json_array(path)?),
        ResourceKind::Equipments => Loaded::Equipments(util::read_json_array(path)?),
    })
}

pub fn handle(
    store: &mut InventoryStore,
    args: &LoadArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    store.begin_load();

    match read(args.kind, &args.file) {
        Ok(loaded) => {
            let count = loaded.len();
            store.finish_load(Ok::<_, CliError>(loaded));
            output::print_status(&format!("Loaded {count} {}", label(args.kind)), global.quiet);
            Ok(())
        }
        Err(err) => {
            store.finish_load(Err(&err));
            Err(err)
        }
    }
}
