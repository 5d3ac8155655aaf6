pub mod add;
pub mod clear;
pub mod complete;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod remove;
pub mod stats;

use std::path::Path;

use crate::error::Result;
use crate::output::Printer;
use crate::store::{LoadStatus, TaskStore};

/// Load the store and surface anything the user should know about its file.
pub(crate) fn open_store(path: &Path, printer: &Printer) -> Result<TaskStore> {
    let store = TaskStore::open(path)?;
    match store.load_status() {
        LoadStatus::Corrupt { backup } => {
            let kept = backup
                .as_ref()
                .map(|b| format!("; previous contents saved to {}", b.display()))
                .unwrap_or_default();
            printer.warning(&format!(
                "{} could not be read and is treated as empty; the next change will overwrite it{kept}",
                path.display()
            ));
        }
        LoadStatus::Migrated { count } => {
            printer.warning(&format!(
                "upgraded {count} tasks in {} to the current format",
                path.display()
            ));
        }
        LoadStatus::Missing | LoadStatus::Loaded => {}
    }
    Ok(store)
}
