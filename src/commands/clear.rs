use std::path::Path;

use serde_json::json;

use crate::commands::open_store;
use crate::error::Result;
use crate::output::Printer;

pub fn run(store_path: &Path, printer: &Printer) -> Result<()> {
    let mut store = open_store(store_path, printer)?;
    let removed = store.clear()?;
    printer.summary(
        &json!({ "removed": removed }),
        &format!("All tasks have been cleared ({removed} removed)."),
    )
}
