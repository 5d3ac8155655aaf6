use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::json;

use crate::commands::open_store;
use crate::convert::{self, ImportFormat};
use crate::error::{Result, TickError};
use crate::output::Printer;

/// Append the tasks found in `input` to the store. The store is left
/// untouched when the source is unusable or yields no tasks.
pub fn run(
    store_path: &Path,
    format: ImportFormat,
    input: &Path,
    printer: &Printer,
) -> Result<()> {
    let text = fs::read_to_string(input).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            TickError::MalformedImportSource(format!("file not found: {}", input.display()))
        }
        _ => TickError::MalformedImportSource(format!("cannot read {}: {e}", input.display())),
    })?;

    let tasks = convert::parse(format, &text)?;
    if tasks.is_empty() {
        return printer.summary(
            &json!({ "imported": 0, "path": input.display().to_string() }),
            "No tasks imported.",
        );
    }

    let mut store = open_store(store_path, printer)?;
    let imported = store.append(tasks)?;
    printer.summary(
        &json!({ "imported": imported, "path": input.display().to_string() }),
        &format!("Imported {imported} tasks from {}", input.display()),
    )
}
