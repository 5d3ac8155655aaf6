use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;

use crate::commands::open_store;
use crate::convert::{self, ExportFormat};
use crate::error::{Result, TickError};
use crate::output::Printer;

/// Write the store in `format` to `output` (default `todos.<ext>`).
pub fn run(
    store_path: &Path,
    format: ExportFormat,
    output: Option<PathBuf>,
    printer: &Printer,
) -> Result<()> {
    let store = open_store(store_path, printer)?;
    let output = output.unwrap_or_else(|| PathBuf::from(format!("todos.{}", format.extension())));

    let exported = convert::export(store.tasks(), format);
    fs::write(&output, &exported.content).map_err(|e| TickError::persistence(&output, e))?;

    let noun = if format == ExportFormat::Ics {
        "events (tasks with due dates only)"
    } else {
        "tasks"
    };
    printer.summary(
        &json!({
            "format": format.extension(),
            "path": output.display().to_string(),
            "exported": exported.count,
        }),
        &format!("Exported {} {noun} → {}", exported.count, output.display()),
    )
}
