use std::path::Path;

use crate::commands::open_store;
use crate::error::Result;
use crate::output::Printer;

pub fn run(
    store_path: &Path,
    description: &str,
    priority: Option<&str>,
    tags: Vec<String>,
    due: Option<String>,
    printer: &Printer,
) -> Result<()> {
    let mut store = open_store(store_path, printer)?;
    let task = store.add_with_due(description, priority, tags, due)?;
    printer.task_event("Added", &task)
}
