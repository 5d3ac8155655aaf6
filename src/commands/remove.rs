use std::path::Path;

use crate::commands::open_store;
use crate::error::Result;
use crate::output::Printer;
use crate::view::ViewFilter;

pub fn run(store_path: &Path, filter: &ViewFilter, index: i64, printer: &Printer) -> Result<()> {
    let mut store = open_store(store_path, printer)?;
    let task = store.remove(filter, index)?;
    printer.task_event("Removed", &task)
}
