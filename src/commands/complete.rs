use std::path::Path;

use crate::commands::open_store;
use crate::error::Result;
use crate::output::Printer;
use crate::store::CompletionMode;
use crate::view::ViewFilter;

pub fn run(
    store_path: &Path,
    filter: &ViewFilter,
    index: i64,
    mode: CompletionMode,
    printer: &Printer,
) -> Result<()> {
    let mut store = open_store(store_path, printer)?;
    let task = store.complete(filter, index, mode)?;
    let verb = if task.completed { "Completed" } else { "Reopened" };
    printer.task_event(verb, &task)
}
