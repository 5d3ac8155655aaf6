use std::path::Path;

use crate::commands::open_store;
use crate::error::Result;
use crate::output::Printer;
use crate::store::TaskEdit;
use crate::view::ViewFilter;

pub fn run(
    store_path: &Path,
    filter: &ViewFilter,
    index: i64,
    edit: TaskEdit,
    printer: &Printer,
) -> Result<()> {
    let mut store = open_store(store_path, printer)?;
    let task = store.edit(filter, index, edit)?;
    printer.task_event("Updated", &task)
}
