use std::path::Path;

use crate::commands::open_store;
use crate::error::Result;
use crate::output::Printer;
use crate::view::{ViewFilter, display_list};

pub fn run(store_path: &Path, filter: &ViewFilter, printer: &Printer) -> Result<()> {
    let store = open_store(store_path, printer)?;
    let entries = display_list(store.tasks(), filter);
    printer.display_list(&entries)
}
