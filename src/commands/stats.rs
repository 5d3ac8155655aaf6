use std::path::Path;

use crate::commands::open_store;
use crate::error::Result;
use crate::output::Printer;
use crate::stats::Stats;

pub fn run(store_path: &Path, printer: &Printer) -> Result<()> {
    let store = open_store(store_path, printer)?;
    printer.stats(&Stats::from_tasks(store.tasks()))
}
