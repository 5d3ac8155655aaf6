pub mod files;
pub mod migration;
mod mutations;

pub use files::{LoadStatus, TaskStore};
pub use mutations::{CompletionMode, TaskEdit};
