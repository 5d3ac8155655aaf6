//! Display ordering: the filtered, priority-sorted projection the user sees
//! and addresses by index. Storage order is never touched here.

use serde::Serialize;

use crate::error::{Result, TickError};
use crate::model::Task;

/// Completion filter. The variants make completed/pending mutually exclusive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn from_flags(completed: bool, pending: bool) -> Self {
        match (completed, pending) {
            (true, _) => Self::Completed,
            (false, true) => Self::Pending,
            (false, false) => Self::All,
        }
    }

    fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Pending => !task.completed,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewFilter {
    pub status: StatusFilter,
    pub tag: Option<String>,
}

impl ViewFilter {
    pub fn new(status: StatusFilter, tag: Option<String>) -> Self {
        let tag = tag
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Self { status, tag }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.status == StatusFilter::All && self.tag.is_none()
    }

    fn matches(&self, task: &Task) -> bool {
        self.status.matches(task)
            && self
                .tag
                .as_ref()
                .is_none_or(|tag| task.tags.iter().any(|t| t == tag))
    }
}

/// One row of the display list, carrying the storage position it came from.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DisplayEntry<'a> {
    pub index: usize,
    pub position: usize,
    #[serde(flatten)]
    pub task: &'a Task,
}

/// Filter then stable-sort by priority rank. Ties keep storage order.
pub fn display_list<'a>(tasks: &'a [Task], filter: &ViewFilter) -> Vec<DisplayEntry<'a>> {
    let mut selected: Vec<(usize, &Task)> = tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| filter.matches(task))
        .collect();
    selected.sort_by_key(|(_, task)| task.priority.rank());

    selected
        .into_iter()
        .enumerate()
        .map(|(index, (position, task))| DisplayEntry {
            index,
            position,
            task,
        })
        .collect()
}

/// Map a display index to the storage position of the task shown there.
pub fn resolve_display_index(tasks: &[Task], filter: &ViewFilter, index: i64) -> Result<usize> {
    let list = display_list(tasks, filter);
    usize::try_from(index)
        .ok()
        .and_then(|i| list.get(i))
        .map(|entry| entry.position)
        .ok_or(TickError::IndexOutOfRange {
            index,
            len: list.len(),
        })
}
