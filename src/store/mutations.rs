use log::{debug, warn};

use crate::error::{Result, TickError};
use crate::model::{Task, normalize_tags, parse_due, validate_priority};
use crate::store::files::TaskStore;
use crate::view::{ViewFilter, resolve_display_index};

/// Fields to change on `edit`. `None` keeps the current value; `Some(vec![])`
/// for tags clears them.
#[derive(Debug, Default, Clone)]
pub struct TaskEdit {
    pub description: Option<String>,
    pub priority: Option<String>,
    pub tags: Option<Vec<String>>,
    /// An empty string removes the due date.
    pub due: Option<String>,
}

/// What `complete` does to the addressed task.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CompletionMode {
    /// Set `completed = true`; repeating it changes nothing.
    #[default]
    Complete,
    /// Flip `completed`.
    Toggle,
}

fn checked_description(description: &str) -> Result<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(TickError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}

fn checked_due(due: String) -> Option<String> {
    let trimmed = due.trim();
    if trimmed.is_empty() {
        return None;
    }
    if parse_due(trimmed).is_none() {
        warn!("due date '{trimmed}' is not a recognized date; it will be left out of calendar exports");
    }
    Some(trimmed.to_string())
}

/// Every mutation validates first and touches the collection only once all
/// checks pass. A failed save still leaves the in-memory change applied.
impl TaskStore {
    /// Append a new pending task to the end of storage order.
    pub fn add(
        &mut self,
        description: &str,
        priority: Option<&str>,
        tags: Vec<String>,
    ) -> Result<Task> {
        self.add_with_due(description, priority, tags, None)
    }

    pub fn add_with_due(
        &mut self,
        description: &str,
        priority: Option<&str>,
        tags: Vec<String>,
        due: Option<String>,
    ) -> Result<Task> {
        let priority = validate_priority(priority)?.unwrap_or_default();
        let description = checked_description(description)?;

        let mut task = Task::new(description, priority, tags);
        task.due = due.and_then(checked_due);
        self.tasks.push(task.clone());
        debug!("added task at position {}", self.tasks.len() - 1);
        self.save()?;
        Ok(task)
    }

    pub fn edit(&mut self, filter: &ViewFilter, index: i64, edit: TaskEdit) -> Result<Task> {
        let position = resolve_display_index(&self.tasks, filter, index)?;
        let description = edit
            .description
            .as_deref()
            .map(checked_description)
            .transpose()?;
        let priority = validate_priority(edit.priority.as_deref())?;

        let task = &mut self.tasks[position];
        if let Some(d) = description {
            task.description = d;
        }
        if let Some(p) = priority {
            task.priority = p;
        }
        if let Some(tags) = edit.tags {
            task.tags = normalize_tags(tags);
        }
        if let Some(due) = edit.due {
            task.due = checked_due(due);
        }
        let updated = task.clone();
        debug!("edited task at position {position}");
        self.save()?;
        Ok(updated)
    }

    pub fn remove(&mut self, filter: &ViewFilter, index: i64) -> Result<Task> {
        let position = resolve_display_index(&self.tasks, filter, index)?;
        let removed = self.tasks.remove(position);
        debug!("removed task at position {position}");
        self.save()?;
        Ok(removed)
    }

    pub fn complete(
        &mut self,
        filter: &ViewFilter,
        index: i64,
        mode: CompletionMode,
    ) -> Result<Task> {
        let position = resolve_display_index(&self.tasks, filter, index)?;
        let task = &mut self.tasks[position];
        task.completed = match mode {
            CompletionMode::Complete => true,
            CompletionMode::Toggle => !task.completed,
        };
        let updated = task.clone();
        self.save()?;
        Ok(updated)
    }

    /// Drop every task. Returns how many were removed.
    pub fn clear(&mut self) -> Result<usize> {
        let removed = self.tasks.len();
        self.tasks.clear();
        self.save()?;
        Ok(removed)
    }

    /// Append already-normalized tasks (import is additive). Nothing is
    /// written when `tasks` is empty.
    pub fn append(&mut self, tasks: Vec<Task>) -> Result<usize> {
        let count = tasks.len();
        if count == 0 {
            return Ok(0);
        }
        self.tasks.extend(tasks);
        self.save()?;
        Ok(count)
    }
}
