use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Priority, Task};

const TOP_TAGS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityCounts {
    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }

    fn bump(&mut self, priority: Priority) {
        match priority {
            Priority::High => self.high += 1,
            Priority::Medium => self.medium += 1,
            Priority::Low => self.low += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Completion summary over the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Completed share, 0..=100, rounded to two decimals.
    pub percentage: f64,
    pub pending_by_priority: PriorityCounts,
    /// Most used tags, count descending then name ascending.
    pub top_tags: Vec<TagCount>,
}

impl Stats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let percentage = if total == 0 {
            0.0
        } else {
            (completed as f64 / total as f64 * 10_000.0).round() / 100.0
        };

        let mut pending_by_priority = PriorityCounts::default();
        for task in tasks.iter().filter(|t| !t.completed) {
            pending_by_priority.bump(task.priority);
        }

        let mut tag_counts: HashMap<&str, usize> = HashMap::new();
        for tag in tasks.iter().flat_map(|t| &t.tags) {
            *tag_counts.entry(tag.as_str()).or_default() += 1;
        }
        let mut top_tags: Vec<TagCount> = tag_counts
            .into_iter()
            .map(|(tag, count)| TagCount {
                tag: tag.to_string(),
                count,
            })
            .collect();
        top_tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
        top_tags.truncate(TOP_TAGS);

        Self {
            total,
            completed,
            pending: total - completed,
            percentage,
            pending_by_priority,
            top_tags,
        }
    }
}
