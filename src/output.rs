use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use serde_json::Value;

use crate::config::Theme;
use crate::error::Result;
use crate::model::{Priority, Task};
use crate::stats::Stats;
use crate::view::DisplayEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Pretty,
    Minimal,
}

const BAR_WIDTH: usize = 30;

/// Renders command results in the selected format.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    pub format: Format,
    pub theme: Theme,
}

fn palette(theme: Theme) -> ((u8, u8, u8), (u8, u8, u8)) {
    match theme {
        Theme::Dark => ((0xFF, 0xFF, 0xFF), (0x00, 0xFF, 0x88)),
        Theme::Neon => ((0x39, 0xFF, 0x14), (0xFF, 0x10, 0xF0)),
        Theme::Pastel => ((0xFF, 0xD1, 0xDC), (0xC1, 0xE1, 0xC1)),
        Theme::Matrix => ((0x00, 0xFF, 0x00), (0x00, 0xCC, 0x00)),
    }
}

pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

fn colored_priority(priority: Priority) -> ColoredString {
    let label = priority.to_string();
    match priority {
        Priority::High => label.red().bold(),
        Priority::Medium => label.yellow(),
        Priority::Low => label.dimmed(),
    }
}

fn progress_bar(percentage: f64) -> String {
    let filled = ((BAR_WIDTH as f64 * percentage) / 100.0).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "{}{}",
        "█".repeat(filled).green(),
        "░".repeat(BAR_WIDTH - filled).dimmed()
    )
}

impl Printer {
    pub fn new(format: Format, theme: Theme) -> Self {
        Self { format, theme }
    }

    fn primary(&self, text: &str) -> ColoredString {
        let ((r, g, b), _) = palette(self.theme);
        text.truecolor(r, g, b)
    }

    fn accent(&self, text: &str) -> ColoredString {
        let (_, (r, g, b)) = palette(self.theme);
        text.truecolor(r, g, b)
    }

    fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string(value)?);
        Ok(())
    }

    fn task_line(&self, label: &str, task: &Task) -> String {
        let tags = if task.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", task.tags.join(", "))
        };
        let due = task
            .due
            .as_deref()
            .map(|d| format!(" due {d}"))
            .unwrap_or_default();
        let description = if task.completed {
            task.description.dimmed()
        } else {
            self.primary(&task.description)
        };
        format!(
            "{} {}: {} ({}){}{}",
            if task.completed { "✓".green() } else { "○".normal() },
            self.accent(label),
            description,
            colored_priority(task.priority),
            tags,
            due.dimmed()
        )
    }

    /// Confirmation for a single-task mutation, e.g. `Added`, `Removed`.
    pub fn task_event(&self, verb: &str, task: &Task) -> Result<()> {
        match self.format {
            Format::Json => self.json(task)?,
            Format::Pretty => println!("{} {}", "✓".green(), self.task_line(verb, task)),
            Format::Minimal => println!("{}: {}", verb, task.description),
        }
        Ok(())
    }

    pub fn display_list(&self, entries: &[DisplayEntry<'_>]) -> Result<()> {
        match self.format {
            Format::Json => self.json(entries)?,
            Format::Pretty => {
                if entries.is_empty() {
                    println!("No tasks yet!");
                }
                for entry in entries {
                    println!("{}", self.task_line(&entry.index.to_string(), entry.task));
                }
            }
            Format::Minimal => {
                println!("{:>4} {:4} {:6} {:30} TAGS", "IDX", "DONE", "PRIO", "TEXT");
                println!("{}", "-".repeat(56));
                for entry in entries {
                    let task = entry.task;
                    println!(
                        "{:>4} {:4} {:6} {:30} {}",
                        entry.index,
                        if task.completed { "x" } else { "-" },
                        task.priority,
                        truncate_text(&task.description, 30),
                        task.tags.join(",")
                    );
                }
            }
        }
        Ok(())
    }

    pub fn stats(&self, stats: &Stats) -> Result<()> {
        match self.format {
            Format::Json => self.json(stats)?,
            Format::Pretty => {
                if stats.total == 0 {
                    println!("No tasks found. Add some tasks to see statistics!");
                    return Ok(());
                }
                println!(
                    "{} {} {}% ({}/{} completed)",
                    self.accent("Progress:"),
                    progress_bar(stats.percentage),
                    stats.percentage,
                    stats.completed,
                    stats.total
                );
                println!("Pending: {}", stats.pending);
                println!("Pending by priority:");
                for priority in Priority::ALL {
                    println!(
                        "  {:<8} {}",
                        colored_priority(priority),
                        stats.pending_by_priority.get(priority)
                    );
                }
                if !stats.top_tags.is_empty() {
                    println!("Tags:");
                    for tag in &stats.top_tags {
                        println!("  {}: {}", self.accent(&tag.tag), tag.count);
                    }
                }
            }
            Format::Minimal => println!(
                "{} {} {} {}",
                stats.total, stats.completed, stats.pending, stats.percentage
            ),
        }
        Ok(())
    }

    /// Outcome of a collection-wide command: `value` for JSON, `line` otherwise.
    pub fn summary(&self, value: &Value, line: &str) -> Result<()> {
        match self.format {
            Format::Json => self.json(value)?,
            Format::Pretty | Format::Minimal => println!("{line}"),
        }
        Ok(())
    }

    /// Diagnostics go to stderr so JSON stdout stays parseable.
    pub fn warning(&self, message: &str) {
        eprintln!("{} {}", "warning:".yellow().bold(), message);
    }
}
