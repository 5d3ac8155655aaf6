//! Markdown checklists: `- [x] text  _(priority: High)_` with an optional
//! indented `- Due:` line.

use std::sync::LazyLock;

use log::warn;
use regex::Regex;
use serde_json::{Map, Value};

use crate::model::{Priority, Task, normalize};

static TASK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s*\[(x|X| )\]\s*(.+)$").expect("valid task regex"));
static PRIORITY_NOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*_\(priority:\s*([A-Za-z]+)\)_\s*$").expect("valid priority regex")
});
static DUE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+-\s*Due:\s*(.+?)\s*$").expect("valid due regex"));

const EMPTY_TEXT: &str = "(no text)";

pub fn render(tasks: &[Task]) -> String {
    let mut out = vec!["# Tasks".to_string(), String::new()];
    for task in tasks {
        let check = if task.completed { "x" } else { " " };
        let text = if task.description.is_empty() {
            EMPTY_TEXT.to_string()
        } else {
            escape_text(&task.description)
        };
        out.push(format!("- [{check}] {text}  _(priority: {})_", task.priority));
        if let Some(due) = &task.due {
            out.push(format!("  - Due: {due}"));
        }
        out.push(String::new());
    }
    out.join("\n")
}

/// Collect every checklist line as a task. Lines that are not checklist
/// items are ignored, except that a `- Due:` line directly under an item
/// sets that item's due date.
pub fn parse(text: &str) -> Vec<Task> {
    let mut tasks: Vec<Task> = Vec::new();
    let mut last_was_task = false;

    for line in text.lines() {
        if let Some(caps) = TASK_LINE.captures(line) {
            let completed = caps[1].eq_ignore_ascii_case("x");
            let (description, priority) = split_priority_note(caps[2].trim());
            if description.trim().is_empty() {
                warn!("skipping checklist item with no text");
                last_was_task = false;
                continue;
            }

            let mut fields = Map::new();
            fields.insert("text".into(), Value::String(unescape_text(&description)));
            fields.insert("completed".into(), Value::Bool(completed));
            if let Some(p) = priority {
                fields.insert("priority".into(), Value::String(p.to_string()));
            }
            tasks.push(normalize(Value::Object(fields)));
            last_was_task = true;
            continue;
        }

        if last_was_task
            && let Some(caps) = DUE_LINE.captures(line)
            && let Some(task) = tasks.last_mut()
        {
            task.due = Some(caps[1].to_string());
        }
        last_was_task = false;
    }
    tasks
}

/// Keep a description on one line: backslashes double and line breaks
/// become a literal `\n`.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\r' | '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// Inverse of [`escape_text`]. Other backslash sequences are left as written.
fn unescape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.peek() {
                Some('\\') => {
                    out.push('\\');
                    chars.next();
                    continue;
                }
                Some('n') => {
                    out.push('\n');
                    chars.next();
                    continue;
                }
                _ => {}
            }
        }
        out.push(ch);
    }
    out
}

fn split_priority_note(text: &str) -> (String, Option<Priority>) {
    if let Some(caps) = PRIORITY_NOTE.captures(text)
        && let Ok(priority) = caps[1].parse::<Priority>()
        && let Some(whole) = caps.get(0)
    {
        let rest = text[..whole.start()].trim_end();
        if !rest.is_empty() {
            return (rest.to_string(), Some(priority));
        }
    }
    (text.to_string(), None)
}
