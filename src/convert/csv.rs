//! CSV with a fixed header and always-quoted cells.

use chrono::SecondsFormat;
use log::warn;
use serde_json::{Map, Value};

use crate::error::{Result, TickError};
use crate::model::{Task, normalize};

pub const HEADER: [&str; 5] = ["text", "priority", "completed", "created_at", "due"];

const DESCRIPTION_COLUMNS: &[&str] = &["text", "task", "title", "description", "name"];

/// Quote a cell, doubling embedded quotes. Absent values stay empty and unquoted.
fn escape_cell(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("\"{}\"", v.replace('"', "\"\"")),
        None => String::new(),
    }
}

/// One row per task, in the order given (storage order), `\n`-separated.
pub fn render(tasks: &[Task]) -> String {
    let mut lines = Vec::with_capacity(tasks.len() + 1);
    lines.push(HEADER.join(","));
    for task in tasks {
        let priority = task.priority.to_string();
        let completed = task.completed.to_string();
        let created = task
            .created_at
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        let cells = [
            Some(task.description.as_str()),
            Some(priority.as_str()),
            Some(completed.as_str()),
            Some(created.as_str()),
            task.due.as_deref(),
        ];
        let row: Vec<String> = cells.into_iter().map(escape_cell).collect();
        lines.push(row.join(","));
    }
    lines.join("\n")
}

/// Split text into records of cells. Quoted cells may hold commas, doubled
/// quotes and line breaks.
fn parse_records(text: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    cell.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => cell.push(ch),
            }
            continue;
        }
        match ch {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut cell)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                record.push(std::mem::take(&mut cell));
                records.push(std::mem::take(&mut record));
            }
            _ => cell.push(ch),
        }
    }

    if in_quotes {
        return Err(TickError::MalformedImportSource(
            "unterminated quoted cell".into(),
        ));
    }
    if !cell.is_empty() || !record.is_empty() {
        record.push(cell);
        records.push(record);
    }

    records.retain(|r| !(r.len() == 1 && r[0].trim().is_empty()));
    Ok(records)
}

/// Parse CSV text into normalized tasks, mapping columns by header name.
pub fn parse(text: &str) -> Result<Vec<Task>> {
    let text = text.trim_start_matches('\u{feff}');
    if text.trim().is_empty() {
        return Err(TickError::MalformedImportSource("file is empty".into()));
    }

    let mut records = parse_records(text)?.into_iter();
    let Some(header) = records.next() else {
        return Err(TickError::MalformedImportSource("file is empty".into()));
    };
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let name = name.trim();
            if name.is_empty() {
                format!("col{idx}")
            } else {
                name.to_string()
            }
        })
        .collect();

    if !columns
        .iter()
        .any(|c| DESCRIPTION_COLUMNS.contains(&c.as_str()))
    {
        return Err(TickError::MalformedImportSource(format!(
            "header has no text column (expected one of: {})",
            DESCRIPTION_COLUMNS.join(", ")
        )));
    }

    let mut tasks = Vec::new();
    for (row_number, row) in records.enumerate() {
        let mut fields = Map::new();
        for (column, cell) in columns.iter().zip(row) {
            if !cell.is_empty() {
                fields.insert(column.clone(), Value::String(cell));
            }
        }
        let task = normalize(Value::Object(fields));
        if task.description.trim().is_empty() {
            warn!("skipping CSV row {} with no text", row_number + 2);
            continue;
        }
        tasks.push(task);
    }
    Ok(tasks)
}
