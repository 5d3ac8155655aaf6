//! iCalendar export. Only tasks with a due date become events.

use chrono::{DateTime, Utc};
use log::warn;
use uuid::Uuid;

use crate::model::Task;

const PRODID: &str = "-//tick//EN";
const MAX_LINE_OCTETS: usize = 75;

/// `YYYYMMDDThhmmssZ`
pub fn format_utc(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escape backslash, semicolon, comma and line breaks for TEXT values.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// Split a content line into 75-octet pieces joined by CRLF + space,
/// never cutting through a UTF-8 sequence.
fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut used = 0;
    for ch in line.chars() {
        let width = ch.len_utf8();
        if used + width > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            // the leading space counts toward the continuation line
            used = 1;
        }
        out.push(ch);
        used += width;
    }
    out
}

/// Render a VCALENDAR with one VEVENT per task that has a parseable due date.
/// Returns the document and the number of events written.
pub fn render(tasks: &[Task], now: DateTime<Utc>) -> (String, usize) {
    let stamp = format_utc(now);
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
    ];
    let mut events = 0;

    for task in tasks {
        let Some(due) = &task.due else { continue };
        let Some(start) = task.due_utc() else {
            warn!(
                "skipping '{}': due date '{due}' is not a recognized date",
                task.description
            );
            continue;
        };

        let text = escape_text(&task.description);
        lines.push("BEGIN:VEVENT".into());
        lines.push(format!("UID:{}@tick", Uuid::new_v4()));
        lines.push(format!("DTSTAMP:{stamp}"));
        lines.push(format!("DTSTART:{}", format_utc(start)));
        lines.push(fold_line(&format!("SUMMARY:{text}")));
        if !text.is_empty() {
            lines.push(fold_line(&format!("DESCRIPTION:{text}")));
        }
        lines.push("END:VEVENT".into());
        events += 1;
    }

    lines.push("END:VCALENDAR".into());
    (lines.join("\r\n"), events)
}
