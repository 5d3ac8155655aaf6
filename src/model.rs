use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, TickError};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Sort key for display ordering: High first.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        f.pad(label)
    }
}

impl FromStr for Priority {
    type Err = TickError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(TickError::InvalidPriority(s.to_string())),
        }
    }
}

/// Check an optional priority supplied at the add/edit boundary.
///
/// `None` passes through; a present value must name one of the three levels.
pub fn validate_priority(value: Option<&str>) -> Result<Option<Priority>> {
    value.map(str::parse::<Priority>).transpose()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    /// Fields carried over from imported or hand-edited records.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn new(description: impl Into<String>, priority: Priority, tags: Vec<String>) -> Self {
        Self {
            description: description.into(),
            completed: false,
            priority,
            tags: normalize_tags(tags),
            created_at: Utc::now(),
            due: None,
            extra: Map::new(),
        }
    }

    /// Due date as a UTC instant, if present and parseable.
    pub fn due_utc(&self) -> Option<DateTime<Utc>> {
        self.due.as_deref().and_then(parse_due)
    }
}

/// Trim every tag and drop the empty ones. Order and duplicates are kept.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| {
            let trimmed = t.trim();
            if trimmed.len() == t.len() {
                t
            } else {
                trimmed.to_string()
            }
        })
        .filter(|t| !t.is_empty())
        .collect()
}

const DESCRIPTION_KEYS: &[&str] = &["description", "text", "task", "title", "name"];
const PRIORITY_KEYS: &[&str] = &["priority", "prio"];
const DUE_KEYS: &[&str] = &["due", "due_date", "dueDate"];
const CREATED_KEYS: &[&str] = &["created_at", "created"];
const COMPLETED_KEYS: &[&str] = &["completed"];
const TAG_KEYS: &[&str] = &["tags"];

/// Decode a loosely shaped record into a canonical [`Task`].
///
/// Accepts a bare string (the description) or an object using any of the
/// recognised alias field names. Never fails: missing fields take their
/// defaults, an unrecognised priority falls back to `Medium`, and keys that
/// map to no canonical field are preserved in [`Task::extra`].
pub fn normalize(raw: Value) -> Task {
    let mut fields = match raw {
        Value::Object(map) => map,
        Value::String(s) => return Task::new(s, Priority::Medium, Vec::new()),
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("description".into(), Value::String(other.to_string()));
            map
        }
    };

    let description = take_first(&mut fields, DESCRIPTION_KEYS)
        .map(|v| value_to_text(&v))
        .unwrap_or_default();

    let priority = match take_first(&mut fields, PRIORITY_KEYS).map(|v| value_to_text(&v)) {
        Some(p) if !p.trim().is_empty() => p.parse().unwrap_or_else(|_| {
            warn!("unrecognized priority '{p}', using Medium");
            Priority::Medium
        }),
        _ => Priority::Medium,
    };

    let completed = take_first(&mut fields, COMPLETED_KEYS)
        .map(|v| value_is_truthy(&v))
        .unwrap_or(false);

    let tags = take_first(&mut fields, TAG_KEYS)
        .map(value_to_tags)
        .unwrap_or_default();

    let created_at = take_first(&mut fields, CREATED_KEYS)
        .and_then(|v| v.as_str().and_then(parse_timestamp))
        .unwrap_or_else(Utc::now);

    let due = take_first(&mut fields, DUE_KEYS)
        .map(|v| value_to_text(&v))
        .filter(|d| !d.trim().is_empty());

    Task {
        description,
        completed,
        priority,
        tags: normalize_tags(tags),
        created_at,
        due,
        extra: fields,
    }
}

/// Take the first non-null value in alias order. Other non-null aliases stay
/// in `fields` so they survive in [`Task::extra`].
fn take_first(fields: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    let mut found = None;
    for key in keys {
        let Some(value) = fields.get(*key) else {
            continue;
        };
        if value.is_null() {
            fields.remove(*key);
        } else if found.is_none() {
            found = fields.remove(*key);
        }
    }
    found
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// `true`, or a string equal (case-insensitively) to `true`, `1` or `x`, or a non-zero number.
pub fn value_is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => is_truthy_text(s),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

pub fn is_truthy_text(s: &str) -> bool {
    matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "x")
}

fn value_to_tags(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter(|v| !v.is_null())
            .map(|v| value_to_text(&v))
            .collect(),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a due value: RFC 3339, a naive date-time (taken as UTC), or a bare date (midnight UTC).
pub fn parse_due(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Some(dt) = parse_timestamp(s) {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
