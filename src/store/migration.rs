use serde_json::Value;

use crate::model::{Task, normalize};

/// Shape of the persisted document as found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// Bare array of task records (the shape we write).
    Array,
    /// `{"todos": [...]}` wrapper.
    Wrapped,
    /// Bare array of plain strings from the pre-metadata era.
    Legacy,
}

#[derive(Debug)]
pub struct Decoded {
    pub shape: DocumentShape,
    pub tasks: Vec<Task>,
}

/// Decode a parsed document into canonical tasks.
///
/// Returns `None` when the top-level value is neither an array nor an object
/// holding a `todos` array.
pub fn decode_document(doc: Value) -> Option<Decoded> {
    let (shape, items) = match doc {
        Value::Array(items) => {
            let shape = if is_legacy(&items) {
                DocumentShape::Legacy
            } else {
                DocumentShape::Array
            };
            (shape, items)
        }
        Value::Object(mut map) => match map.remove("todos") {
            Some(Value::Array(items)) => (DocumentShape::Wrapped, items),
            _ => return None,
        },
        _ => return None,
    };

    let tasks = items.into_iter().map(normalize).collect();
    Some(Decoded { shape, tasks })
}

/// Legacy data is detected by its first element alone being a plain string.
/// Once migrated, the first element is a record and this no longer matches.
fn is_legacy(items: &[Value]) -> bool {
    matches!(items.first(), Some(Value::String(_)))
}
