//! Submission data shared by every component of a wizard.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The submission data object.
///
/// Components read values by dot path; only the controller writes, and
/// every write is followed by a visibility recalculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Submission {
    /// Creates an empty submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a submission from a JSON object. Non-objects yield empty data.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(data) => Self { data },
            _ => Self::default(),
        }
    }

    /// Returns the data as a JSON object value.
    pub fn data_value(&self) -> Value {
        Value::Object(self.data.clone())
    }

    /// Reads a value by dot path (`address.city`).
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.data, path)
    }

    /// Writes a value by dot path, creating intermediate objects.
    pub fn set(&mut self, path: &str, value: Value) {
        let mut segments = path.split('.').peekable();
        let mut current = &mut self.data;
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                current.insert(segment.to_string(), value);
                return;
            }
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = match entry {
                Value::Object(map) => map,
                _ => return,
            };
        }
    }

    /// Removes a value by top-level key.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }
}

/// Looks up a dot path in a JSON object.
pub fn lookup<'a>(data: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = data.get(first)?;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
