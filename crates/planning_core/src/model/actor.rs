//! Authenticated actor performing a transition.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity of the authenticated requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub display_name: Option<String>,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
        }
    }

    /// Resolves an actor from a session user record.
    ///
    /// `id_field` names the record key holding the identity. String and
    /// integer ids are accepted; blank or missing ids resolve to `None`.
    pub fn from_record(record: &Map<String, Value>, id_field: &str) -> Option<Self> {
        let id = match record.get(id_field)? {
            Value::String(value) => value.trim().to_string(),
            Value::Number(value) => value.to_string(),
            _ => return None,
        };
        if id.is_empty() {
            return None;
        }

        let display_name = record
            .get("display_name")
            .and_then(Value::as_str)
            .map(str::to_string);

        Some(Self { id, display_name })
    }
}
