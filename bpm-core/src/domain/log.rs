//! Audit log domain types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An audit entry attached to a parent resource
///
/// Only `content` and `action` are fixed by the backend; anything else it
/// returns (author, timestamps, ids) is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub action: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_keeps_extra_fields() {
        let entry: LogEntry = serde_json::from_value(json!({
            "content": "Deposit received",
            "action": "payment",
            "create_date": "2023-03-01T09:00:00Z",
            "user": "ops"
        }))
        .unwrap();

        assert_eq!(entry.content, "Deposit received");
        assert_eq!(entry.action, "payment");
        assert_eq!(entry.extra.get("user"), Some(&json!("ops")));
    }

    #[test]
    fn test_deserialize_tolerates_missing_content() {
        let entry: LogEntry = serde_json::from_value(json!({ "id": 3 })).unwrap();
        assert!(entry.content.is_empty());
        assert!(entry.action.is_empty());
    }
}
