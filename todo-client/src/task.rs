use std::fmt;

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::due;

/// Backend identifier of a task.
///
/// The backend may hand out numeric or string ids; whichever shape arrives is
/// kept so it serializes back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TaskId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Number(n) => write!(f, "{n}"),
            TaskId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        TaskId::Number(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        TaskId::Text(value.to_string())
    }
}

/// A task record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    /// Raw due date as sent by the backend. Parsed lazily so a malformed
    /// value never fails the whole list.
    #[serde(default)]
    pub due_date: Option<String>,
}

impl Task {
    /// Due timestamp, or `None` when the task has no due date or it cannot be parsed.
    pub fn due_at(&self, local: UtcOffset) -> Option<OffsetDateTime> {
        self.raw_due().and_then(|raw| due::parse_due(raw, local))
    }

    /// The due date string, with empty values treated as absent.
    pub fn raw_due(&self) -> Option<&str> {
        self.due_date
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_ids_deserialize() {
        let numeric: Task =
            serde_json::from_str(r#"{"id":7,"title":"A","completed":false,"dueDate":null}"#)
                .unwrap();
        assert_eq!(numeric.id, TaskId::Number(7));
        assert_eq!(numeric.id.to_string(), "7");

        let text: Task = serde_json::from_str(r#"{"id":"64ab","title":"B"}"#).unwrap();
        assert_eq!(text.id, TaskId::Text("64ab".to_string()));
        assert!(!text.completed);
        assert_eq!(text.due_date, None);
    }

    #[test]
    fn empty_due_date_counts_as_absent() {
        let task = Task {
            id: 1.into(),
            title: "A".to_string(),
            completed: false,
            due_date: Some("  ".to_string()),
        };
        assert_eq!(task.raw_due(), None);
        assert_eq!(task.due_at(UtcOffset::UTC), None);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let task = Task {
            id: 2.into(),
            title: "B".to_string(),
            completed: true,
            due_date: Some("2025-01-01T10:00".to_string()),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 2,
                "title": "B",
                "completed": true,
                "dueDate": "2025-01-01T10:00"
            })
        );
    }
}
