//! Request and record types for the review API

use serde::Serialize;
use serde_json::Value;

/// Query parameters for the homework statuses endpoint
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusQuery {
    /// Lower bound (epoch seconds) of the window to report changes for
    pub from_date: u64,
}

/// A single homework record as returned by the review API.
///
/// The API payload is untrusted, so both fields are optional and unknown
/// fields are ignored. Callers decide what an incomplete record means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Homework {
    /// `homework_name` in the payload
    pub name: Option<String>,
    pub status: Option<String>,
}

impl Homework {
    /// Read a homework record out of a raw JSON value.
    ///
    /// Fields that are absent or not strings come back as `None`; a value
    /// that is not an object yields an empty record.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            name: field("homework_name"),
            status: field("status"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_reads_known_fields() {
        let hw = Homework::from_value(&json!({
            "id": 124,
            "homework_name": "username__hw_python_oop.zip",
            "status": "approved",
            "reviewer_comment": "ok",
        }));

        assert_eq!(hw.name.as_deref(), Some("username__hw_python_oop.zip"));
        assert_eq!(hw.status.as_deref(), Some("approved"));
    }

    #[test]
    fn test_from_value_tolerates_bad_shapes() {
        assert_eq!(Homework::from_value(&json!("hw1")), Homework::default());

        let hw = Homework::from_value(&json!({"homework_name": "hw1", "status": 3}));
        assert_eq!(hw.name.as_deref(), Some("hw1"));
        assert_eq!(hw.status, None);
    }
}
