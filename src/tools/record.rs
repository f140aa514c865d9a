//! Tool records and typed tool input.

use crate::types::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A persisted tool entry in the recent or favorite collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRecord {
    pub name: String,
    pub icon: String,
    pub category: String,
    pub url: String,
    /// Milliseconds since epoch at which this record was created.
    pub timestamp: i64,
}

/// The tool fields a caller supplies when recording or favoriting a tool.
///
/// `name` is the identity key within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInput {
    pub name: String,
    pub icon: String,
    pub category: String,
    pub url: String,
}

impl ToolInput {
    pub fn new(
        name: impl Into<String>,
        icon: impl Into<String>,
        category: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            category: category.into(),
            url: url.into(),
        }
    }

    /// Build from an untyped JSON object, failing on the first missing or
    /// non-string field.
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::validation("tool input must be a JSON object"))?;

        let field = |name: &str| -> Result<String> {
            match obj.get(name) {
                Some(Value::String(s)) => Ok(s.clone()),
                Some(_) => Err(Error::validation(format!(
                    "tool field '{}' must be a string",
                    name
                ))),
                None => Err(Error::validation(format!(
                    "tool field '{}' is required",
                    name
                ))),
            }
        };

        Ok(Self {
            name: field("name")?,
            icon: field("icon")?,
            category: field("category")?,
            url: field("url")?,
        })
    }

    /// Stamp this input into a record.
    pub fn to_record(&self, timestamp: i64) -> ToolRecord {
        ToolRecord {
            name: self.name.clone(),
            icon: self.icon.clone(),
            category: self.category.clone(),
            url: self.url.clone(),
            timestamp,
        }
    }
}

impl From<&ToolRecord> for ToolInput {
    fn from(record: &ToolRecord) -> Self {
        Self {
            name: record.name.clone(),
            icon: record.icon.clone(),
            category: record.category.clone(),
            url: record.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_complete() {
        let input = ToolInput::from_value(&json!({
            "name": "Contract Review",
            "icon": "📄",
            "category": "management",
            "url": "/hot-tools/contract-review",
            "extra": 42,
        }))
        .unwrap();

        assert_eq!(input.name, "Contract Review");
        assert_eq!(input.url, "/hot-tools/contract-review");
    }

    #[test]
    fn test_from_value_missing_field() {
        let err = ToolInput::from_value(&json!({
            "name": "Contract Review",
            "icon": "📄",
            "url": "/x",
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: tool field 'category' is required"
        );
    }

    #[test]
    fn test_from_value_wrong_type() {
        let err = ToolInput::from_value(&json!({
            "name": 7,
            "icon": "",
            "category": "",
            "url": "",
        }))
        .unwrap_err();
        assert!(err.to_string().contains("'name' must be a string"));

        assert!(ToolInput::from_value(&json!(["not", "an", "object"])).is_err());
    }

    #[test]
    fn test_to_record_carries_fields() {
        let input = ToolInput::new("Code LLM", "💻", "llm", "https://example.com/code");
        let record = input.to_record(1_700_000_000_000);
        assert_eq!(record.timestamp, 1_700_000_000_000);
        assert_eq!(ToolInput::from(&record), input);
    }

    #[test]
    fn test_record_json_field_names() {
        let record = ToolInput::new("a", "b", "c", "d").to_record(5);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({"name": "a", "icon": "b", "category": "c", "url": "d", "timestamp": 5})
        );
    }
}
