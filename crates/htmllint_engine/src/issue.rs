//! Issue records reported by a lint engine.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single lint finding.
///
/// Issues are produced by the engine and only ever read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Engine-specific issue code (e.g. `E011`).
    pub code: String,

    /// 1-based line number.
    pub line: usize,

    /// Identifier of the violated rule.
    pub rule: String,

    /// Free-form payload attached by the rule.
    #[serde(default)]
    pub data: Map<String, Value>,

    /// Message already rendered by the engine, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Issue {
    /// Creates a new issue with an empty payload.
    pub fn new(code: impl Into<String>, line: usize, rule: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            line,
            rule: rule.into(),
            data: Map::new(),
            message: None,
        }
    }

    /// Adds a payload entry.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Sets the pre-rendered message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns a payload entry as display text.
    ///
    /// Strings must be non-empty; numbers and `true` are stringified.
    /// `null`, `false`, arrays and objects yield `None`.
    pub fn data_text(&self, key: &str) -> Option<String> {
        match self.data.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_issue_new() {
        let issue = Issue::new("E001", 3, "attr-bans");

        assert_eq!(issue.code, "E001");
        assert_eq!(issue.line, 3);
        assert_eq!(issue.rule, "attr-bans");
        assert!(issue.data.is_empty());
        assert!(issue.message.is_none());
    }

    #[test]
    fn test_issue_builder_chain() {
        let issue = Issue::new("E011", 7, "id-class-style")
            .with_data("value", "Foo")
            .with_data("format", "dash")
            .with_message("bad id");

        assert_eq!(issue.data["value"], "Foo");
        assert_eq!(issue.message.as_deref(), Some("bad id"));
    }

    #[rstest]
    #[case::string(json!("text"), Some("text"))]
    #[case::number(json!(42), Some("42"))]
    #[case::float(json!(1.5), Some("1.5"))]
    #[case::true_flag(json!(true), Some("true"))]
    #[case::empty_string(json!(""), None)]
    #[case::false_flag(json!(false), None)]
    #[case::null(Value::Null, None)]
    #[case::array(json!(["a"]), None)]
    #[case::object(json!({"a": 1}), None)]
    fn test_data_text(#[case] value: Value, #[case] expected: Option<&str>) {
        let issue = Issue::new("E011", 1, "id-class-style").with_data("value", value);

        assert_eq!(issue.data_text("value").as_deref(), expected);
    }

    #[test]
    fn test_data_text_missing_key() {
        let issue = Issue::new("E011", 1, "id-class-style");
        assert_eq!(issue.data_text("value"), None);
    }

    #[test]
    fn test_issue_deserialization_defaults() {
        let json = r#"{ "code": "E005", "line": 2, "rule": "attr-quote-style" }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();

        assert_eq!(issue.code, "E005");
        assert_eq!(issue.line, 2);
        assert!(issue.data.is_empty());
        assert!(issue.message.is_none());
    }

    #[test]
    fn test_issue_deserialization_full_ignores_unknown_fields() {
        let json = r#"{
            "code": "E011",
            "line": 4,
            "column": 9,
            "rule": "id-class-style",
            "data": { "value": "fooBar", "format": "dash" },
            "message": "ids must be dashed"
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();

        assert_eq!(issue.line, 4);
        assert_eq!(issue.data_text("format").as_deref(), Some("dash"));
        assert_eq!(issue.message.as_deref(), Some("ids must be dashed"));
    }
}
