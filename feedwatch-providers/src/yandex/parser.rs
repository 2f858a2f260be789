//! Yandex feed state parsing.

use serde_json::Value;

use crate::body::JsonObject;

/// Returns the entries of `state.errors`, or nothing if the path is missing
/// or not an array.
pub fn feed_errors(state: &JsonObject) -> &[Value] {
    state
        .get("state")
        .and_then(|s| s.get("errors"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::parse_object;

    #[test]
    fn test_feed_errors() {
        let state = parse_object(
            r#"{"state": {"status": "ACTIVE", "errors": [{"code": "A"}, {"code": "B"}]}}"#,
        )
        .unwrap();
        assert_eq!(feed_errors(&state).len(), 2);
    }

    #[test]
    fn test_missing_errors() {
        assert!(feed_errors(&parse_object(r#"{"state": {}}"#).unwrap()).is_empty());
        assert!(feed_errors(&parse_object(r#"{"state": {"errors": 1}}"#).unwrap()).is_empty());
        assert!(feed_errors(&parse_object("{}").unwrap()).is_empty());
    }
}
