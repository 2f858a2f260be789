//! Avito report parsing.
//!
//! The last completed report carries per-section statistics:
//!
//! ```json
//! { "section_stats": { "sections": [ { "slug": "error", "count": 3 } ] } }
//! ```

use serde_json::Value;

use crate::body::JsonObject;

/// Section slug holding the error count.
const ERROR_SLUG: &str = "error";

/// Returns the error count of the report.
///
/// Reads `count` of the `section_stats.sections[]` entry whose `slug` is
/// `"error"`. When several entries match, the last one wins. Anything
/// missing or of the wrong type counts as zero.
pub fn count_errors(report: &JsonObject) -> usize {
    let Some(sections) = report
        .get("section_stats")
        .and_then(|stats| stats.get("sections"))
        .and_then(Value::as_array)
    else {
        return 0;
    };

    sections
        .iter()
        .filter(|section| section.get("slug").and_then(Value::as_str) == Some(ERROR_SLUG))
        .filter_map(|section| section.get("count").and_then(count_value))
        .last()
        .unwrap_or(0)
}

/// Counts arrive as JSON numbers, occasionally with a fractional part.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_value(value: &Value) -> Option<usize> {
    if let Some(n) = value.as_u64() {
        return usize::try_from(n).ok();
    }
    value.as_f64().filter(|n| *n >= 0.0).map(|n| n as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::parse_object;

    fn count(body: &str) -> usize {
        count_errors(&parse_object(body).unwrap())
    }

    #[test]
    fn test_count_errors() {
        let body = r#"{
            "section_stats": { "sections": [
                { "slug": "success", "count": 120 },
                { "slug": "error", "count": 3 },
                { "slug": "warning", "count": 8 }
            ] }
        }"#;
        assert_eq!(count(body), 3);
    }

    #[test]
    fn test_no_error_section() {
        assert_eq!(count(r#"{"section_stats": {"sections": []}}"#), 0);
        assert_eq!(count(r#"{"section_stats": {}}"#), 0);
        assert_eq!(count(r#"{}"#), 0);
    }

    #[test]
    fn test_last_error_section_wins() {
        let body = r#"{"section_stats": {"sections": [
            {"slug": "error", "count": 1},
            {"slug": "error", "count": 5}
        ]}}"#;
        assert_eq!(count(body), 5);
    }

    #[test]
    fn test_float_count() {
        assert_eq!(
            count(r#"{"section_stats": {"sections": [{"slug": "error", "count": 4.0}]}}"#),
            4
        );
    }
}
