//! Cian report parsing.

use serde_json::{Map, Value};

use crate::body::JsonObject;

/// Offer key listing blocking problems.
pub const ERRORS_KEY: &str = "errors";
/// Offer key listing non-blocking problems.
pub const WARNINGS_KEY: &str = "warnings";

/// Returns the offer objects under `result.offers`.
///
/// Non-object entries are skipped; a missing or mistyped path yields an
/// empty list.
pub fn extract_offers(report: &JsonObject) -> Vec<&Map<String, Value>> {
    report
        .get("result")
        .and_then(|result| result.get("offers"))
        .and_then(Value::as_array)
        .map(|offers| offers.iter().filter_map(Value::as_object).collect())
        .unwrap_or_default()
}

/// Returns the offers whose `key` holds a non-empty array.
pub fn filter_offers_by_key<'a>(
    offers: &[&'a Map<String, Value>],
    key: &str,
) -> Vec<&'a Map<String, Value>> {
    offers
        .iter()
        .copied()
        .filter(|offer| {
            offer
                .get(key)
                .and_then(Value::as_array)
                .is_some_and(|items| !items.is_empty())
        })
        .collect()
}

/// Wraps a list of offers back into a JSON array.
pub fn offers_to_value(offers: &[&Map<String, Value>]) -> Value {
    Value::Array(offers.iter().map(|o| Value::Object((*o).clone())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::parse_object;

    const REPORT: &str = r#"{
        "result": { "offers": [
            { "id": 1, "errors": ["bad photo"], "warnings": [] },
            { "id": 2, "errors": [], "warnings": ["short text"] },
            { "id": 3, "errors": ["x"], "warnings": ["y"] },
            { "id": 4 },
            "not an offer"
        ] }
    }"#;

    #[test]
    fn test_extract_offers_skips_non_objects() {
        let report = parse_object(REPORT).unwrap();
        assert_eq!(extract_offers(&report).len(), 4);
    }

    #[test]
    fn test_filter_by_key() {
        let report = parse_object(REPORT).unwrap();
        let offers = extract_offers(&report);

        let errors = filter_offers_by_key(&offers, ERRORS_KEY);
        let warnings = filter_offers_by_key(&offers, WARNINGS_KEY);

        let ids = |list: &[&Map<String, Value>]| -> Vec<i64> {
            list.iter().filter_map(|o| o["id"].as_i64()).collect()
        };
        assert_eq!(ids(&errors), [1, 3]);
        assert_eq!(ids(&warnings), [2, 3]);
    }

    #[test]
    fn test_missing_result() {
        let report = parse_object(r#"{"result": {"offers": null}}"#).unwrap();
        assert!(extract_offers(&report).is_empty());
        assert!(extract_offers(&parse_object("{}").unwrap()).is_empty());
    }

    #[test]
    fn test_non_array_problems_are_ignored() {
        let report =
            parse_object(r#"{"result": {"offers": [{"errors": "text"}, {"errors": {}}]}}"#)
                .unwrap();
        let offers = extract_offers(&report);
        assert!(filter_offers_by_key(&offers, ERRORS_KEY).is_empty());
    }
}
