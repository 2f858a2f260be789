//! Integration tests for status classification and report assembly.

use chrono::NaiveDate;
use feedwatch_core::models::status::{FAILURE_MARKER, PROBLEM_MARKER, SUCCESS_MARKER};
use feedwatch_core::{FailureKind, Platform, Report, StatusLine, StatusOutcome};

#[test]
fn test_problem_line_carries_literal_count() {
    let line = StatusLine::classify(Platform::Avito, "Test Co", 3, 0);
    let text = line.to_string();
    assert!(text.contains('3'));
    assert!(text.starts_with(PROBLEM_MARKER));
    assert!(!text.contains(SUCCESS_MARKER));
}

#[test]
fn test_every_failure_uses_failure_marker() {
    let kinds = [
        FailureKind::TokenIssue,
        FailureKind::TokenRefresh,
        FailureKind::BuildRequest,
        FailureKind::Request,
        FailureKind::RequestAfterRefresh,
        FailureKind::ReadResponse,
        FailureKind::ParseJson,
        FailureKind::HttpStatus(500),
    ];

    for kind in kinds {
        let text = StatusLine::failed(Platform::Avito, "A", kind).to_string();
        assert!(text.starts_with(FAILURE_MARKER), "{text}");
        assert!(text.ends_with(&kind.describe()), "{text}");
    }
}

#[test]
fn test_outcome_serialization() {
    let outcome = StatusOutcome::Failed {
        reason: FailureKind::HttpStatus(403),
    };
    let json = serde_json::to_value(outcome).unwrap();
    assert_eq!(json["kind"], "failed");
    assert_eq!(json["reason"]["http_status"], 403);

    let parsed: StatusOutcome = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, outcome);
}

#[test]
fn test_report_has_one_line_per_account() {
    let lines = vec![
        StatusLine::classify(Platform::Cian, "One", 0, 0),
        StatusLine::classify(Platform::Cian, "Two", 1, 0),
        StatusLine::failed(Platform::Cian, "Three", FailureKind::ParseJson),
    ];
    let report = Report::new(
        Platform::Cian,
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        lines,
    );

    let rendered = report.render();
    assert_eq!(rendered.lines().count(), 2 + 3);
    assert!(rendered.contains("[31.12.2024]"));
}
