//! Dated per-platform report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::platform::Platform;
use super::status::StatusLine;

/// Date format used in report headers.
pub const HEADER_DATE_FORMAT: &str = "%d.%m.%Y";

/// A platform report: a dated header followed by one line per account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Platform the report covers.
    pub platform: Platform,
    /// Day the report was assembled.
    pub date: NaiveDate,
    /// Status lines in account configuration order.
    pub lines: Vec<StatusLine>,
}

impl Report {
    /// Creates a report.
    pub fn new(platform: Platform, date: NaiveDate, lines: Vec<StatusLine>) -> Self {
        Self {
            platform,
            date,
            lines,
        }
    }

    /// Header line, e.g. `🟢 *Avito report* [05.03.2025]:`.
    pub fn header(&self) -> String {
        format!(
            "{} *{} report* [{}]:",
            self.platform.header_marker(),
            self.platform.display_name(),
            self.date.format(HEADER_DATE_FORMAT)
        )
    }

    /// Full message body: header, blank line, then one line per account.
    pub fn render(&self) -> String {
        let mut text = self.header();
        text.push_str("\n\n");
        for line in &self.lines {
            text.push_str(&line.to_string());
            text.push('\n');
        }
        text
    }

    /// Number of accounts that were not clean.
    pub fn problem_count(&self) -> usize {
        self.lines.iter().filter(|l| !l.is_clean()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status::FailureKind;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    }

    #[test]
    fn test_header_format() {
        let report = Report::new(Platform::Avito, date(), Vec::new());
        assert_eq!(report.header(), "🟢 *Avito report* [05.03.2025]:");
    }

    #[test]
    fn test_render_keeps_line_order() {
        let report = Report::new(
            Platform::Yandex,
            date(),
            vec![
                StatusLine::classify(Platform::Yandex, "Zeta", 0, 0),
                StatusLine::failed(Platform::Yandex, "Alpha", FailureKind::Request),
            ],
        );

        let text = report.render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "🟠 *Yandex report* [05.03.2025]:");
        assert_eq!(lines[1], "");
        assert!(lines[2].contains("Zeta"));
        assert!(lines[3].contains("Alpha"));
        assert!(text.ends_with('\n'));
        assert_eq!(report.problem_count(), 1);
    }

    #[test]
    fn test_empty_report_is_header_only() {
        let report = Report::new(Platform::Cian, date(), Vec::new());
        assert_eq!(report.render(), "🔵 *Cian report* [05.03.2025]:\n\n");
    }
}
