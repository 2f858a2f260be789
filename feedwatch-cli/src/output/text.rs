//! Text output formatting.

use feedwatch_core::Report;

/// Plain text summary of finished passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new() -> Self {
        Self
    }

    /// One line per report: platform, account count, accounts needing
    /// attention.
    pub fn format_report(&self, report: &Report) -> String {
        let total = report.lines.len();
        let problems = report.problem_count();
        let status = if problems == 0 { "✓" } else { "✗" };
        format!(
            "{status} {:<8} {total} account(s), {problems} need attention",
            report.platform.display_name()
        )
    }

    /// Summary of several reports.
    pub fn format_summary(&self, reports: &[Report]) -> String {
        if reports.is_empty() {
            return "No accounts configured for the selected platforms".to_string();
        }
        reports
            .iter()
            .map(|r| self.format_report(r))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
