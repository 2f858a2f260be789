//! Report assembly and delivery.

use std::path::Path;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use feedwatch_core::{Report, StatusCollector};
use feedwatch_fetch::NotificationSink;
use tracing::{info, instrument};

/// Today's date in local time, as printed in report headers.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Hands finished reports to a notification sink.
///
/// One message per platform pass. No retries, no batching.
#[derive(Clone)]
pub struct Reporter {
    sink: Arc<dyn NotificationSink>,
}

impl Reporter {
    /// Creates a reporter posting to `sink`.
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Runs `collector` over all its accounts and posts the resulting report.
    #[instrument(skip(self, collector), fields(platform = %collector.platform()))]
    pub async fn run<C: StatusCollector>(&self, collector: &C, date: NaiveDate) -> Report {
        let lines = collector.collect().await;
        let report = Report::new(collector.platform(), date, lines);
        self.publish(&report).await;
        report
    }

    /// Posts a rendered report.
    pub async fn publish(&self, report: &Report) {
        info!(
            platform = %report.platform,
            accounts = report.lines.len(),
            problems = report.problem_count(),
            "Posting report"
        );
        self.sink.post_message(&report.render()).await;
    }

    /// Posts a file as an attachment.
    pub async fn attach(&self, path: &Path) {
        info!(path = %path.display(), "Posting attachment");
        self.sink.post_file(path).await;
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter").finish_non_exhaustive()
    }
}
