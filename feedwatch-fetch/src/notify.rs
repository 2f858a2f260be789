//! Notification sinks.
//!
//! A sink receives finished report text and, optionally, files. Delivery
//! failures are logged by the sink and never reach the caller.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

/// Destination for finished reports.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Posts a text message. Markdown bold (`*text*`) must be supported.
    async fn post_message(&self, text: &str);

    /// Posts a file as an attachment.
    async fn post_file(&self, path: &Path);
}

/// Sink that prints to stdout instead of posting.
///
/// Used for dry runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

#[async_trait]
impl NotificationSink for StdoutSink {
    async fn post_message(&self, text: &str) {
        println!("{text}");
    }

    async fn post_file(&self, path: &Path) {
        info!(path = %path.display(), "Dry run: skipping file upload");
        println!("[file] {}", path.display());
    }
}
