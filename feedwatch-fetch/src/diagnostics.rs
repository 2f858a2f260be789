//! Diagnostic side channel for decoded responses.
//!
//! Platform integrations hand every decoded body (and the extracted problem
//! subsets) to a [`DiagnosticSink`]. Nothing downstream reads these
//! artifacts back; classification never depends on them.
//!
//! - [`NoopDiagnostics`] - default, drops everything
//! - [`FileDiagnostics`] - writes pretty JSON files, then deletes them unless
//!   asked to keep them for inspection

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

/// Receiver for diagnostic payloads.
pub trait DiagnosticSink: Send + Sync {
    /// Records `payload` under `name` (no extension).
    fn record(&self, name: &str, payload: &Value);
}

// ============================================================================
// No-op
// ============================================================================

/// Sink that ignores all payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl DiagnosticSink for NoopDiagnostics {
    fn record(&self, _name: &str, _payload: &Value) {}
}

// ============================================================================
// File-backed
// ============================================================================

/// Sink that writes each payload to `<dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct FileDiagnostics {
    dir: PathBuf,
    keep: bool,
}

impl FileDiagnostics {
    /// Creates a file sink. With `keep == false` every file is removed right
    /// after it is written.
    pub fn new(dir: impl Into<PathBuf>, keep: bool) -> Self {
        Self {
            dir: dir.into(),
            keep,
        }
    }

    /// Path a payload named `name` is written to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    fn write(&self, path: &Path, payload: &Value) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(payload)?;
        fs::write(path, json)
    }
}

impl DiagnosticSink for FileDiagnostics {
    fn record(&self, name: &str, payload: &Value) {
        let path = self.path_for(name);
        if let Err(e) = self.write(&path, payload) {
            warn!(path = %path.display(), error = %e, "Failed to write diagnostic file");
            return;
        }
        debug!(path = %path.display(), "Diagnostic file written");

        if self.keep {
            return;
        }

        match fs::remove_file(&path) {
            Ok(()) => debug!(path = %path.display(), "Diagnostic file removed"),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove diagnostic file"),
        }
    }
}

// ============================================================================
// Cleanup
// ============================================================================

/// Removes stray `*.json` artifacts in `dir`.
///
/// Files whose name starts with any of `preserve_prefixes` (cached
/// credentials) are left alone. Returns the number of files removed.
pub fn cleanup_artifacts(dir: &Path, preserve_prefixes: &[&str]) -> io::Result<usize> {
    let mut removed = 0;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !name.ends_with(".json") {
            continue;
        }
        if preserve_prefixes.iter().any(|p| name.starts_with(p)) {
            continue;
        }

        let path = entry.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "Removed file");
                removed += 1;
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove file"),
        }
    }

    Ok(removed)
}

// ============================================================================
// Tests
// ============================================================================
