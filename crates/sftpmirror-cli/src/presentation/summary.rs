//! End-of-job report.

use std::path::Path;

use sftpmirror_core::MirrorSummary;

/// One human-readable line describing a finished job.
pub fn summary_line(summary: &MirrorSummary, failure_log: &Path) -> String {
    // A clock step backwards mid-job yields a negative duration; show zero.
    let seconds = summary
        .elapsed()
        .to_std()
        .map_or(0.0, |d| d.as_secs_f64());
    let mut line = format!(
        "Mirrored {} into {}: {} entries, {} files ({} bytes), {} directories in {seconds:.1}s",
        summary.remote_root,
        summary.local_root.display(),
        summary.discovered,
        summary.downloaded,
        summary.bytes,
        summary.directories,
    );
    if !summary.is_clean() {
        line.push_str(&format!(
            "; {} failed, see {}",
            summary.failed_count(),
            failure_log.display()
        ));
    }
    line
}

/// The summary as pretty-printed JSON.
pub fn summary_json(summary: &MirrorSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}
