//! JSON report sink
//!
//! Serializes the complete report. Unlike the text sink nothing is capped or
//! truncated here.

use super::ScanReport;

pub fn render(report: &ScanReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
