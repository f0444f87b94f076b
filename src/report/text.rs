//! Plain-text report sink

use super::ScanReport;
use crate::config::ReportConfig;
use crate::types::FindingCategory;
use crate::util::truncate_chars;
use std::fmt::Write;

/// Render the human-readable report
pub fn render(report: &ScanReport, limits: &ReportConfig) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, report, limits);
    out
}

fn write_report(out: &mut String, report: &ScanReport, limits: &ReportConfig) -> std::fmt::Result {
    writeln!(out, "Scanned {} files", report.files_scanned)?;
    if report.files_skipped > 0 {
        writeln!(out, "Skipped {} unreadable files", report.files_skipped)?;
    }

    for category in FindingCategory::ALL {
        let findings = report.findings(category);
        writeln!(out)?;
        writeln!(out, "{}: {}", category.title(), findings.len())?;
        for finding in findings.iter().take(limits.max_examples) {
            let detail = match category {
                FindingCategory::ObfuscatedString => {
                    format!("{}...", truncate_chars(&finding.detail, limits.preview_len))
                }
                FindingCategory::AdultKeyword | FindingCategory::CopyrightKeyword => {
                    format!("'{}'", finding.detail)
                }
                _ => finding.detail.clone(),
            };
            writeln!(out, "- {}: {}", finding.location, detail)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "External script/asset hosts (top {}):", limits.top_hosts)?;
    for (host, count) in report.top_hosts(limits.top_hosts) {
        writeln!(out, "- {}: {}", host, count)?;
    }

    writeln!(out)?;
    writeln!(out, "Exact duplicate groups: {}", report.exact_duplicates.len())?;
    for group in &report.exact_duplicates {
        writeln!(out, "- {}", group.members.join(", "))?;
    }

    writeln!(out)?;
    writeln!(out, "Near-duplicate pairs: {}", report.near_duplicates.len())?;
    for pair in report.near_duplicates.iter().take(limits.max_near_pairs) {
        if let [a, b] = pair.members.as_slice() {
            writeln!(out, "- {} <=> {}: similarity={:.2}", a, b, pair.similarity)?;
        }
    }

    Ok(())
}
