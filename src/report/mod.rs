//! Scan report
//!
//! [`ScanReport`] is the write-once result of a scan. It keeps full counts;
//! any truncation happens in the sinks (`text`, `json`).

pub mod json;
pub mod text;

use crate::scan::ScanContext;
use crate::types::{DuplicateGroup, Finding, FindingCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Documents that made it into the corpus
    pub files_scanned: usize,
    /// Candidate files skipped as unreadable or undecodable
    pub files_skipped: usize,
    /// Findings per category, sorted by (location, detail)
    pub findings: BTreeMap<FindingCategory, Vec<Finding>>,
    /// External host -> occurrence count
    pub hosts: BTreeMap<String, usize>,
    pub exact_duplicates: Vec<DuplicateGroup>,
    pub near_duplicates: Vec<DuplicateGroup>,
}

impl ScanReport {
    /// Merge classifier output and duplicate groups into a report
    pub fn assemble(
        context: ScanContext,
        files_skipped: usize,
        exact_duplicates: Vec<DuplicateGroup>,
        near_duplicates: Vec<DuplicateGroup>,
    ) -> Self {
        let mut findings: BTreeMap<FindingCategory, Vec<Finding>> = BTreeMap::new();
        for finding in context.findings {
            findings.entry(finding.category).or_default().push(finding);
        }
        for list in findings.values_mut() {
            list.sort_by(|a, b| (&a.location, &a.detail).cmp(&(&b.location, &b.detail)));
        }

        Self {
            files_scanned: context.documents,
            files_skipped,
            findings,
            hosts: context.hosts.into_iter().collect(),
            exact_duplicates,
            near_duplicates,
        }
    }

    /// Findings of one category (empty slice when none)
    pub fn findings(&self, category: FindingCategory) -> &[Finding] {
        self.findings.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, category: FindingCategory) -> usize {
        self.findings(category).len()
    }

    pub fn total_findings(&self) -> usize {
        self.findings.values().map(Vec::len).sum()
    }

    /// Hosts by descending count, ties by name, at most `limit`
    pub fn top_hosts(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut hosts: Vec<(&str, usize)> =
            self.hosts.iter().map(|(h, c)| (h.as_str(), *c)).collect();
        hosts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        hosts.truncate(limit);
        hosts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ScanContext {
        let mut ctx = ScanContext::default();
        ctx.push(Finding::new(FindingCategory::CopyrightKeyword, "b.html", "crack"));
        ctx.push(Finding::new(FindingCategory::CopyrightKeyword, "a.html", "warez"));
        ctx.push(Finding::new(FindingCategory::MissingAlt, "a.html", "x.png"));
        for host in ["b.com", "a.com", "c.com", "c.com", "b.com", "c.com"] {
            ctx.record_host(host);
        }
        ctx.documents = 2;
        ctx
    }

    #[test]
    fn assemble_groups_and_sorts_findings() {
        let report = ScanReport::assemble(context(), 1, vec![], vec![]);
        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.files_skipped, 1);
        assert_eq!(report.total_findings(), 3);

        let copyright = report.findings(FindingCategory::CopyrightKeyword);
        assert_eq!(copyright[0].location, "a.html");
        assert_eq!(copyright[1].location, "b.html");
        assert_eq!(report.count(FindingCategory::MissingAlt), 1);
        assert!(report.findings(FindingCategory::AdultKeyword).is_empty());
    }

    #[test]
    fn top_hosts_sorted_by_count_then_name() {
        let report = ScanReport::assemble(context(), 0, vec![], vec![]);
        assert_eq!(
            report.top_hosts(10),
            vec![("c.com", 3), ("b.com", 2), ("a.com", 1)]
        );
        assert_eq!(report.top_hosts(1), vec![("c.com", 3)]);
        assert_eq!(report.hosts.len(), 3, "full tally kept");
    }
}
