//! Per-scan accumulator
//!
//! Holds the only cross-document mutable state of a scan: the findings list
//! and the external host tally. Workers fill their own context and contexts
//! are combined with [`ScanContext::merge`], which is associative and
//! insensitive to merge order apart from finding order (sorted at the end).

use crate::types::Finding;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ScanContext {
    pub findings: Vec<Finding>,
    /// External host -> occurrence count
    pub hosts: HashMap<String, usize>,
    /// Documents classified into this context
    pub documents: usize,
}

impl ScanContext {
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn record_host(&mut self, host: &str) {
        *self.hosts.entry(host.to_string()).or_insert(0) += 1;
    }

    /// Combine two partial contexts
    pub fn merge(mut self, other: ScanContext) -> ScanContext {
        self.findings.extend(other.findings);
        for (host, count) in other.hosts {
            *self.hosts.entry(host).or_insert(0) += count;
        }
        self.documents += other.documents;
        self
    }
}
