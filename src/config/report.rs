//! Report presentation limits
//!
//! These only bound what the sinks print. Counts in the report are never
//! truncated.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Example findings printed per category
    pub max_examples: usize,
    /// Hosts listed in the external-host summary
    pub top_hosts: usize,
    /// Near-duplicate pairs listed
    pub max_near_pairs: usize,
    /// Characters of an obfuscated string shown before `...`
    pub preview_len: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_examples: 50,
            top_hosts: 50,
            max_near_pairs: 100,
            preview_len: 120,
        }
    }
}
