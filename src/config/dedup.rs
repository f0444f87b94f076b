//! Duplicate detection configuration

use serde::{Deserialize, Serialize};

/// How matched characters are turned into a similarity ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityBasis {
    /// matched / length of the shorter text
    Shorter,
    /// 2 * matched / (length a + length b)
    Combined,
}

/// Exact and near-duplicate detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Pairs must score strictly above this to be reported
    pub near_threshold: f64,
    pub similarity_basis: SimilarityBasis,
    /// Skip pairs whose SimHash fingerprints differ by more than this many
    /// bits. Unset compares every pair.
    pub simhash_prefilter: Option<u32>,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            near_threshold: 0.90,
            similarity_basis: SimilarityBasis::Shorter,
            simhash_prefilter: None,
        }
    }
}
