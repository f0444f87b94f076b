//! Exact-duplicate grouping
//!
//! Documents are keyed by an xxh3 digest of their normalized text. The digest
//! is not collision-free: two unrelated texts sharing a digest would be
//! reported as an exact group. At 64 bits this is treated as an accepted
//! false-positive risk.

use crate::types::{Document, DocumentPath, DuplicateGroup};
use std::collections::HashMap;
use xxhash_rust::xxh3::xxh3_64;

/// Content fingerprint of normalized text
pub fn fingerprint(normalized_text: &str) -> u64 {
    xxh3_64(normalized_text.as_bytes())
}

/// Documents grouped by fingerprint, in order of first appearance
#[derive(Debug, Default)]
pub struct FingerprintIndex {
    groups: Vec<(u64, Vec<DocumentPath>)>,
    by_hash: HashMap<u64, usize>,
}

impl FingerprintIndex {
    /// Index a corpus. Documents without text are left out.
    pub fn build(documents: &[Document]) -> Self {
        let mut index = Self::default();
        for doc in documents.iter().filter(|d| d.has_text()) {
            index.insert(fingerprint(&doc.normalized_text), doc.path.clone());
        }
        index
    }

    fn insert(&mut self, hash: u64, path: DocumentPath) {
        match self.by_hash.get(&hash) {
            Some(&slot) => self.groups[slot].1.push(path),
            None => {
                self.by_hash.insert(hash, self.groups.len());
                self.groups.push((hash, vec![path]));
            }
        }
    }

    /// Number of distinct fingerprints seen
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Exact-duplicate groups (two or more members)
    pub fn duplicate_groups(&self) -> Vec<DuplicateGroup> {
        self.groups
            .iter()
            .filter(|(_, members)| members.len() > 1)
            .map(|(_, members)| DuplicateGroup::exact(members.clone()))
            .collect()
    }
}
