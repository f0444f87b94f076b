//! Near-duplicate detection
//!
//! Similarity is based on Ratcliff/Obershelp block matching: find the longest
//! common contiguous block, then recurse on the unmatched text to its left
//! and right. The total matched length is turned into a ratio according to
//! the configured [`SimilarityBasis`].
//!
//! Every unordered pair of documents is compared, so cost grows
//! quadratically with the corpus. `simhash_prefilter` trades recall for speed
//! on large sites.
//!
//! A pair is only scored when the shorter text is at least `threshold` times
//! the length of the longer one. Without that gate a one-word page would score
//! 1.0 on the shorter basis against any article containing its letters.

use super::simhash::{page_sketch, within_budget};
use crate::config::{DedupConfig, SimilarityBasis};
use crate::types::{Document, DuplicateGroup};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Similarity ratio in `[0, 1]` between two normalized texts
///
/// Symmetric: the pair is put in a canonical order before matching, because
/// block matching itself can pick different blocks depending on argument
/// order.
pub fn similarity(a: &str, b: &str, basis: SimilarityBasis) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    char_similarity(&a, &b, basis)
}

fn char_similarity(a: &[char], b: &[char], basis: SimilarityBasis) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let (first, second) = if (a.len(), a) <= (b.len(), b) { (a, b) } else { (b, a) };
    let matched = matched_chars(first, second) as f64;
    match basis {
        SimilarityBasis::Shorter => {
            let shorter = first.len().min(second.len());
            if shorter == 0 {
                0.0
            } else {
                matched / shorter as f64
            }
        }
        SimilarityBasis::Combined => 2.0 * matched / (first.len() + second.len()) as f64,
    }
}

/// Total length of the matching blocks between `a` and `b`
pub fn matched_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        positions.entry(*c).or_default().push(j);
    }

    let mut finder = LongestMatch::new(b.len());
    let mut total = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, size) = finder.find(a, &positions, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        total += size;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            queue.push((i + size, ahi, j + size, bhi));
        }
    }
    total
}

/// Scratch space for longest-common-block search, reused across calls.
///
/// `prev[j + 1]` holds the length of the common block ending at the previous
/// row's `a` character and `b[j]`. Only touched slots are reset between rows.
struct LongestMatch {
    prev: Vec<usize>,
    cur: Vec<usize>,
    prev_touched: Vec<usize>,
    cur_touched: Vec<usize>,
}

impl LongestMatch {
    fn new(b_len: usize) -> Self {
        Self {
            prev: vec![0; b_len + 1],
            cur: vec![0; b_len + 1],
            prev_touched: Vec::new(),
            cur_touched: Vec::new(),
        }
    }

    /// Longest block `a[i..i+size] == b[j..j+size]` inside the given window.
    /// Ties resolve to the earliest `i`, then the earliest `j`.
    fn find(
        &mut self,
        a: &[char],
        positions: &HashMap<char, Vec<usize>>,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            if let Some(js) = positions.get(c) {
                let start = js.partition_point(|&j| j < blo);
                for &j in js[start..].iter().take_while(|&&j| j < bhi) {
                    let k = if j > blo { self.prev[j] + 1 } else { 1 };
                    self.cur[j + 1] = k;
                    self.cur_touched.push(j + 1);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            for slot in self.prev_touched.drain(..) {
                self.prev[slot] = 0;
            }
            std::mem::swap(&mut self.prev, &mut self.cur);
            std::mem::swap(&mut self.prev_touched, &mut self.cur_touched);
        }

        for slot in self.prev_touched.drain(..) {
            self.prev[slot] = 0;
        }
        (best_i, best_j, best_size)
    }
}

/// Pairwise near-duplicate matcher over a whole corpus
pub struct NearDuplicateMatcher {
    threshold: f64,
    basis: SimilarityBasis,
    prefilter: Option<u32>,
}

impl NearDuplicateMatcher {
    pub fn new(config: &DedupConfig) -> Self {
        Self {
            threshold: config.near_threshold,
            basis: config.similarity_basis,
            prefilter: config.simhash_prefilter,
        }
    }

    /// All unordered pairs scoring strictly above the threshold, in corpus
    /// order. Pairs are never merged into clusters. Documents without text
    /// and pairs with identical text (exact duplicates) are not reported.
    pub fn find_pairs(&self, documents: &[Document]) -> Vec<DuplicateGroup> {
        let candidates: Vec<Candidate<'_>> = documents
            .iter()
            .filter(|d| d.has_text())
            .map(|d| Candidate {
                doc: d,
                chars: d.normalized_text.chars().collect(),
                sketch: self.prefilter.map(|_| page_sketch(&d.normalized_text)),
            })
            .collect();

        let pairs: Vec<DuplicateGroup> = (0..candidates.len())
            .into_par_iter()
            .flat_map_iter(|i| {
                let candidates = &candidates;
                (i + 1..candidates.len()).filter_map(move |j| self.compare(&candidates[i], &candidates[j]))
            })
            .collect();

        debug!(
            documents = candidates.len(),
            pairs = pairs.len(),
            "near-duplicate matching complete"
        );
        pairs
    }

    fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Option<DuplicateGroup> {
        if a.doc.normalized_text == b.doc.normalized_text {
            return None;
        }
        if !self.lengths_comparable(a.chars.len(), b.chars.len()) {
            return None;
        }
        if let (Some(max), Some(sa), Some(sb)) = (self.prefilter, a.sketch, b.sketch) {
            if !within_budget(sa, sb, max) {
                return None;
            }
        }
        let score = char_similarity(&a.chars, &b.chars, self.basis);
        (score > self.threshold)
            .then(|| DuplicateGroup::near(a.doc.path.clone(), b.doc.path.clone(), score))
    }

    /// Shorter length over longer length must exceed the threshold
    fn lengths_comparable(&self, a: usize, b: usize) -> bool {
        let (shorter, longer) = if a <= b { (a, b) } else { (b, a) };
        longer > 0 && shorter as f64 / longer as f64 > self.threshold
    }
}

/// A document prepared for pairwise matching
struct Candidate<'a> {
    doc: &'a Document,
    chars: Vec<char>,
    sketch: Option<u64>,
}
