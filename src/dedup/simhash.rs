//! Page sketches for the near-duplicate prefilter
//!
//! A sketch is a 64-bit SimHash over overlapping character shingles of the
//! normalized text. Character shingles keep short pages (a title and a
//! sentence) from collapsing to a handful of features, which word n-grams do.
//!
//! Contract: a budget of 64 bits never drops a pair, and identical texts
//! always sketch identically. Smaller budgets are an approximation and may
//! drop pairs the full ratio would report.

use xxhash_rust::xxh3::xxh3_64;

/// Characters per shingle
pub const SHINGLE_CHARS: usize = 5;

/// Widest possible Hamming distance between two sketches
pub const MAX_DISTANCE: u32 = 64;

/// Sketch of a normalized page text. Empty text sketches to 0.
pub fn page_sketch(normalized_text: &str) -> u64 {
    let mut bounds: Vec<usize> = normalized_text.char_indices().map(|(i, _)| i).collect();
    if bounds.is_empty() {
        return 0;
    }
    bounds.push(normalized_text.len());

    let chars = bounds.len() - 1;
    let mut votes = [0i32; 64];
    let mut vote = |shingle: &str| {
        let hash = xxh3_64(shingle.as_bytes());
        for (bit, v) in votes.iter_mut().enumerate() {
            *v += if hash >> bit & 1 == 1 { 1 } else { -1 };
        }
    };

    if chars <= SHINGLE_CHARS {
        vote(normalized_text);
    } else {
        for start in 0..=chars - SHINGLE_CHARS {
            vote(&normalized_text[bounds[start]..bounds[start + SHINGLE_CHARS]]);
        }
    }

    votes
        .iter()
        .enumerate()
        .filter(|(_, v)| **v > 0)
        .fold(0u64, |acc, (bit, _)| acc | 1 << bit)
}

/// Whether two sketches differ in at most `max_bits` bits
pub fn within_budget(a: u64, b: u64, max_bits: u32) -> bool {
    (a ^ b).count_ones() <= max_bits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_sketches_identically() {
        let text = "welcome to the dragon arcade play every game for free";
        assert_eq!(page_sketch(text), page_sketch(text));
        assert!(within_budget(page_sketch(text), page_sketch(text), 0));
    }

    #[test]
    fn empty_text_sketches_to_zero() {
        assert_eq!(page_sketch(""), 0);
    }

    #[test]
    fn short_text_is_a_single_shingle() {
        assert_eq!(page_sketch("home"), xxh3_64(b"home"));
        assert_eq!(page_sketch("about"), xxh3_64(b"about"));
    }

    #[test]
    fn multibyte_text_is_shingled_on_char_boundaries() {
        // Would panic on a byte-offset slice inside a multi-byte char
        let sketch = page_sketch("ünïcödé ärcädé gämé");
        assert_eq!(sketch, page_sketch("ünïcödé ärcädé gämé"));
    }

    #[test]
    fn full_budget_keeps_every_pair() {
        let pairs = [
            ("play the dragon game now", "play the dragon game today"),
            ("home", "the history of our company starts in a small garage"),
            ("", "anything"),
        ];
        for (a, b) in pairs {
            assert!(within_budget(page_sketch(a), page_sketch(b), MAX_DISTANCE));
        }
    }

    #[test]
    fn budget_bounds_distance() {
        assert!(within_budget(0b1011, 0b0001, 2));
        assert!(!within_budget(0b1011, 0b0001, 1));
        assert!(!within_budget(u64::MAX, 0, 63));
    }
}
