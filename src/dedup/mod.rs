//! Duplicate content detection
//!
//! Two whole-corpus passes, run after every document has been normalized:
//! - `FingerprintIndex`: exact matches on normalized text
//! - `NearDuplicateMatcher`: pairwise block-matching similarity

pub mod fingerprint;
pub mod similarity;
pub mod simhash;

pub use fingerprint::{fingerprint, FingerprintIndex};
pub use similarity::{similarity, NearDuplicateMatcher};
pub use simhash::{page_sketch, within_budget};
