//! sitescan: policy and duplicate-content audit for static site trees
//!
//! Walks a directory of HTML/JS/CSS files and reports:
//! - disallowed adult and piracy keywords
//! - links to executables or bare IP hosts
//! - images without alt text or served from stock-photo hosts
//! - long base64 runs that may hide payloads
//! - exact and near-duplicate pages
//!
//! No DOM parsing and no network access: markup is handled by a lenient
//! scanner that never rejects input.

pub mod config;
pub mod content;
pub mod dedup;
pub mod policy;
pub mod report;
pub mod scan;
pub mod types;
pub mod util;
pub mod walker;

pub use config::Config;
pub use report::ScanReport;
pub use scan::{ScanContext, Scanner};
pub use types::*;
pub use walker::ScanError;
