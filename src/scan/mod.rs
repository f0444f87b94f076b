//! Scan orchestration
//!
//! Stage 1 (per document, parallel): decode, normalize, extract, classify.
//! Each rayon worker folds into its own [`ScanContext`]; partial contexts
//! are reduced with [`ScanContext::merge`].
//!
//! Stage 2 (whole corpus, after the barrier): exact fingerprint grouping and
//! pairwise near-duplicate matching over the complete document set.

mod context;

pub use context::ScanContext;

use crate::config::Config;
use crate::content::{extract_from_bytes, extract_from_path, ContentError};
use crate::dedup::{FingerprintIndex, NearDuplicateMatcher};
use crate::policy::PolicyClassifier;
use crate::report::ScanReport;
use crate::types::Document;
use crate::walker::{collect_files, ScanError};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs one scan session. Holds no state between scans.
pub struct Scanner {
    config: Config,
    classifier: PolicyClassifier,
    matcher: NearDuplicateMatcher,
}

impl Scanner {
    pub fn new(config: Config) -> Self {
        let classifier = PolicyClassifier::new(&config.rules);
        let matcher = NearDuplicateMatcher::new(&config.dedup);
        Self {
            config,
            classifier,
            matcher,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan every configured file under `root`.
    ///
    /// A missing root or a failure while walking aborts the scan. Files that
    /// cannot be read or decoded are skipped and counted.
    pub fn scan_dir(&self, root: &Path) -> Result<ScanReport, ScanError> {
        let started = Instant::now();
        let files = collect_files(root, &self.config.scan)?;
        info!("Scanning {} files under {}", files.len(), root.display());

        let loaded: Vec<Result<Document, ContentError>> = files
            .par_iter()
            .map(|f| extract_from_path(&f.display_path, &f.path))
            .collect();
        let documents = keep_readable(loaded);
        let skipped = files.len() - documents.len();

        let report = self.scan_documents(documents, skipped);
        info!(
            files = report.files_scanned,
            skipped = report.files_skipped,
            findings = report.total_findings(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Scan complete"
        );
        Ok(report)
    }

    /// Scan in-memory sources given as `(path, raw bytes)` pairs
    pub fn scan_sources<I, P>(&self, sources: I) -> ScanReport
    where
        I: IntoIterator<Item = (P, Vec<u8>)>,
        P: AsRef<str>,
    {
        let loaded: Vec<Result<Document, ContentError>> = sources
            .into_iter()
            .map(|(path, bytes)| extract_from_bytes(path.as_ref(), &bytes))
            .collect();
        let total = loaded.len();
        let documents = keep_readable(loaded);
        let skipped = total - documents.len();
        self.scan_documents(documents, skipped)
    }

    /// Classify and deduplicate an already-built corpus
    pub fn scan_documents(&self, documents: Vec<Document>, skipped: usize) -> ScanReport {
        let context = documents
            .par_iter()
            .fold(ScanContext::default, |mut ctx, doc| {
                self.classifier.classify(doc, &mut ctx);
                ctx
            })
            .reduce(ScanContext::default, ScanContext::merge);
        debug!(
            documents = context.documents,
            findings = context.findings.len(),
            hosts = context.hosts.len(),
            "classification complete"
        );

        let exact = FingerprintIndex::build(&documents).duplicate_groups();
        let near = self.matcher.find_pairs(&documents);
        debug!(exact = exact.len(), near = near.len(), "duplicate detection complete");

        ScanReport::assemble(context, skipped, exact, near)
    }
}

fn keep_readable(loaded: Vec<Result<Document, ContentError>>) -> Vec<Document> {
    loaded
        .into_iter()
        .filter_map(|result| match result {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!("Skipping file: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FindingCategory;

    fn source(path: &str, body: &str) -> (String, Vec<u8>) {
        (path.to_string(), body.as_bytes().to_vec())
    }

    #[test]
    fn scan_sources_skips_undecodable_files() {
        let scanner = Scanner::new(Config::default());
        let report = scanner.scan_sources(vec![
            source("a.html", "<p>fine</p>"),
            ("bad.html".to_string(), vec![0xff, 0xfe, 0x00]),
        ]);
        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.files_skipped, 1);
    }

    #[test]
    fn exact_duplicates_never_reported_as_near() {
        let scanner = Scanner::new(Config::default());
        let report = scanner.scan_sources(vec![
            source("a.html", "<h1>Same Page</h1><p>body text here</p>"),
            source("b.html", "<div>same page body   text here</div>"),
            source("c.html", "<p>something else entirely</p>"),
        ]);
        assert_eq!(report.exact_duplicates.len(), 1);
        assert_eq!(report.exact_duplicates[0].members, vec!["a.html", "b.html"]);
        assert!(report.near_duplicates.iter().all(|g| {
            !(g.members.contains(&"a.html".to_string()) && g.members.contains(&"b.html".to_string()))
        }));
    }

    #[test]
    fn findings_and_duplicates_combined() {
        let scanner = Scanner::new(Config::default());
        let report = scanner.scan_sources(vec![
            source("a.html", "<p>play the dragon game now</p>"),
            source("b.html", "<p>play the dragon game today</p>"),
            source(
                "c.html",
                r#"<p>torrent</p><img src="https://www.pexels.com/p.jpg" alt="p">"#,
            ),
        ]);
        assert_eq!(report.files_scanned, 3);
        assert_eq!(report.count(FindingCategory::CopyrightKeyword), 1);
        assert_eq!(report.count(FindingCategory::StockImageHost), 1);
        assert_eq!(report.count(FindingCategory::MissingAlt), 0);
        assert_eq!(report.near_duplicates.len(), 1);
        assert!(report.exact_duplicates.is_empty());
        assert_eq!(report.hosts.get("www.pexels.com"), Some(&1));
    }

    #[test]
    fn scan_is_deterministic() {
        let scanner = Scanner::new(Config::default());
        let sources = || {
            (0..20).map(|i| {
                source(
                    &format!("p{:02}.html", i),
                    &format!("<p>page {} crack</p><a href='https://h{}.example.com/'>x</a>", i % 4, i % 3),
                )
            })
        };
        let first = scanner.scan_sources(sources());
        let second = scanner.scan_sources(sources());
        assert_eq!(first.findings, second.findings);
        assert_eq!(first.hosts, second.hosts);
        assert_eq!(first.exact_duplicates, second.exact_duplicates);
        assert_eq!(first.near_duplicates, second.near_duplicates);
        assert_eq!(first.count(FindingCategory::CopyrightKeyword), 20);
    }
}
