//! Policy classification
//!
//! Applies the keyword, link, image and obfuscation rules to one document at
//! a time. Rules are independent and never fail; several may fire on the
//! same document or even the same link.

mod hosts;

pub use hosts::{is_numeric_ipv4, path_component};

use crate::config::RulesConfig;
use crate::scan::ScanContext;
use crate::types::{Document, Finding, FindingCategory};
use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

/// Maximal base64-alphabet runs with up to two padding characters. The
/// minimum length is checked on the match so any configured value works.
static RE_BASE64_RUN: OnceLock<Regex> = OnceLock::new();

/// Per-document policy classifier
pub struct PolicyClassifier {
    adult_keywords: Vec<String>,
    copyright_keywords: Vec<String>,
    executable_extensions: Vec<String>,
    stock_image_hosts: Vec<String>,
    min_base64_run: usize,
}

impl PolicyClassifier {
    /// Create a classifier from rule configuration
    pub fn new(rules: &RulesConfig) -> Self {
        let lower = |list: &[String]| -> Vec<String> {
            list.iter().map(|s| s.to_lowercase()).collect()
        };

        Self {
            adult_keywords: lower(&rules.adult_keywords),
            copyright_keywords: lower(&rules.copyright_keywords),
            executable_extensions: lower(&rules.executable_extensions),
            stock_image_hosts: lower(&rules.stock_image_hosts),
            min_base64_run: rules.min_base64_run.max(1),
        }
    }

    /// Classify one document, appending findings and host counts to `ctx`
    pub fn classify(&self, doc: &Document, ctx: &mut ScanContext) {
        let before = ctx.findings.len();

        self.check_keywords(doc, &self.adult_keywords, FindingCategory::AdultKeyword, ctx);
        self.check_keywords(
            doc,
            &self.copyright_keywords,
            FindingCategory::CopyrightKeyword,
            ctx,
        );

        for link in &doc.links {
            self.check_target(doc, &link.target_url, link.host.as_deref(), ctx);
            if link.is_external {
                if let Some(host) = &link.host {
                    ctx.record_host(host);
                }
            }
        }

        for image in &doc.images {
            if !image.source_url.is_empty() {
                self.check_target(doc, &image.source_url, image.host.as_deref(), ctx);
            }
            if let Some(host) = &image.host {
                ctx.record_host(host);
                if self.stock_image_hosts.iter().any(|s| host.contains(s.as_str())) {
                    ctx.push(Finding::new(
                        FindingCategory::StockImageHost,
                        &doc.path,
                        format!("{} ({})", image.source_url, host),
                    ));
                }
            }
            if !image.has_alt {
                let detail = if image.source_url.is_empty() {
                    "<img> without src".to_string()
                } else {
                    image.source_url.clone()
                };
                ctx.push(Finding::new(FindingCategory::MissingAlt, &doc.path, detail));
            }
        }

        let re_run =
            RE_BASE64_RUN.get_or_init(|| Regex::new(r"[A-Za-z0-9+/]+={0,2}").unwrap());
        for run in re_run.find_iter(&doc.normalized_text) {
            if run.as_str().trim_end_matches('=').len() < self.min_base64_run {
                continue;
            }
            ctx.push(Finding::new(
                FindingCategory::ObfuscatedString,
                &doc.path,
                run.as_str(),
            ));
        }

        ctx.documents += 1;
        trace!(
            path = %doc.path,
            findings = ctx.findings.len() - before,
            "classified document"
        );
    }

    /// One finding per occurrence of each phrase
    fn check_keywords(
        &self,
        doc: &Document,
        keywords: &[String],
        category: FindingCategory,
        ctx: &mut ScanContext,
    ) {
        for keyword in keywords {
            let hits = doc.normalized_text.matches(keyword.as_str()).count();
            for _ in 0..hits {
                ctx.push(Finding::new(category, &doc.path, keyword.as_str()));
            }
        }
    }

    /// Executable-extension and numeric-IP checks for a link or image source.
    /// The two checks report separately.
    fn check_target(&self, doc: &Document, target: &str, host: Option<&str>, ctx: &mut ScanContext) {
        let path = path_component(target).to_ascii_lowercase();
        if let Some(ext) = self
            .executable_extensions
            .iter()
            .find(|ext| path.ends_with(ext.as_str()))
        {
            ctx.push(Finding::new(
                FindingCategory::SuspiciousLink,
                &doc.path,
                format!("{} (executable {})", target, ext),
            ));
        }

        if let Some(host) = host {
            if is_numeric_ipv4(host) {
                ctx.push(Finding::new(
                    FindingCategory::SuspiciousLink,
                    &doc.path,
                    format!("{} (numeric host {})", target, host),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(path: &str, html: &str) -> ScanContext {
        let classifier = PolicyClassifier::new(&RulesConfig::default());
        let mut ctx = ScanContext::default();
        classifier.classify(&Document::new(path, html), &mut ctx);
        ctx
    }

    fn of(ctx: &ScanContext, category: FindingCategory) -> Vec<&Finding> {
        ctx.findings.iter().filter(|f| f.category == category).collect()
    }

    #[test]
    fn test_stock_image_without_alt_yields_two_findings() {
        let ctx = classify("gallery.html", r#"<img src="https://images.unsplash.com/x.jpg">"#);
        assert_eq!(ctx.findings.len(), 2, "{:?}", ctx.findings);
        assert_eq!(of(&ctx, FindingCategory::StockImageHost).len(), 1);
        assert_eq!(of(&ctx, FindingCategory::MissingAlt).len(), 1);
        assert!(ctx.findings.iter().all(|f| f.location == "gallery.html"));
        assert_eq!(ctx.hosts.get("images.unsplash.com"), Some(&1));
    }

    #[test]
    fn test_keyword_counted_per_occurrence() {
        let once = classify("a.html", "<p>Get the crack here</p>");
        assert_eq!(of(&once, FindingCategory::CopyrightKeyword).len(), 1);

        let twice = classify("b.html", "<p>crack</p><p>another CRACK</p>");
        let hits = of(&twice, FindingCategory::CopyrightKeyword);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|f| f.detail == "crack"));
    }

    #[test]
    fn test_keywords_ignore_script_content() {
        let ctx = classify("a.html", "<script>var torrent = 1;</script><p>clean page</p>");
        assert!(of(&ctx, FindingCategory::CopyrightKeyword).is_empty());
    }

    #[test]
    fn test_executable_on_ip_host_reports_twice() {
        let ctx = classify("dl.html", r#"<a href="http://203.0.113.5/app.exe">get</a>"#);
        let suspicious = of(&ctx, FindingCategory::SuspiciousLink);
        assert_eq!(suspicious.len(), 2, "{:?}", suspicious);
        assert_ne!(suspicious[0].detail, suspicious[1].detail);
        assert!(suspicious.iter().any(|f| f.detail.contains("executable .exe")));
        assert!(suspicious.iter().any(|f| f.detail.contains("numeric host 203.0.113.5")));
        assert_eq!(ctx.hosts.get("203.0.113.5"), Some(&1));
    }

    #[test]
    fn test_relative_executable_link() {
        let ctx = classify("a.html", r#"<a href="/files/Setup.MSI?v=2">setup</a>"#);
        assert_eq!(of(&ctx, FindingCategory::SuspiciousLink).len(), 1);
    }

    #[test]
    fn test_exe_in_domain_is_not_suspicious() {
        let ctx = classify("a.html", r#"<a href="https://download.exe">x</a>"#);
        assert!(of(&ctx, FindingCategory::SuspiciousLink).is_empty());
    }

    #[test]
    fn test_image_with_alt_and_local_source() {
        let ctx = classify("a.html", r#"<img src="/img/logo.png" alt="Logo">"#);
        assert!(ctx.findings.is_empty());
        assert!(ctx.hosts.is_empty());
    }

    #[test]
    fn test_obfuscated_run_detected_and_stored_in_full() {
        let payload = "QUJD".repeat(40); // 160 chars
        let ctx = classify("a.js", &format!("var x = \"{}==\";", payload));
        let hits = of(&ctx, FindingCategory::ObfuscatedString);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].detail, format!("{}==", payload.to_lowercase()));
    }

    #[test]
    fn test_short_base64_run_ignored() {
        let ctx = classify("a.js", &"ab12".repeat(29)); // 116 chars
        assert!(of(&ctx, FindingCategory::ObfuscatedString).is_empty());
    }

    #[test]
    fn test_min_base64_run_is_honoured() {
        let classify_with = |min: usize, text: &str| {
            let rules = RulesConfig {
                min_base64_run: min,
                ..RulesConfig::default()
            };
            let mut ctx = ScanContext::default();
            PolicyClassifier::new(&rules).classify(&Document::new("a.js", text), &mut ctx);
            ctx.findings.len()
        };
        let run_160 = "qujd".repeat(40);
        let run_140 = "qujd".repeat(35);
        let both = format!("{} {}", run_160, run_140);

        assert_eq!(classify_with(150, &both), 1);
        assert_eq!(classify_with(140, &both), 2);
        assert_eq!(classify_with(160, &run_160), 1);
        assert_eq!(classify_with(161, &run_160), 0);
        assert_eq!(classify_with(200_000, &run_160), 0);
    }

    #[test]
    fn test_padding_not_counted_towards_run_length() {
        let rules = RulesConfig {
            min_base64_run: 10,
            ..RulesConfig::default()
        };
        let mut ctx = ScanContext::default();
        let doc = Document::new("a.js", "abcdefghi== abcdefghij==");
        PolicyClassifier::new(&rules).classify(&doc, &mut ctx);
        let hits = of(&ctx, FindingCategory::ObfuscatedString);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].detail, "abcdefghij==");
    }

    #[test]
    fn test_external_hosts_tallied() {
        let ctx = classify(
            "a.html",
            r#"<script src="https://cdn.example.com/a.js"></script>
               <link href="https://cdn.example.com/a.css">
               <a href="mailto:x@example.com">mail</a>
               <a href="/local.html">local</a>"#,
        );
        assert_eq!(ctx.hosts.get("cdn.example.com"), Some(&2));
        assert_eq!(ctx.hosts.len(), 1);
        assert!(ctx.findings.is_empty());
    }
}
