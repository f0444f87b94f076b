//! Core types for the sitescan system

use serde::{Deserialize, Serialize};
use std::fmt;

/// Path of a scanned file relative to the scan root, always `/`-separated
pub type DocumentPath = String;

// ============================================================================
// Documents
// ============================================================================

/// One scanned file: raw text, normalized text and the markup signals
/// pulled out of it. Built once per file and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: DocumentPath,
    pub raw_text: String,
    /// Lowercase, tag-free, whitespace-collapsed text used for comparison
    pub normalized_text: String,
    pub links: Vec<LinkReference>,
    pub images: Vec<ImageReference>,
}

impl Document {
    /// Build a document from its path and decoded text, running the
    /// normalizer and the markup extractor once.
    pub fn new(path: impl Into<DocumentPath>, raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let normalized_text = crate::content::normalize_text(&raw_text);
        let (links, images) = crate::content::extract_references(&raw_text);
        Self {
            path: path.into(),
            raw_text,
            normalized_text,
            links,
            images,
        }
    }

    /// Documents with no visible text take no part in duplicate detection
    pub fn has_text(&self) -> bool {
        !self.normalized_text.is_empty()
    }
}

/// A hyperlink or embedded resource reference (`href`, `src`, `data-src`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkReference {
    /// Attribute value with fragment and query removed
    pub target_url: String,
    /// Lowercase host for absolute http(s) targets
    pub host: Option<String>,
    pub is_external: bool,
}

/// An `<img>` occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    /// Empty when the tag carries no source attribute
    pub source_url: String,
    pub has_alt: bool,
    pub host: Option<String>,
}

// ============================================================================
// Findings
// ============================================================================

/// Policy rule that produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    AdultKeyword,
    CopyrightKeyword,
    SuspiciousLink,
    ObfuscatedString,
    MissingAlt,
    StockImageHost,
}

impl FindingCategory {
    /// All categories in report order
    pub const ALL: [FindingCategory; 6] = [
        FindingCategory::AdultKeyword,
        FindingCategory::CopyrightKeyword,
        FindingCategory::SuspiciousLink,
        FindingCategory::ObfuscatedString,
        FindingCategory::MissingAlt,
        FindingCategory::StockImageHost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdultKeyword => "adult_keyword",
            Self::CopyrightKeyword => "copyright_keyword",
            Self::SuspiciousLink => "suspicious_link",
            Self::ObfuscatedString => "obfuscated_string",
            Self::MissingAlt => "missing_alt",
            Self::StockImageHost => "stock_image_host",
        }
    }

    /// Section heading used by the text report
    pub fn title(&self) -> &'static str {
        match self {
            Self::AdultKeyword => "Adult-keyword hits",
            Self::CopyrightKeyword => "Copyright/Download-related hits",
            Self::SuspiciousLink => "Suspicious links (executable files or IP hosts)",
            Self::ObfuscatedString => "Potential obfuscated/base64 strings found",
            Self::MissingAlt => "Images missing alt text",
            Self::StockImageHost => "Images served from stock-photo hosts",
        }
    }
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule violation tied to one document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Finding {
    pub category: FindingCategory,
    pub location: DocumentPath,
    pub detail: String,
}

impl Finding {
    pub fn new(
        category: FindingCategory,
        location: impl Into<DocumentPath>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            category,
            location: location.into(),
            detail: detail.into(),
        }
    }
}

// ============================================================================
// Duplicate groups
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKind {
    Exact,
    Near,
}

/// Documents sharing identical or highly similar normalized text.
///
/// Exact groups may hold any number of members and always score 1.0.
/// Near groups are always a single pair scoring strictly above the
/// configured threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub kind: DuplicateKind,
    pub members: Vec<DocumentPath>,
    pub similarity: f64,
}

impl DuplicateGroup {
    pub fn exact(members: Vec<DocumentPath>) -> Self {
        Self {
            kind: DuplicateKind::Exact,
            members,
            similarity: 1.0,
        }
    }

    pub fn near(a: DocumentPath, b: DocumentPath, similarity: f64) -> Self {
        Self {
            kind: DuplicateKind::Near,
            members: vec![a, b],
            similarity,
        }
    }
}
