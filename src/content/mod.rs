//! Content extraction module
//!
//! Turns the raw bytes of a scanned file into a [`Document`]: decoded text,
//! normalized comparison text, and the links and images found in the markup.

mod markup;
mod normalize;

pub use markup::{extract_references, host_of, is_external, parse_link, strip_suffixes};
pub use normalize::normalize_text;

use crate::types::Document;
use std::path::Path;
use thiserror::Error;

/// Errors while turning a file into a document
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid UTF-8: {source}")]
    Decode {
        path: String,
        #[source]
        source: std::str::Utf8Error,
    },
}

/// Build a document from raw bytes
///
/// Invalid UTF-8 is a decode error; callers skip such files rather than
/// guessing an encoding.
pub fn extract_from_bytes(path: &str, bytes: &[u8]) -> Result<Document, ContentError> {
    let text = std::str::from_utf8(bytes).map_err(|source| ContentError::Decode {
        path: path.to_string(),
        source,
    })?;
    Ok(Document::new(path, text))
}

/// Read and build a document from a local file
pub fn extract_from_path(display_path: &str, path: &Path) -> Result<Document, ContentError> {
    let bytes = std::fs::read(path).map_err(|source| ContentError::Read {
        path: display_path.to_string(),
        source,
    })?;
    extract_from_bytes(display_path, &bytes)
}
