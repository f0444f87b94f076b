//! Candidate file enumeration
//!
//! Walks the scan root in a stable (file-name sorted) order, skipping
//! excluded directories before descending into them.

use crate::config::ScanConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Errors that abort a scan before any classification
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan root does not exist or is not a directory: {0}")]
    RootNotFound(PathBuf),
    #[error("failed to walk scan root: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A file selected for scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the root, `/`-separated
    pub display_path: String,
    pub path: PathBuf,
}

/// Enumerate files under `root` whose extension is configured for scanning
pub fn collect_files(root: &Path, config: &ScanConfig) -> Result<Vec<SourceFile>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }

    let extensions: Vec<String> = config
        .extensions
        .iter()
        .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
        .collect();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded(e, &config.exclude_dirs));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !has_extension(entry.path(), &extensions) {
            continue;
        }
        files.push(SourceFile {
            display_path: display_path(root, entry.path()),
            path: entry.into_path(),
        });
    }

    tracing::debug!("Found {} candidate files under {}", files.len(), root.display());
    Ok(files)
}

fn is_excluded(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| exclude_dirs.iter().any(|d| d == name))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| extensions.contains(&e))
}

fn display_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
