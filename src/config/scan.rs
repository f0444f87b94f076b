//! File selection and policy rule configuration

use serde::{Deserialize, Serialize};

/// Which files under the root are scanned
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions to scan, without the leading dot
    pub extensions: Vec<String>,
    /// Directory names never descended into (exact path segment match)
    pub exclude_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec![
                "html".to_string(),
                "htm".to_string(),
                "js".to_string(),
                "css".to_string(),
            ],
            exclude_dirs: vec![
                ".history".to_string(),
                "dist".to_string(),
                ".venv".to_string(),
                "node_modules".to_string(),
                ".git".to_string(),
            ],
        }
    }
}

/// Policy rule sets applied to every document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Adult-content phrases (lowercase, substring match on normalized text)
    pub adult_keywords: Vec<String>,
    /// Copyright/piracy phrases (lowercase, substring match on normalized text)
    pub copyright_keywords: Vec<String>,
    /// Link path suffixes treated as executable downloads
    pub executable_extensions: Vec<String>,
    /// Stock-photography domains matched by substring against image hosts
    pub stock_image_hosts: Vec<String>,
    /// Minimum run of base64-alphabet characters reported as obfuscated
    pub min_base64_run: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            adult_keywords: ["porn", "xxx", "adult", "sex", "erotic", "nude", "nsfw"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            copyright_keywords: [
                "download full",
                "full game",
                "crack",
                "torrent",
                "warez",
                "copyright",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            executable_extensions: vec![".exe".to_string(), ".msi".to_string(), ".apk".to_string()],
            stock_image_hosts: [
                "unsplash.com",
                "pexels.com",
                "pixabay.com",
                "shutterstock.com",
                "istockphoto.com",
                "gettyimages.com",
                "stock.adobe.com",
                "depositphotos.com",
                "dreamstime.com",
                "123rf.com",
                "freepik.com",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            min_base64_run: 120,
        }
    }
}
