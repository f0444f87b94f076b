use anyhow::{Context, Result};
use sitescan::config::{Config, DEFAULT_CONFIG_FILE};
use std::path::PathBuf;

pub fn init_config(path: PathBuf) -> Result<()> {
    let config = Config::default();
    let config_path = path.join(DEFAULT_CONFIG_FILE);

    if config_path.exists() {
        anyhow::bail!("Configuration file already exists: {}", config_path.display());
    }

    let list = |items: &[String]| -> String {
        items
            .iter()
            .map(|s| format!("{:?}", s))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let toml_content = format!(
        r#"# sitescan configuration

[scan]
# File extensions to scan
extensions = [{}]
# Directory names that are never descended into
exclude_dirs = [{}]

[rules]
adult_keywords = [{}]
copyright_keywords = [{}]
executable_extensions = [{}]
stock_image_hosts = [{}]
# Shortest base64 run reported as an obfuscated string
min_base64_run = {}

[dedup]
# Pairs scoring strictly above this are near-duplicates
near_threshold = {}
# "shorter" (matched / shorter text) or "combined" (2 * matched / total)
similarity_basis = "shorter"
# Uncomment to skip pairs whose SimHashes differ by more than N bits
# simhash_prefilter = 12

[report]
max_examples = {}
top_hosts = {}
max_near_pairs = {}
preview_len = {}

[logging]
format = "text"
level = "info"
"#,
        list(&config.scan.extensions),
        list(&config.scan.exclude_dirs),
        list(&config.rules.adult_keywords),
        list(&config.rules.copyright_keywords),
        list(&config.rules.executable_extensions),
        list(&config.rules.stock_image_hosts),
        config.rules.min_base64_run,
        config.dedup.near_threshold,
        config.report.max_examples,
        config.report.top_hosts,
        config.report.max_near_pairs,
        config.report.preview_len,
    );

    std::fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    std::fs::write(&config_path, toml_content)?;
    println!("Created configuration file: {}", config_path.display());

    Ok(())
}
