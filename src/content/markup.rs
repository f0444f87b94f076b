//! Link and image extraction without a DOM
//!
//! A lenient tag scanner: every `<name ...>` occurrence is inspected for
//! link-bearing attributes. Attribute values may be double quoted, single
//! quoted or bare. Nothing here can fail; unparseable fragments are skipped.

use crate::types::{ImageReference, LinkReference};
use regex::Regex;
use std::sync::OnceLock;

static RE_TAG: OnceLock<Regex> = OnceLock::new();
static RE_ATTR: OnceLock<Regex> = OnceLock::new();

/// Schemes that mark a reference as pointing outside the site
const EXTERNAL_PREFIXES: &[&str] = &["http://", "https://", "mailto:"];

/// Attributes that carry link targets on non-image tags
const LINK_ATTRS: &[&str] = &["href", "src", "data-src"];

/// Extract links and images in order of first appearance, duplicates kept
pub fn extract_references(raw: &str) -> (Vec<LinkReference>, Vec<ImageReference>) {
    let re_tag = RE_TAG.get_or_init(|| {
        Regex::new(r"<([A-Za-z][A-Za-z0-9:-]*)((?:[^>])*)(?:>|\z)").unwrap()
    });

    let mut links = Vec::new();
    let mut images = Vec::new();

    for cap in re_tag.captures_iter(raw) {
        let name = cap[1].to_ascii_lowercase();
        let attrs = parse_attributes(cap.get(2).map_or("", |m| m.as_str()));

        if name == "img" {
            let source = attr_value(&attrs, "src").or_else(|| attr_value(&attrs, "data-src"));
            let source_url = source.map(strip_suffixes).unwrap_or_default();
            let host = host_of(&source_url);
            images.push(ImageReference {
                has_alt: attrs.iter().any(|(k, _)| k == "alt"),
                host,
                source_url,
            });
            continue;
        }

        for (key, value) in &attrs {
            if !LINK_ATTRS.contains(&key.as_str()) {
                continue;
            }
            if let Some(link) = parse_link(value) {
                links.push(link);
            }
        }
    }

    (links, images)
}

/// Turn an attribute value into a link reference; empty targets are dropped
pub fn parse_link(value: &str) -> Option<LinkReference> {
    let target_url = strip_suffixes(value);
    if target_url.is_empty() {
        return None;
    }
    Some(LinkReference {
        is_external: is_external(&target_url),
        host: host_of(&target_url),
        target_url,
    })
}

/// Drop `#fragment` and `?query` suffixes
pub fn strip_suffixes(value: &str) -> String {
    let value = value.trim();
    let end = value.find(['#', '?']).unwrap_or(value.len());
    value[..end].to_string()
}

pub fn is_external(target: &str) -> bool {
    let lower = target.to_ascii_lowercase();
    EXTERNAL_PREFIXES.iter().any(|p| lower.starts_with(p))
}

/// Lowercase host of an absolute http(s) target
pub fn host_of(target: &str) -> Option<String> {
    let lower = target.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return None;
    }

    if let Ok(url) = url::Url::parse(target) {
        if let Some(host) = url.host_str() {
            return Some(host.to_ascii_lowercase());
        }
    }

    // The url crate rejects some hosts a browser-tolerant scan still wants
    // to see (e.g. out-of-range dotted quads), so fall back to splitting.
    let rest = &lower[lower.find("://")? + 3..];
    let authority = rest.split('/').next().unwrap_or("");
    let authority = authority.rsplit('@').next().unwrap_or(authority);
    let host = match authority.rfind(':') {
        Some(idx) if !authority.ends_with(']') => &authority[..idx],
        _ => authority,
    };
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

fn parse_attributes(attrs: &str) -> Vec<(String, String)> {
    let re_attr = RE_ATTR.get_or_init(|| {
        Regex::new(
            r#"([A-Za-z_:][A-Za-z0-9_:.-]*)(?:\s*=\s*(?:"([^"]*)"?|'([^']*)'?|([^\s"'>]+)))?"#,
        )
        .unwrap()
    });

    re_attr
        .captures_iter(attrs)
        .map(|cap| {
            let key = cap[1].to_ascii_lowercase();
            let value = cap
                .get(2)
                .or_else(|| cap.get(3))
                .or_else(|| cap.get(4))
                .map_or("", |m| m.as_str());
            (key, value.to_string())
        })
        .collect()
}

fn attr_value<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_links_in_order_with_duplicates() {
        let html = r#"
            <a href="/about.html#team">About</a>
            <A HREF='https://cdn.example.com/lib.js?v=3'>cdn</A>
            <a href=/about.html>again</a>
            <script src="https://Analytics.Example.org:8443/t.js"></script>
        "#;
        let (links, images) = extract_references(html);
        assert!(images.is_empty());
        let targets: Vec<_> = links.iter().map(|l| l.target_url.as_str()).collect();
        assert_eq!(
            targets,
            vec![
                "/about.html",
                "https://cdn.example.com/lib.js",
                "/about.html",
                "https://Analytics.Example.org:8443/t.js",
            ]
        );
        assert!(!links[0].is_external);
        assert!(links[1].is_external);
        assert_eq!(links[1].host.as_deref(), Some("cdn.example.com"));
        assert_eq!(links[3].host.as_deref(), Some("analytics.example.org"));
    }

    #[test]
    fn test_mailto_is_external_without_host() {
        let (links, _) = extract_references(r#"<a href="mailto:me@example.com">mail</a>"#);
        assert_eq!(links.len(), 1);
        assert!(links[0].is_external);
        assert_eq!(links[0].host, None);
    }

    #[test]
    fn test_fragment_only_link_is_dropped() {
        let (links, _) = extract_references(r##"<a href="#top">top</a><a href="?q=1">q</a>"##);
        assert!(links.is_empty());
    }

    #[test]
    fn test_image_alt_detection() {
        let html = r#"
            <img src="https://images.unsplash.com/x.jpg">
            <img alt="" src="/local.png">
            <img data-src="/lazy.png" ALT="lazy">
            <img>
        "#;
        let (links, images) = extract_references(html);
        assert!(links.is_empty(), "image sources are not links");
        assert_eq!(images.len(), 4);

        assert_eq!(images[0].source_url, "https://images.unsplash.com/x.jpg");
        assert_eq!(images[0].host.as_deref(), Some("images.unsplash.com"));
        assert!(!images[0].has_alt);

        assert!(images[1].has_alt);
        assert_eq!(images[1].host, None);

        assert_eq!(images[2].source_url, "/lazy.png");
        assert!(images[2].has_alt);

        assert_eq!(images[3].source_url, "");
        assert!(!images[3].has_alt);
    }

    #[test]
    fn test_numeric_host_kept() {
        let (links, _) = extract_references(r#"<a href="http://203.0.113.5/app.exe">x</a>"#);
        assert_eq!(links[0].host.as_deref(), Some("203.0.113.5"));
    }

    #[test]
    fn test_host_fallback_for_unparseable_url() {
        assert_eq!(host_of("http://999.1.1.1/a").as_deref(), Some("999.1.1.1"));
        assert_eq!(host_of("https://user@Host.example:81/x").as_deref(), Some("host.example"));
        assert_eq!(host_of("/relative/path"), None);
    }

    #[test]
    fn test_malformed_markup_does_not_panic() {
        let (links, images) = extract_references(r#"<a href="unterminated <img src='x.png' <<>"#);
        assert!(links.len() <= 1);
        assert!(images.len() <= 1);
    }
}
