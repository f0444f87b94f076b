//! Host and path helpers for link rules

/// Path part of a link target: everything after `scheme://authority` for
/// absolute URLs, the whole target otherwise.
pub fn path_component(target: &str) -> &str {
    match target.find("://") {
        Some(idx) => {
            let rest = &target[idx + 3..];
            match rest.find('/') {
                Some(slash) => &rest[slash..],
                None => "",
            }
        }
        None => target,
    }
}

/// Four dot-separated decimal groups, e.g. `203.0.113.5`.
///
/// Group values are not range-checked: `999.1.1.1` is still an address
/// literal rather than a domain name.
pub fn is_numeric_ipv4(host: &str) -> bool {
    let groups: Vec<&str> = host.split('.').collect();
    groups.len() == 4
        && groups
            .iter()
            .all(|g| !g.is_empty() && g.len() <= 3 && g.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_component() {
        assert_eq!(path_component("http://203.0.113.5/app.exe"), "/app.exe");
        assert_eq!(path_component("https://example.com"), "");
        assert_eq!(path_component("/downloads/setup.msi"), "/downloads/setup.msi");
        assert_eq!(path_component("files/a.apk"), "files/a.apk");
    }

    #[test]
    fn test_numeric_ipv4() {
        assert!(is_numeric_ipv4("203.0.113.5"));
        assert!(is_numeric_ipv4("999.1.1.1"));
        assert!(!is_numeric_ipv4("example.com"));
        assert!(!is_numeric_ipv4("1.2.3"));
        assert!(!is_numeric_ipv4("1.2.3.4.5"));
        assert!(!is_numeric_ipv4("1.2.3.a"));
        assert!(!is_numeric_ipv4("1..2.3"));
    }
}
