//! URL resolution utilities.
//!
//! [§ 4.2.3 The base element](https://html.spec.whatwg.org/multipage/semantics.html#the-base-element)
//! [URL Standard](https://url.spec.whatwg.org/)

/// Schemes that are passed through untouched by [`resolve_url`].
const ABSOLUTE_PREFIXES: &[&str] = &["http://", "https://", "file:", "data:"];

/// Whether `href` already carries one of the schemes the engine understands.
#[must_use]
pub fn is_absolute(href: &str) -> bool {
    ABSOLUTE_PREFIXES
        .iter()
        .any(|prefix| href.starts_with(prefix))
}

/// Whether `url` should be fetched over the network.
#[must_use]
pub fn is_network(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// [§ 2.5 URLs](https://html.spec.whatwg.org/multipage/urls-and-fetching.html#resolving-urls)
///
/// Resolve a potentially relative URL against a base URL.
///
/// STEP 1: "If url is an absolute URL, return url."
///
/// STEP 2: "Otherwise, resolve url relative to base."
///
/// NOTE: This is a simplified implementation. `.` and `..` segments, queries
/// and fragments are carried through verbatim.
#[must_use]
pub fn resolve_url(href: &str, base_url: Option<&str>) -> String {
    // STEP 1: Absolute references pass through.
    if is_absolute(href) {
        return href.to_string();
    }

    // STEP 2: Resolve relative URL against base.
    let Some(base) = base_url.filter(|b| !b.is_empty()) else {
        return href.to_string();
    };

    if let Some(rest) = href.strip_prefix("//") {
        // Protocol-relative URL - reuse the scheme of the base
        let scheme = base.split_once("://").map_or("http", |(scheme, _)| scheme);
        format!("{scheme}://{rest}")
    } else if href.starts_with('/') {
        // Absolute path - join with origin
        base.find("://").map_or_else(
            || href.to_string(),
            |scheme_end| {
                let after_scheme = &base[scheme_end + 3..];
                after_scheme.find('/').map_or_else(
                    // No path in base, just append
                    || format!("{base}{href}"),
                    |path_start| {
                        let origin = &base[..scheme_end + 3 + path_start];
                        format!("{origin}{href}")
                    },
                )
            },
        )
    } else if href.starts_with('#') || href.starts_with('?') {
        let trimmed = base
            .split_once(href.chars().next().unwrap_or('#'))
            .map_or(base, |(before, _)| before);
        format!("{trimmed}{href}")
    } else {
        // Relative path - join with base directory
        let base_dir = base.rsplit_once('/').map_or(base, |(dir, _)| dir);
        format!("{base_dir}/{href}")
    }
}

/// Strip a leading `file://` so the remainder can be handed to the filesystem.
#[must_use]
pub fn to_local_path(url: &str) -> &str {
    url.strip_prefix("file://")
        .or_else(|| url.strip_prefix("file:"))
        .unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_urls_pass_through() {
        let base = Some("https://example.com/dir/page.html");
        assert_eq!(resolve_url("http://a.org/x.png", base), "http://a.org/x.png");
        assert_eq!(resolve_url("data:image/png;base64,AA", base), "data:image/png;base64,AA");
        assert_eq!(resolve_url("file:///tmp/a.png", base), "file:///tmp/a.png");
    }

    #[test]
    fn test_relative_path_joins_base_directory() {
        let base = Some("https://example.com/dir/page.html");
        assert_eq!(resolve_url("img/a.png", base), "https://example.com/dir/img/a.png");
    }

    #[test]
    fn test_root_relative_path_uses_origin() {
        let base = Some("https://example.com/dir/page.html");
        assert_eq!(resolve_url("/a.png", base), "https://example.com/a.png");
        assert_eq!(
            resolve_url("/a.png", Some("https://example.com")),
            "https://example.com/a.png"
        );
    }

    #[test]
    fn test_protocol_relative_reuses_scheme() {
        let base = Some("https://example.com/");
        assert_eq!(resolve_url("//cdn.org/a.png", base), "https://cdn.org/a.png");
    }

    #[test]
    fn test_fragment_replaces_fragment() {
        let base = Some("https://example.com/page.html#top");
        assert_eq!(resolve_url("#end", base), "https://example.com/page.html#end");
    }

    #[test]
    fn test_missing_base_returns_href() {
        assert_eq!(resolve_url("a.png", None), "a.png");
        assert_eq!(resolve_url("a.png", Some("")), "a.png");
    }

    #[test]
    fn test_local_path_strips_file_scheme() {
        assert_eq!(to_local_path("file:///tmp/a.png"), "/tmp/a.png");
        assert_eq!(to_local_path("/tmp/a.png"), "/tmp/a.png");
    }
}
