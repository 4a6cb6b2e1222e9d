//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Bytes escaped inside a single path segment; RFC 3986 unreserved ones pass
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Site-relative URL for a path
///
/// # Examples
/// ```ignore
/// url_for("css/style.css") // -> "/css/style.css"
/// ```
pub fn url_for(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

/// Absolute URL including the site's base URL
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/about/") // -> "https://example.com/about/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    join_base(&config.url, path)
}

/// Percent-encode one path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Site-relative path of a post page
pub fn post_path(slug: &str) -> String {
    format!("/posts/{}", encode_segment(slug))
}

/// Absolute link of a post: base + "/posts/" + slug
pub fn post_link(base: &str, slug: &str) -> String {
    join_base(base, &post_path(slug))
}

fn join_base(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), url_for(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for() {
        assert_eq!(url_for("css/style.css"), "/css/style.css");
        assert_eq!(url_for("/rss.xml"), "/rss.xml");
        assert_eq!(url_for(""), "/");
    }

    #[test]
    fn test_full_url_for() {
        let config = SiteConfig {
            url: "https://example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(full_url_for(&config, "/about/"), "https://example.com/about/");
    }

    #[test]
    fn test_post_link() {
        assert_eq!(
            post_link("https://example.com", "hello-world"),
            "https://example.com/posts/hello-world"
        );
        assert_eq!(
            post_link("https://example.com/", "hello-world"),
            "https://example.com/posts/hello-world"
        );
    }

    #[test]
    fn test_post_link_encodes_slug() {
        assert_eq!(
            post_link("https://x.com", "hello world"),
            "https://x.com/posts/hello%20world"
        );
        assert_eq!(post_path("a&b?c#d"), "/posts/a%26b%3Fc%23d");
        assert_eq!(post_path("café"), "/posts/caf%C3%A9");
        assert_eq!(post_path("v1.2_final~x"), "/posts/v1.2_final~x");
    }
}
