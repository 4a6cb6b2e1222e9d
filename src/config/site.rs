//! Site configuration (site.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::helpers::full_url_for;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: AuthorConfig,
    pub language: String,
    /// Link to the site's source code, shown in the footer
    pub source_repo: Option<String>,

    // URL
    /// Absolute base URL, e.g. `https://example.com`
    pub url: String,

    // Directory
    pub content_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    // Writing
    pub render_drafts: bool,
    pub date_format: String,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Feed
    #[serde(default)]
    pub feed: FeedConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: AuthorConfig::default(),
            language: "en".to_string(),
            source_repo: None,

            url: "http://example.com".to_string(),

            content_dir: "content/posts".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            render_drafts: false,
            date_format: "MMMM DD, YYYY".to_string(),
            highlight: HighlightConfig::default(),

            feed: FeedConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_yaml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Site-level metadata used for the feed channel
    pub fn metadata(&self) -> SiteMetadata {
        let base = self.url.trim_end_matches('/');
        SiteMetadata {
            title: self.title.clone(),
            description: self.description.clone(),
            author: self.author.name.clone(),
            link: base.to_string(),
            language: self.language.clone(),
            feed_link: full_url_for(self, &self.feed.path),
        }
    }
}

/// Site author
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    pub summary: String,
    pub email: Option<String>,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            summary: String::new(),
            email: None,
        }
    }
}

/// RSS feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Output path relative to the public directory
    pub path: String,
    /// Maximum number of items; all posts when unset
    pub limit: Option<usize>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            path: "rss.xml".to_string(),
            limit: None,
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Channel-level data of the syndication feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMetadata {
    pub title: String,
    pub description: String,
    pub author: String,
    /// Site base URL without a trailing slash
    pub link: String,
    pub language: String,
    pub feed_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content/posts");
        assert_eq!(config.feed.path, "rss.xml");
        assert_eq!(config.feed.limit, None);
        assert!(!config.render_drafts);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Ruben Profit
url: https://rubenprofit.com/
author:
  name: Ruben Profit
feed:
  limit: 5
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Ruben Profit");
        assert_eq!(config.author.name, "Ruben Profit");
        assert_eq!(config.feed.limit, Some(5));
        assert_eq!(config.feed.path, "rss.xml");
        assert_eq!(config.language, "en");
    }

    #[test]
    fn test_metadata_links() {
        let config = SiteConfig {
            url: "https://example.com/".to_string(),
            ..Default::default()
        };
        let meta = config.metadata();
        assert_eq!(meta.link, "https://example.com");
        assert_eq!(meta.feed_link, "https://example.com/rss.xml");
    }

    #[test]
    fn test_load_reports_bad_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.yml");
        fs::write(&path, "title: [unclosed").unwrap();
        let err = SiteConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
