//! RSS 2.0 feed generation

use chrono::{DateTime, FixedOffset};
use std::fs;
use std::path::Path;

use crate::config::SiteMetadata;
use crate::content::Post;
use crate::error::{Error, Result};
use crate::helpers::{date_rfc2822, post_link};

/// One `<item>` of the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: DateTime<FixedOffset>,
}

/// A complete feed: channel metadata plus items, newest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub channel: SiteMetadata,
    pub items: Vec<FeedItem>,
}

impl FeedDocument {
    /// Serialize to RSS 2.0 XML
    pub fn to_xml(&self) -> String {
        let channel = &self.channel;

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom" xmlns:dc="http://purl.org/dc/elements/1.1/">"#);
        feed.push('\n');
        feed.push_str("  <channel>\n");
        feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&channel.title)));
        feed.push_str(&format!("    <link>{}</link>\n", escape_xml(&channel.link)));
        feed.push_str(&format!(
            "    <description>{}</description>\n",
            escape_xml(&channel.description)
        ));
        if !channel.language.is_empty() {
            feed.push_str(&format!(
                "    <language>{}</language>\n",
                escape_xml(&channel.language)
            ));
        }
        feed.push_str(&format!(
            "    <dc:creator>{}</dc:creator>\n",
            escape_xml(&channel.author)
        ));
        feed.push_str(&format!(
            "    <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>\n",
            escape_xml(&channel.feed_link)
        ));
        feed.push_str("    <generator>folio</generator>\n");

        // Newest item date instead of the wall clock keeps rebuilds byte-identical
        if let Some(newest) = self.items.iter().map(|i| i.pub_date).max() {
            feed.push_str(&format!(
                "    <lastBuildDate>{}</lastBuildDate>\n",
                date_rfc2822(&newest)
            ));
        }

        for item in &self.items {
            feed.push_str("    <item>\n");
            feed.push_str(&format!("      <title>{}</title>\n", escape_xml(&item.title)));
            feed.push_str(&format!("      <link>{}</link>\n", escape_xml(&item.link)));
            feed.push_str(&format!(
                "      <guid isPermaLink=\"true\">{}</guid>\n",
                escape_xml(&item.link)
            ));
            feed.push_str(&format!(
                "      <description>{}</description>\n",
                escape_xml(&item.description)
            ));
            feed.push_str(&format!(
                "      <pubDate>{}</pubDate>\n",
                date_rfc2822(&item.pub_date)
            ));
            feed.push_str("    </item>\n");
        }

        feed.push_str("  </channel>\n");
        feed.push_str("</rss>\n");
        feed
    }
}

/// Builds and writes the site feed
#[derive(Debug, Clone, Default)]
pub struct FeedGenerator {
    limit: Option<usize>,
}

impl FeedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` items; `None` keeps all
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Map posts (already sorted newest first) to feed items
    pub fn generate(&self, site: &SiteMetadata, posts: &[Post]) -> FeedDocument {
        let take = self.limit.unwrap_or(posts.len());
        let items = posts
            .iter()
            .take(take)
            .map(|post| FeedItem {
                title: post.title().to_string(),
                link: post_link(&site.link, &post.slug),
                description: post.description().to_string(),
                pub_date: post.date(),
            })
            .collect();

        FeedDocument {
            channel: site.clone(),
            items,
        }
    }

    /// Overwrite `path` with the serialized document.
    ///
    /// Writes a sibling temp file first and renames it into place.
    pub fn write(&self, path: &Path, document: &FeedDocument) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "feed.xml".to_string());
        let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

        fs::write(&tmp_path, document.to_xml()).map_err(|e| Error::io(&tmp_path, e))?;
        fs::rename(&tmp_path, path).map_err(|e| Error::io(path, e))?;

        tracing::info!("Generated {} ({} items)", file_name, document.items.len());
        Ok(())
    }
}

/// Escape XML special characters and drop characters XML 1.0 forbids
fn escape_xml(s: &str) -> String {
    strip_invalid_xml_chars(s)
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Strip invalid XML control characters (except tab, newline, carriage return)
/// XML 1.0 only allows: #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}
