//! Post model

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::path::PathBuf;

use super::FrontMatter;
use crate::helpers::post_path;

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// URL-friendly name, the file stem
    pub slug: String,

    /// Validated metadata block
    pub frontmatter: FrontMatter,

    /// Raw markdown body
    pub body: String,

    /// Source file path
    pub source: PathBuf,
}

impl Post {
    pub fn new(slug: String, frontmatter: FrontMatter, body: String, source: PathBuf) -> Self {
        Self {
            slug,
            frontmatter,
            body,
            source,
        }
    }

    pub fn title(&self) -> &str {
        &self.frontmatter.title
    }

    pub fn description(&self) -> &str {
        &self.frontmatter.description
    }

    /// Publication instant
    pub fn date(&self) -> DateTime<FixedOffset> {
        self.frontmatter.published
    }

    /// Site-relative URL of the post page
    pub fn path(&self) -> String {
        post_path(&self.slug)
    }

    /// The shape the home page receives for each post
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            frontmatter: self.frontmatter.clone(),
            slug: self.slug.clone(),
        }
    }
}

/// Home page listing entry: `{ frontmatter: {title, description, date}, slug }`
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub frontmatter: FrontMatter,
    pub slug: String,
}

/// Build-time props of the home page
#[derive(Debug, Clone, Serialize)]
pub struct HomeProps {
    pub posts: Vec<PostSummary>,
}
