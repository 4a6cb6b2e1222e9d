//! Content repository - loads posts from the content directory

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, Post};
use crate::error::{Error, Result};

/// Reads post source files from a single directory
pub struct ContentRepository {
    root: PathBuf,
    include_drafts: bool,
}

impl ContentRepository {
    /// Create a repository over `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            include_drafts: false,
        }
    }

    /// Keep posts marked `draft: true`
    pub fn include_drafts(mut self, include: bool) -> Self {
        self.include_drafts = include;
        self
    }

    /// Load every post, in filename order.
    ///
    /// The first malformed file aborts the whole listing.
    pub fn list_posts(&self) -> Result<Vec<Post>> {
        if !self.root.exists() {
            tracing::warn!("Content directory {:?} does not exist", self.root);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(self.root.as_path()).to_path_buf();
                Error::io(path, e.into())
            })?;
            let path = entry.path();

            if !entry.file_type().is_file() || is_hidden(path) || !is_markdown_file(path) {
                continue;
            }

            let post = self.load_post(path)?;
            if post.frontmatter.draft && !self.include_drafts {
                tracing::debug!("Skipping draft {:?}", path);
                continue;
            }
            posts.push(post);
        }

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), self.root);
        Ok(posts)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let (frontmatter, body) = FrontMatter::parse(&content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // The slug is the filename, not the title
        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        Ok(Post::new(
            slug,
            frontmatter,
            body.to_string(),
            path.to_path_buf(),
        ))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
