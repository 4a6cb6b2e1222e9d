//! folio: a small static blog generator
//!
//! Posts are markdown files with a metadata header. A build reads them,
//! sorts them newest first and writes the home page, one page per post
//! and an RSS feed.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

/// Name of the configuration file at the site root
pub const CONFIG_FILE: &str = "site.yml";

/// A site on disk
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Post sources
    pub content_dir: PathBuf,
    /// Files copied verbatim into the output
    pub static_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Open the site rooted at `base_dir`; a missing `site.yml` means defaults
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            static_dir,
            public_dir,
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE)
    }

    /// Where the RSS feed is written
    pub fn feed_path(&self) -> PathBuf {
        self.public_dir
            .join(self.config.feed.path.trim_start_matches('/'))
    }

    /// Content repository for this site's posts
    pub fn repository(&self) -> content::ContentRepository {
        content::ContentRepository::new(&self.content_dir)
            .include_drafts(self.config.render_drafts)
    }

    /// Scan, parse and sort every post
    pub fn load_index(&self) -> Result<content::PostIndex> {
        let posts = self.repository().list_posts()?;
        content::PostIndex::build(posts)
    }

    /// Generate the static site
    pub fn generate(&self) -> anyhow::Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> anyhow::Result<()> {
        commands::clean::run(self)
    }
}
