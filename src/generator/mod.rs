//! Generator module - writes the site's pages, props and feed

mod feed;

pub use feed::{FeedDocument, FeedGenerator, FeedItem};

use anyhow::Result;
use chrono::Datelike;
use std::fs;
use std::path::Path;
use tera::Context;
use walkdir::WalkDir;

use crate::content::{MarkdownRenderer, PostIndex};
use crate::templates::{NavPost, PostPageData, SiteData, TemplateRenderer};
use crate::Site;

/// Static site generator using the embedded templates
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::with_options(&site.config.highlight),
        })
    }

    /// Generate the entire site from an index
    pub fn generate(&self, index: &PostIndex) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        self.copy_static_assets()?;

        let site_data = SiteData::new(&self.site.config, chrono::Local::now().year());

        self.generate_home_page(index, &site_data)?;
        self.generate_home_props(index)?;
        self.generate_post_pages(index, &site_data)?;
        self.generate_not_found_page(&site_data)?;
        self.generate_feed(index)?;

        Ok(())
    }

    fn create_base_context(&self, site_data: &SiteData, is_root: bool) -> Context {
        let mut context = Context::new();
        context.insert("site", site_data);
        context.insert("is_root", &is_root);
        context.insert("page_title", "");
        context.insert("page_description", &site_data.description);
        context
    }

    /// Home page listing every post
    fn generate_home_page(&self, index: &PostIndex, site_data: &SiteData) -> Result<()> {
        let mut context = self.create_base_context(site_data, true);
        context.insert("posts", &index.summaries());

        let html = self.renderer.render("index.html", &context)?;
        fs::write(self.site.public_dir.join("index.html"), html)?;
        tracing::info!("Generated index.html");
        Ok(())
    }

    /// The home page's build-time props as JSON
    fn generate_home_props(&self, index: &PostIndex) -> Result<()> {
        let json = serde_json::to_string_pretty(&index.home_props())?;
        fs::write(self.site.public_dir.join("posts.json"), json)?;
        tracing::debug!("Generated posts.json");
        Ok(())
    }

    fn generate_post_pages(&self, index: &PostIndex, site_data: &SiteData) -> Result<()> {
        // Pages of deleted or renamed posts must not outlive them
        let posts_dir = self.site.public_dir.join("posts");
        if posts_dir.exists() {
            fs::remove_dir_all(&posts_dir)?;
        }

        for post in index.sorted_posts() {
            let content = self.markdown.render(&post.body);
            let (newer, older) = index.neighbors(&post.slug);

            let mut context = self.create_base_context(site_data, false);
            context.insert("page_title", post.title());
            context.insert("page_description", post.description());
            context.insert("post", &PostPageData::new(post, content));
            context.insert("newer", &newer.map(NavPost::from));
            context.insert("older", &older.map(NavPost::from));

            let html = self.renderer.render("post.html", &context)?;

            let output_dir = posts_dir.join(&post.slug);
            fs::create_dir_all(&output_dir)?;
            fs::write(output_dir.join("index.html"), html)?;
        }

        tracing::info!("Generated {} post pages", index.len());
        Ok(())
    }

    fn generate_not_found_page(&self, site_data: &SiteData) -> Result<()> {
        let mut context = self.create_base_context(site_data, false);
        context.insert("page_title", "Not found");

        let html = self.renderer.render("404.html", &context)?;
        fs::write(self.site.public_dir.join("404.html"), html)?;
        Ok(())
    }

    fn generate_feed(&self, index: &PostIndex) -> Result<()> {
        let generator = FeedGenerator::new().with_limit(self.site.config.feed.limit);
        let document = generator.generate(&self.site.config.metadata(), index.sorted_posts());
        generator.write(&self.site.feed_path(), &document)?;
        Ok(())
    }

    /// Copy static assets (css, images, etc.) to public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            copy_file(path, &self.site.public_dir.join(relative))?;
            copied += 1;
        }

        tracing::debug!("Copied {} static files", copied);
        Ok(())
    }
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to)?;
    Ok(())
}
