//! Built-in site templates using the Tera template engine
//!
//! The layout, home page, post page and 404 page are embedded in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{format_date, parse_date, post_path, url_for};

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("post.html", include_str!("site/post.html")),
            ("404.html", include_str!("site/404.html")),
        ])?;

        tera.register_filter("date_format", date_format_filter);
        tera.register_filter("post_path", post_path_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: slug to the encoded page path
fn post_path_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let slug = tera::try_get_value!("post_path", "value", String, value);
    Ok(tera::Value::String(post_path(&slug)))
}

/// Tera filter: reformat a front-matter date string
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    match parse_date(&s) {
        Some(date) => Ok(tera::Value::String(format_date(&date, &format))),
        None => Ok(tera::Value::String(s)),
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub author_summary: String,
    pub language: String,
    pub source_repo: Option<String>,
    pub feed_url: String,
    pub date_format: String,
    pub year: i32,
}

impl SiteData {
    pub fn new(config: &SiteConfig, year: i32) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.name.clone(),
            author_summary: config.author.summary.clone(),
            language: config.language.clone(),
            source_repo: config.source_repo.clone(),
            feed_url: url_for(&config.feed.path),
            date_format: config.date_format.clone(),
            year,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    pub title: String,
    pub description: String,
    pub date: String,
    pub datetime: String,
    pub slug: String,
    pub content: String,
}

impl PostPageData {
    pub fn new(post: &Post, content: String) -> Self {
        Self {
            title: post.title().to_string(),
            description: post.description().to_string(),
            date: post.frontmatter.date.clone(),
            datetime: post.date().to_rfc3339(),
            slug: post.slug.clone(),
            content,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavPost {
    pub title: String,
    pub path: String,
}

impl From<&Post> for NavPost {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title().to_string(),
            path: post.path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostIndex;

    fn base_context(is_root: bool) -> Context {
        let config = SiteConfig {
            title: "Ruben <Profit>".to_string(),
            source_repo: Some("https://github.com/example/site".to_string()),
            ..Default::default()
        };
        let mut context = Context::new();
        context.insert("site", &SiteData::new(&config, 2024));
        context.insert("is_root", &is_root);
        context.insert("page_title", "");
        context.insert("page_description", &config.description);
        context
    }

    #[test]
    fn test_index_lists_posts_and_escapes() {
        let renderer = TemplateRenderer::new().unwrap();
        let (fm, _) = crate::content::FrontMatter::parse(
            "---\ntitle: A & B\ndescription: D\ndate: 2023-01-01\n---\n",
        )
        .unwrap();
        let post = Post::new("a-b".to_string(), fm, String::new(), "a-b.md".into());
        let index = PostIndex::build(vec![post]).unwrap();

        let mut context = base_context(true);
        context.insert("posts", &index.summaries());
        let html = renderer.render("index.html", &context).unwrap();

        assert!(html.contains(r#"href="/posts/a-b""#));
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("site-title--large"));
        assert!(html.contains("Ruben &lt;Profit&gt;"));
        assert!(html.contains(r#"href="/rss.xml""#));
        assert!(html.contains("&copy; 2024 John Doe"));
    }

    #[test]
    fn test_404_uses_small_title() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer.render("404.html", &base_context(false)).unwrap();
        assert!(html.contains("site-title--small"));
        assert!(html.contains("Page not found"));
    }

    #[test]
    fn test_date_format_filter() {
        let mut args = HashMap::new();
        args.insert(
            "format".to_string(),
            tera::Value::String("MMMM DD, YYYY".to_string()),
        );
        let out = date_format_filter(&tera::Value::String("2023-06-01".into()), &args).unwrap();
        assert_eq!(out, tera::Value::String("June 01, 2023".to_string()));

        let out = date_format_filter(&tera::Value::String("soon".into()), &args).unwrap();
        assert_eq!(out, tera::Value::String("soon".to_string()));
    }

    #[test]
    fn test_post_path_filter() {
        let out = post_path_filter(&tera::Value::String("a b".into()), &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::String("/posts/a%20b".to_string()));
    }
}
