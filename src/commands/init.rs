//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Site
title: My Blog
description: ''
author:
  name: John Doe
  summary: ''
language: en
source_repo:

# URL
url: http://example.com

# Directory
content_dir: content/posts
static_dir: static
public_dir: public

# Writing
render_drafts: false
date_format: MMMM DD, YYYY
highlight:
  theme: base16-ocean.dark
  line_number: false

# Feed
feed:
  path: rss.xml
  limit:
"#;

const HELLO_WORLD: &str = r#"---
title: Hello World
description: The first post on this site.
date: 2024-01-01
---

Welcome! Edit or delete this post in `content/posts/hello-world.md`.
"#;

const STYLESHEET: &str = r#"body { max-width: 40rem; margin: 0 auto; padding: 3rem 1rem; font-family: system-ui, sans-serif; }
html.dark body { background: #111; color: #eee; }
html.dark a { color: #9cf; }
.site-header { display: flex; align-items: center; justify-content: space-between; margin-bottom: 0.5rem; }
.site-header--root { margin-bottom: 2rem; }
.site-title--large { font-size: 3rem; }
.site-title--small { font-size: 1.5rem; }
.site-actions { display: flex; gap: 1rem; }
.site-footer { font-size: 0.75rem; }
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already exists", config_path);
    }

    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("static/css"))?;

    fs::write(&config_path, DEFAULT_CONFIG)?;
    fs::write(target_dir.join("content/posts/hello-world.md"), HELLO_WORLD)?;
    fs::write(target_dir.join("static/css/style.css"), STYLESHEET)?;

    tracing::info!("Initialized site in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Site;

    #[test]
    fn test_init_site_builds() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.title, "My Blog");
        assert_eq!(site.config.source_repo, None);
        assert_eq!(site.config.feed.limit, None);

        let index = site.load_index().unwrap();
        assert_eq!(index.len(), 1);
        assert!(index.get_by_slug("hello-world").is_ok());

        assert!(init_site(dir.path()).is_err());
    }
}
