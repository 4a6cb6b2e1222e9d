//! Create a new post

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::Site;

#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    description: &'a str,
    date: String,
}

/// Create a new post; the filename is `slug` or the slugified title
pub fn create_post(site: &Site, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }

    fs::create_dir_all(&site.content_dir)?;
    let file_path = site.content_dir.join(format!("{}.md", slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let scaffold = Scaffold {
        title,
        description: "",
        date: chrono::Local::now().format("%Y-%m-%d").to_string(),
    };
    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&scaffold)?);

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
