//! List site content

use anyhow::Result;

use crate::content::PostIndex;
use crate::helpers::post_link;
use crate::Site;

/// Print every post, newest first
pub fn run(site: &Site) -> Result<()> {
    let index = site.load_index()?;
    print!("{}", format_listing(&index));
    Ok(())
}

/// Print one post's metadata
pub fn show(site: &Site, slug: &str) -> Result<()> {
    let index = site.load_index()?;
    let post = index.get_by_slug(slug)?;

    println!("Title:       {}", post.title());
    println!("Description: {}", post.description());
    println!("Date:        {}", post.frontmatter.date);
    println!("Link:        {}", post_link(&site.config.url, &post.slug));
    println!("Source:      {}", post.source.display());

    Ok(())
}

fn format_listing(index: &PostIndex) -> String {
    let mut out = format!("Posts ({}):\n", index.len());
    for post in index.sorted_posts() {
        out.push_str(&format!(
            "  {} - {} [{}]\n",
            post.date().format("%Y-%m-%d"),
            post.title(),
            post.slug
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_listing_and_show() {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("content/posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("hello.md"),
            "---\ntitle: Hello\ndescription: hi\ndate: 2023-01-01\n---\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        let index = site.load_index().unwrap();
        assert_eq!(
            format_listing(&index),
            "Posts (1):\n  2023-01-01 - Hello [hello]\n"
        );

        show(&site, "hello").unwrap();
        let err = show(&site, "nope").unwrap_err();
        assert!(err.to_string().contains("post not found: nope"));
    }
}
