//! Post index - the sorted view every page and the feed read from

use std::collections::HashMap;

use super::{HomeProps, Post, PostSummary};
use crate::error::{Error, Result};

/// All posts of a build, newest first
#[derive(Debug, Clone, Default)]
pub struct PostIndex {
    posts: Vec<Post>,
    by_slug: HashMap<String, usize>,
}

impl PostIndex {
    /// Sort `records` by date descending.
    ///
    /// `records` must be in scan order; posts sharing a date keep that order.
    pub fn build(records: Vec<Post>) -> Result<Self> {
        let mut posts = records;
        posts.sort_by(|a, b| b.date().cmp(&a.date()));

        let mut by_slug: HashMap<String, usize> = HashMap::with_capacity(posts.len());
        for (i, post) in posts.iter().enumerate() {
            if let Some(&existing) = by_slug.get(&post.slug) {
                return Err(Error::DuplicateSlug {
                    slug: post.slug.clone(),
                    first: posts[existing].source.clone(),
                    second: post.source.clone(),
                });
            }
            by_slug.insert(post.slug.clone(), i);
        }

        Ok(Self { posts, by_slug })
    }

    pub fn sorted_posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get_by_slug(&self, slug: &str) -> Result<&Post> {
        self.by_slug
            .get(slug)
            .map(|&i| &self.posts[i])
            .ok_or_else(|| Error::NotFound(slug.to_string()))
    }

    /// The newer and the older neighbour of a post
    pub fn neighbors(&self, slug: &str) -> (Option<&Post>, Option<&Post>) {
        match self.by_slug.get(slug) {
            Some(&i) => {
                let newer = i.checked_sub(1).map(|j| &self.posts[j]);
                (newer, self.posts.get(i + 1))
            }
            None => (None, None),
        }
    }

    pub fn summaries(&self) -> Vec<PostSummary> {
        self.posts.iter().map(Post::summary).collect()
    }

    pub fn home_props(&self) -> HomeProps {
        HomeProps {
            posts: self.summaries(),
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;
    use std::path::PathBuf;

    fn post(slug: &str, title: &str, date: &str) -> Post {
        let content = format!(
            "---\ntitle: {}\ndescription: {} post\ndate: {}\n---\n",
            title, title, date
        );
        let (fm, body) = FrontMatter::parse(&content).unwrap();
        Post::new(
            slug.to_string(),
            fm,
            body.to_string(),
            PathBuf::from(format!("{}.md", slug)),
        )
    }

    fn titles(index: &PostIndex) -> Vec<&str> {
        index.sorted_posts().iter().map(|p| p.title()).collect()
    }

    #[test]
    fn test_newest_first() {
        let index = PostIndex::build(vec![
            post("a", "A", "2023-01-01"),
            post("b", "B", "2023-06-01"),
        ])
        .unwrap();
        assert_eq!(titles(&index), vec!["B", "A"]);
    }

    #[test]
    fn test_ties_keep_scan_order() {
        let index = PostIndex::build(vec![
            post("a", "A", "2023-03-01"),
            post("b", "B", "2023-03-01"),
            post("c", "C", "2024-01-01"),
            post("d", "D", "2023-03-01"),
        ])
        .unwrap();
        assert_eq!(titles(&index), vec!["C", "A", "B", "D"]);
    }

    #[test]
    fn test_sorted_by_date_descending() {
        let dates = [
            "2021-05-05",
            "2023-01-01T08:00:00+02:00",
            "2022/12/31",
            "2023-01-01 05:59",
            "2020-02-29",
        ];
        let records = dates
            .iter()
            .enumerate()
            .map(|(i, d)| post(&format!("p{}", i), &format!("P{}", i), d))
            .collect();
        let index = PostIndex::build(records).unwrap();

        let sorted = index.sorted_posts();
        assert_eq!(sorted.len(), dates.len());
        assert!(sorted.windows(2).all(|w| w[0].date() >= w[1].date()));
        // 08:00+02:00 is 06:00 UTC, one minute after p3
        assert_eq!(sorted[0].slug, "p1");
        assert_eq!(sorted[1].slug, "p3");
    }

    #[test]
    fn test_get_by_slug_round_trip() {
        let index = PostIndex::build(vec![
            post("first", "First", "2023-01-01"),
            post("second", "Second", "2023-02-01"),
        ])
        .unwrap();

        for p in index.sorted_posts() {
            assert_eq!(index.get_by_slug(&p.slug).unwrap(), p);
        }
        assert!(matches!(
            index.get_by_slug("missing"),
            Err(Error::NotFound(slug)) if slug == "missing"
        ));
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let err = PostIndex::build(vec![
            post("same", "One", "2023-01-01"),
            post("same", "Two", "2023-02-01"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateSlug { slug, .. } if slug == "same"));
    }

    #[test]
    fn test_neighbors() {
        let index = PostIndex::build(vec![
            post("old", "Old", "2022-01-01"),
            post("mid", "Mid", "2023-01-01"),
            post("new", "New", "2024-01-01"),
        ])
        .unwrap();

        let (newer, older) = index.neighbors("mid");
        assert_eq!(newer.map(|p| p.slug.as_str()), Some("new"));
        assert_eq!(older.map(|p| p.slug.as_str()), Some("old"));

        let (newer, older) = index.neighbors("new");
        assert!(newer.is_none());
        assert_eq!(older.map(|p| p.slug.as_str()), Some("mid"));

        assert_eq!(index.neighbors("ghost"), (None, None));
    }

    #[test]
    fn test_empty_index() {
        let index = PostIndex::build(Vec::new()).unwrap();
        assert!(index.is_empty());
        assert!(index.home_props().posts.is_empty());
    }
}
