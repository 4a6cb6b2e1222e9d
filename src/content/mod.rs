//! Content module - post loading, indexing and markdown rendering

mod frontmatter;
mod index;
mod markdown;
mod post;
mod repository;

pub use frontmatter::{FrontMatter, FrontMatterError};
pub use index::PostIndex;
pub use markdown::MarkdownRenderer;
pub use post::{HomeProps, Post, PostSummary};
pub use repository::ContentRepository;
