//! Error types for the content pipeline

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::content::FrontMatterError;

/// Errors raised while loading, indexing or publishing posts
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed front-matter in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("post not found: {0}")]
    NotFound(String),

    #[error("duplicate slug `{slug}` ({} and {})", .first.display(), .second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
