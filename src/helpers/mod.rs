//! Helper functions shared by the feed writer, templates and commands

mod date;
mod url;

pub use date::*;
pub use url::*;
