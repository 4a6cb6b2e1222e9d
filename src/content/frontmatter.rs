//! Front-matter parsing

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::helpers::parse_date;

/// Why a metadata block was rejected
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("no front-matter block found")]
    Missing,

    #[error("front-matter block is not terminated")]
    Unterminated,

    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("unparseable date `{0}`")]
    InvalidDate(String),
}

/// Loosely typed block as written by the author, before validation
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFrontMatter {
    title: Option<String>,
    /// `Some(None)` when the key is present with no value
    #[serde(deserialize_with = "present")]
    description: Option<Option<String>>,
    date: Option<String>,
    draft: bool,
}

/// Keep "key written, value null" apart from "key absent"
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Validated post metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    pub title: String,
    pub description: String,
    /// Date exactly as written in the file
    pub date: String,
    #[serde(skip)]
    pub draft: bool,
    /// `date` parsed to an instant
    #[serde(skip)]
    pub published: DateTime<FixedOffset>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let (raw, body) = if content.starts_with("---") {
            parse_yaml(content)?
        } else if content.starts_with(";;;") || content.starts_with('{') {
            parse_json(content)?
        } else {
            return Err(FrontMatterError::Missing);
        };

        Ok((raw.validate()?, body))
    }
}

impl RawFrontMatter {
    fn validate(self) -> Result<FrontMatter, FrontMatterError> {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(FrontMatterError::MissingField("title"))?;
        let description = self
            .description
            .ok_or(FrontMatterError::MissingField("description"))?
            .unwrap_or_default();
        let date = self
            .date
            .filter(|d| !d.trim().is_empty())
            .ok_or(FrontMatterError::MissingField("date"))?;
        let published =
            parse_date(&date).ok_or_else(|| FrontMatterError::InvalidDate(date.clone()))?;

        Ok(FrontMatter {
            title,
            description,
            date,
            draft: self.draft,
            published,
        })
    }
}

fn parse_yaml(content: &str) -> Result<(RawFrontMatter, &str), FrontMatterError> {
    let rest = content[3..].trim_start_matches(['\n', '\r']);

    let end_pos = if rest.starts_with("---") {
        0
    } else {
        rest.find("\n---")
            .map(|pos| pos + 1)
            .ok_or(FrontMatterError::Unterminated)?
    };

    let yaml_content = &rest[..end_pos];
    let remaining = &rest[end_pos + 3..];
    let remaining = remaining.trim_start_matches(['\n', '\r']);

    if yaml_content.trim().is_empty() {
        return Ok((RawFrontMatter::default(), remaining));
    }

    let raw = serde_yaml::from_str::<RawFrontMatter>(yaml_content)?;
    Ok((raw, remaining))
}

fn parse_json(content: &str) -> Result<(RawFrontMatter, &str), FrontMatterError> {
    // JSON front-matter fenced by ;;;
    if let Some(rest) = content.strip_prefix(";;;") {
        let end_pos = rest.find(";;;").ok_or(FrontMatterError::Unterminated)?;
        let json_content = &rest[..end_pos];
        let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);

        let raw = serde_json::from_str::<RawFrontMatter>(json_content)?;
        return Ok((raw, remaining));
    }

    // Bare JSON object at the start of the file
    let mut stream = serde_json::Deserializer::from_str(content).into_iter::<RawFrontMatter>();
    let raw = stream.next().ok_or(FrontMatterError::Missing)??;
    let remaining = content[stream.byte_offset()..].trim_start_matches(['\n', '\r']);

    Ok((raw, remaining))
}
