//! Common type definitions.
//!
//! - [`ArticleId`]: database identifier of an article
//! - [`ArticleIdInput`]: the loosely-typed `articleId` accepted in mutation bodies

use serde::{Deserialize, Serialize};
use std::fmt;

pub type ArticleId = i64;

/// An `articleId` as sent by clients: either a JSON number or a numeric string.
///
/// Parsing into an [`ArticleId`] happens in the handler so that a malformed value
/// produces the "invalid ID" error rather than a generic body rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleIdInput {
    Number(serde_json::Number),
    Text(String),
    /// Any other JSON value (`null`, booleans, objects); never a valid id
    Other(serde_json::Value),
}

impl ArticleIdInput {
    /// Parse the value into an [`ArticleId`], returning `None` if it is not an integer.
    pub fn parse(&self) -> Option<ArticleId> {
        match self {
            ArticleIdInput::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral_id)),
            ArticleIdInput::Text(s) => parse_article_id(s),
            ArticleIdInput::Other(_) => None,
        }
    }
}

impl fmt::Display for ArticleIdInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleIdInput::Number(n) => write!(f, "{n}"),
            ArticleIdInput::Text(s) => write!(f, "{s}"),
            ArticleIdInput::Other(v) => write!(f, "{v}"),
        }
    }
}

/// Parse a decimal article id from a path segment or string field.
///
/// Surrounding whitespace is ignored. Integral decimals such as `1.0` or `1e3` are accepted,
/// anything with a fractional part or outside the id range is rejected.
pub fn parse_article_id(raw: &str) -> Option<ArticleId> {
    let raw = raw.trim();
    raw.parse::<ArticleId>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().and_then(integral_id))
}

fn integral_id(value: f64) -> Option<ArticleId> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    let in_range = value >= ArticleId::MIN as f64 && value < ArticleId::MAX as f64;
    (value.fract() == 0.0 && in_range).then_some(value as ArticleId)
}
