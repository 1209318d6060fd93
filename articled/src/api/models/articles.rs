//! API request/response models for articles.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    db::models::articles::{Article, ArticleCreateDBRequest, ArticleUpdateDBRequest},
    errors::{Error, IdOrigin, Result},
    types::{ArticleId, ArticleIdInput},
};

/// Display format of `createdAt` / `updatedAt`: `YYYY/MM/DD hh:mm`
pub const DISPLAY_TIME_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Render a timestamp in the configured display timezone
pub fn format_display_time(at: DateTime<Utc>, tz: FixedOffset) -> String {
    at.with_timezone(&tz).format(DISPLAY_TIME_FORMAT).to_string()
}

/// Success envelope wrapping every response payload: `{ "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// An article as returned by the list and detail endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: String,
    /// Creation time, `YYYY/MM/DD hh:mm`
    #[schema(example = "2025/06/01 09:30")]
    pub created_at: String,
    /// Last update time, `YYYY/MM/DD hh:mm`
    #[schema(example = "2025/06/01 09:30")]
    pub updated_at: String,
}

impl ArticleResponse {
    pub fn from_db(article: Article, tz: FixedOffset) -> Self {
        Self {
            id: article.id,
            title: article.title,
            content: article.content,
            category: article.category,
            status: article.status,
            created_at: format_display_time(article.created_at, tz),
            updated_at: format_display_time(article.updated_at, tz),
        }
    }
}

/// Id of a created, updated or deleted article, as a decimal string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ArticleIdResponse {
    #[schema(example = "1")]
    pub id: String,
}

impl From<ArticleId> for ArticleIdResponse {
    fn from(id: ArticleId) -> Self {
        Self { id: id.to_string() }
    }
}

/// Body of `POST /articles/create`. Absent fields count as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ArticleCreate {
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: String,
}

/// Body of `POST /articles/update`. Absent fields count as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ArticleUpdate {
    /// Numeric id, as a JSON number or a decimal string
    #[schema(value_type = String, example = "1")]
    pub article_id: Option<ArticleIdInput>,
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: String,
}

/// Body of `POST /articles/delete`
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ArticleDelete {
    /// Numeric id, as a JSON number or a decimal string
    #[schema(value_type = String, example = "1")]
    pub article_id: Option<ArticleIdInput>,
}

/// Check the content fields in order, failing on the first empty one
fn require_content(title: &str, content: &str, category: &str, status: &str) -> Result<()> {
    for (field, value) in [("title", title), ("content", content), ("category", category), ("status", status)] {
        if value.is_empty() {
            return Err(Error::MissingField { field });
        }
    }
    Ok(())
}

/// Parse a mutation body's `articleId`
fn require_article_id(article_id: Option<&ArticleIdInput>) -> Result<ArticleId> {
    match article_id {
        Some(input) => input.parse().ok_or_else(|| Error::MalformedId {
            value: input.to_string(),
            origin: IdOrigin::Mutation,
        }),
        None => Err(Error::MalformedId {
            value: String::new(),
            origin: IdOrigin::Mutation,
        }),
    }
}

impl ArticleCreate {
    pub fn validate(self) -> Result<ArticleCreateDBRequest> {
        require_content(&self.title, &self.content, &self.category, &self.status)?;
        Ok(ArticleCreateDBRequest {
            title: self.title,
            content: self.content,
            category: self.category,
            status: self.status,
        })
    }
}

impl ArticleUpdate {
    /// The id is checked before the content fields.
    pub fn validate(self) -> Result<(ArticleId, ArticleUpdateDBRequest)> {
        let id = require_article_id(self.article_id.as_ref())?;
        require_content(&self.title, &self.content, &self.category, &self.status)?;
        Ok((
            id,
            ArticleUpdateDBRequest {
                title: self.title,
                content: self.content,
                category: self.category,
                status: self.status,
            },
        ))
    }
}

impl ArticleDelete {
    pub fn validate(&self) -> Result<ArticleId> {
        require_article_id(self.article_id.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tokyo() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    #[test]
    fn test_format_display_time_uses_offset() {
        let at = Utc.with_ymd_and_hms(2025, 12, 31, 16, 5, 59).unwrap();

        assert_eq!(format_display_time(at, tokyo()), "2026/01/01 01:05");
        assert_eq!(format_display_time(at, FixedOffset::east_opt(0).unwrap()), "2025/12/31 16:05");
    }

    #[test]
    fn test_article_response_is_camel_case() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 0, 30, 0).unwrap();
        let article = Article {
            id: 3,
            title: "A".to_string(),
            content: "B".to_string(),
            category: "C".to_string(),
            status: "draft".to_string(),
            created_at: at,
            updated_at: at,
        };

        let json = serde_json::to_value(ArticleResponse::from_db(article, tokyo())).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "title": "A",
                "content": "B",
                "category": "C",
                "status": "draft",
                "createdAt": "2025/06/01 09:30",
                "updatedAt": "2025/06/01 09:30",
            })
        );
    }

    #[test]
    fn test_create_validation_reports_first_empty_field() {
        let request = ArticleCreate {
            title: "t".to_string(),
            content: String::new(),
            category: String::new(),
            status: "s".to_string(),
        };

        match request.validate() {
            Err(Error::MissingField { field }) => assert_eq!(field, "content"),
            other => panic!("expected missing content, got {other:?}"),
        }
    }

    #[test]
    fn test_absent_fields_count_as_empty() {
        let request: ArticleCreate = serde_json::from_str(r#"{"title": "only a title"}"#).unwrap();

        match request.validate() {
            Err(Error::MissingField { field }) => assert_eq!(field, "content"),
            other => panic!("expected missing content, got {other:?}"),
        }
    }

    #[test]
    fn test_update_checks_id_before_fields() {
        let request: ArticleUpdate = serde_json::from_str(r#"{"articleId": "abc", "title": ""}"#).unwrap();

        assert!(matches!(
            request.validate(),
            Err(Error::MalformedId {
                origin: IdOrigin::Mutation,
                ..
            })
        ));
    }

    #[test]
    fn test_update_accepts_string_id() {
        let request: ArticleUpdate = serde_json::from_str(
            r#"{"articleId": "12", "title": "t", "content": "c", "category": "k", "status": "s"}"#,
        )
        .unwrap();

        let (id, db_request) = request.validate().unwrap();
        assert_eq!(id, 12);
        assert_eq!(db_request.category, "k");
    }

    #[test]
    fn test_delete_requires_id() {
        assert!(ArticleDelete::default().validate().is_err());

        let request: ArticleDelete = serde_json::from_str(r#"{"articleId": 5}"#).unwrap();
        assert_eq!(request.validate().unwrap(), 5);
    }
}
