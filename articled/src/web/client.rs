//! HTTP client for the article API.
//!
//! Unwraps the `{"data": ...}` envelope on success. On failure the API's
//! `{"error": {"message": ...}}` is surfaced as an [`ApiError`] carrying the same status and
//! message, so pages can show exactly what the API said.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::{
    api::models::articles::{ArticleCreate, ArticleDelete, ArticleIdResponse, ArticleResponse, ArticleUpdate, DataEnvelope},
    errors::ErrorEnvelope,
    types::ArticleIdInput,
};

/// Shown when the API could not be reached or answered with something other than an envelope
pub const UNAVAILABLE_MESSAGE: &str = "The article service is unavailable";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({status})")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn unavailable() -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: UNAVAILABLE_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        tracing::error!("Article API request failed: {:#}", e);
        Self::unavailable()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url, timeout: Duration) -> anyhow::Result<Self> {
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL {base_url} cannot have paths appended");
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    /// Append percent-encoded path segments to the base URL, keeping any base path.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let response = self.http.get(self.endpoint(segments)).send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, segments: &[&str], body: &B) -> Result<T> {
        let response = self.http.post(self.endpoint(segments)).json(body).send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn unwrap_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let envelope: DataEnvelope<T> = response.json().await?;
            return Ok(envelope.data);
        }

        match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => Err(ApiError {
                status,
                message: envelope.error.message,
            }),
            Err(e) => {
                tracing::warn!(%status, "Article API error without an error envelope: {}", e);
                Err(ApiError {
                    status,
                    message: UNAVAILABLE_MESSAGE.to_string(),
                })
            }
        }
    }

    #[instrument(skip(self), err)]
    pub async fn list_articles(&self) -> Result<Vec<ArticleResponse>> {
        self.get(&["articles"]).await
    }

    /// The id is passed through verbatim; the API decides whether it is valid.
    #[instrument(skip(self), err)]
    pub async fn get_article(&self, id: &str) -> Result<ArticleResponse> {
        self.get(&["articles", "detail", id]).await
    }

    #[instrument(skip_all, err)]
    pub async fn create_article(&self, request: &ArticleCreate) -> Result<String> {
        let created: ArticleIdResponse = self.post(&["articles", "create"], request).await?;
        Ok(created.id)
    }

    #[instrument(skip_all, err)]
    pub async fn update_article(&self, request: &ArticleUpdate) -> Result<String> {
        let updated: ArticleIdResponse = self.post(&["articles", "update"], request).await?;
        Ok(updated.id)
    }

    #[instrument(skip(self), err)]
    pub async fn delete_article(&self, id: &str) -> Result<String> {
        let request = ArticleDelete {
            article_id: Some(ArticleIdInput::Text(id.to_string())),
        };
        let deleted: ArticleIdResponse = self.post(&["articles", "delete"], &request).await?;
        Ok(deleted.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(Url::parse(&server.uri()).unwrap(), Duration::from_secs(5)).unwrap()
    }

    fn article_json(id: i64, title: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": title,
            "content": "body",
            "category": "notes",
            "status": "draft",
            "createdAt": "2025/06/01 09:30",
            "updatedAt": "2025/06/01 09:30"
        })
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_escapes_segments() {
        let client = ApiClient::new(Url::parse("http://api.internal/v2/").unwrap(), Duration::from_secs(1)).unwrap();

        assert_eq!(
            client.endpoint(&["articles", "detail", "a/b"]).as_str(),
            "http://api.internal/v2/articles/detail/a%2Fb"
        );

        let client = ApiClient::new(Url::parse("http://api.internal").unwrap(), Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint(&["articles"]).as_str(), "http://api.internal/articles");
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(ApiClient::new(Url::parse("mailto:someone@example.com").unwrap(), Duration::from_secs(1)).is_err());
    }

    #[test_log::test(tokio::test)]
    async fn test_list_articles_unwraps_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [article_json(2, "second"), article_json(1, "first")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let articles = client_for(&server).list_articles().await.unwrap();

        let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
        assert_eq!(articles[0].created_at, "2025/06/01 09:30");
    }

    #[test_log::test(tokio::test)]
    async fn test_error_envelope_becomes_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles/detail/999"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {"message": "Article not found"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).get_article("999").await.unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Article not found");
    }

    #[test_log::test(tokio::test)]
    async fn test_error_without_envelope_uses_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_articles().await.unwrap_err();

        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.message, UNAVAILABLE_MESSAGE);
    }

    #[test_log::test(tokio::test)]
    async fn test_unreachable_api_is_bad_gateway() {
        // Nothing listens on the discard port
        let client = ApiClient::new(Url::parse("http://127.0.0.1:9").unwrap(), Duration::from_secs(2)).unwrap();

        let err = client.list_articles().await.unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.message, UNAVAILABLE_MESSAGE);
    }

    #[test_log::test(tokio::test)]
    async fn test_mutations_send_expected_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/articles/create"))
            .and(body_json(json!({"title": "t", "content": "c", "category": "k", "status": "s"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "3"}})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/articles/update"))
            .and(body_json(
                json!({"articleId": "3", "title": "t2", "content": "c", "category": "k", "status": "s"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "3"}})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/articles/delete"))
            .and(body_json(json!({"articleId": "3"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "3"}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);

        let created = client
            .create_article(&ArticleCreate {
                title: "t".to_string(),
                content: "c".to_string(),
                category: "k".to_string(),
                status: "s".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created, "3");

        let updated = client
            .update_article(&ArticleUpdate {
                article_id: Some(ArticleIdInput::Text("3".to_string())),
                title: "t2".to_string(),
                content: "c".to_string(),
                category: "k".to_string(),
                status: "s".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(updated, "3");

        assert_eq!(client.delete_article("3").await.unwrap(), "3");
    }
}
