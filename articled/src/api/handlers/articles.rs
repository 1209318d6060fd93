//! HTTP handlers for the article endpoints.

use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::instrument;

use crate::{
    AppState,
    api::{
        extract::AppJson,
        models::articles::{ArticleCreate, ArticleDelete, ArticleIdResponse, ArticleResponse, ArticleUpdate, DataEnvelope},
    },
    db::{errors::DbError, models::articles::Article},
    errors::{Error, ErrorEnvelope, IdOrigin, Result},
    types::parse_article_id,
};

/// Order articles newest first by creation time. Ties keep their retrieval order.
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// List all articles.
#[utoipa::path(
    get,
    path = "/articles",
    tag = "articles",
    summary = "List articles",
    description = "Return every article, newest first. Timestamps are rendered as `YYYY/MM/DD hh:mm` in the display timezone.",
    responses(
        (status = 200, description = "All articles", body = DataEnvelope<Vec<ArticleResponse>>),
        (status = 500, description = "Database operation failed", body = ErrorEnvelope),
    )
)]
#[instrument(skip_all)]
pub async fn list_articles(State(state): State<AppState>) -> Result<Json<DataEnvelope<Vec<ArticleResponse>>>> {
    let mut articles = state.store.find_all().await?;
    sort_newest_first(&mut articles);

    let tz = state.config.display_timezone.offset();
    let articles = articles.into_iter().map(|a| ArticleResponse::from_db(a, tz)).collect();

    Ok(Json(DataEnvelope::new(articles)))
}

/// Get a single article.
#[utoipa::path(
    get,
    path = "/articles/detail/{id}",
    tag = "articles",
    summary = "Get article",
    description = "Look up one article by id. A non-numeric id is answered with 404, like a missing article.",
    params(
        ("id" = String, Path, description = "Article ID"),
    ),
    responses(
        (status = 200, description = "The article", body = DataEnvelope<ArticleResponse>),
        (status = 404, description = "Invalid ID format, or article not found", body = ErrorEnvelope),
        (status = 500, description = "Database operation failed", body = ErrorEnvelope),
    )
)]
#[instrument(skip(state))]
pub async fn get_article(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<Json<DataEnvelope<ArticleResponse>>> {
    let id = parse_article_id(&raw_id).ok_or_else(|| Error::MalformedId {
        value: raw_id.clone(),
        origin: IdOrigin::Lookup,
    })?;

    let article = state.store.find_by_id(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Article".to_string(),
        id: id.to_string(),
    })?;

    Ok(Json(DataEnvelope::new(ArticleResponse::from_db(
        article,
        state.config.display_timezone.offset(),
    ))))
}

/// Create an article.
#[utoipa::path(
    post,
    path = "/articles/create",
    tag = "articles",
    summary = "Create article",
    description = "Insert a new article. `title`, `content`, `category` and `status` must all be non-empty.",
    request_body = ArticleCreate,
    responses(
        (status = 200, description = "Id of the new article", body = DataEnvelope<ArticleIdResponse>),
        (status = 400, description = "Missing required fields", body = ErrorEnvelope),
        (status = 500, description = "Database operation failed", body = ErrorEnvelope),
    )
)]
#[instrument(skip_all)]
pub async fn create_article(
    State(state): State<AppState>,
    AppJson(request): AppJson<ArticleCreate>,
) -> Result<Json<DataEnvelope<ArticleIdResponse>>> {
    let request = request.validate()?;
    let article = state.store.insert(request).await?;

    tracing::info!(article_id = article.id, "Created article");
    Ok(Json(DataEnvelope::new(article.id.into())))
}

/// Update an article.
///
/// A missing target row surfaces as a storage failure (500), not a 404.
#[utoipa::path(
    post,
    path = "/articles/update",
    tag = "articles",
    summary = "Update article",
    description = "Replace all four content fields of an article and refresh `updatedAt`. \
                   Updating an id with no article is reported as a database failure.",
    request_body = ArticleUpdate,
    responses(
        (status = 200, description = "Id of the updated article", body = DataEnvelope<ArticleIdResponse>),
        (status = 400, description = "Invalid ID format, or missing required fields", body = ErrorEnvelope),
        (status = 500, description = "Database operation failed", body = ErrorEnvelope),
    )
)]
#[instrument(skip_all)]
pub async fn update_article(
    State(state): State<AppState>,
    AppJson(request): AppJson<ArticleUpdate>,
) -> Result<Json<DataEnvelope<ArticleIdResponse>>> {
    let (id, request) = request.validate()?;
    let article = state.store.update_by_id(id, request).await?;

    tracing::info!(article_id = article.id, "Updated article");
    Ok(Json(DataEnvelope::new(article.id.into())))
}

/// Delete an article.
///
/// Deleting an id with no article surfaces as a storage failure (500), not a 404.
#[utoipa::path(
    post,
    path = "/articles/delete",
    tag = "articles",
    summary = "Delete article",
    description = "Permanently delete an article. Deleting an id with no article is reported as a database failure.",
    request_body = ArticleDelete,
    responses(
        (status = 200, description = "Id of the deleted article", body = DataEnvelope<ArticleIdResponse>),
        (status = 400, description = "Invalid ID format", body = ErrorEnvelope),
        (status = 500, description = "Database operation failed", body = ErrorEnvelope),
    )
)]
#[instrument(skip_all)]
pub async fn delete_article(
    State(state): State<AppState>,
    AppJson(request): AppJson<ArticleDelete>,
) -> Result<Json<DataEnvelope<ArticleIdResponse>>> {
    let id = request.validate()?;

    if !state.store.delete_by_id(id).await? {
        return Err(Error::Storage(DbError::NotFound));
    }

    tracing::info!(article_id = id, "Deleted article");
    Ok(Json(DataEnvelope::new(id.into())))
}
