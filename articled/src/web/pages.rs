//! Page handlers of the web client.
//!
//! Every page performs one API call. Successful mutations redirect (303); failures re-render the
//! page with the API's message in an error banner and the API's status code.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{WebState, client::ApiError};
use crate::{
    api::models::articles::{ArticleCreate, ArticleResponse, ArticleUpdate},
    types::ArticleIdInput,
};

/// Values of the create / update form. Absent fields are empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleForm {
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: String,
}

impl From<ArticleResponse> for ArticleForm {
    fn from(article: ArticleResponse) -> Self {
        Self {
            title: article.title,
            content: article.content,
            category: article.category,
            status: article.status,
        }
    }
}

impl From<ArticleForm> for ArticleCreate {
    fn from(form: ArticleForm) -> Self {
        Self {
            title: form.title,
            content: form.content,
            category: form.category,
            status: form.status,
        }
    }
}

impl ArticleForm {
    fn into_update(self, id: &str) -> ArticleUpdate {
        ArticleUpdate {
            article_id: Some(ArticleIdInput::Text(id.to_string())),
            title: self.title,
            content: self.content,
            category: self.category,
            status: self.status,
        }
    }
}

fn render<S: Serialize>(state: &WebState, name: &str, status: StatusCode, ctx: S) -> Response {
    match state.templates.render(name, ctx) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render {}: {:#}", name, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

/// List page, optionally topped by an error left over from a failed action.
async fn render_list(state: &WebState, action_error: Option<ApiError>) -> Response {
    match state.client.list_articles().await {
        Ok(articles) => {
            let status = action_error.as_ref().map_or(StatusCode::OK, |e| e.status);
            let error = action_error.map(|e| e.message);
            render(state, "list.html", status, context! { articles, error })
        }
        Err(e) => {
            let e = action_error.unwrap_or(e);
            render(
                state,
                "list.html",
                e.status,
                context! { articles => Vec::<ArticleResponse>::new(), error => e.message },
            )
        }
    }
}

fn render_form(state: &WebState, status: StatusCode, article_id: Option<&str>, form: &ArticleForm, error: Option<String>) -> Response {
    render(state, "form.html", status, context! { article_id, form, error })
}

#[instrument(skip_all)]
pub async fn list_page(State(state): State<WebState>) -> Response {
    render_list(&state, None).await
}

#[instrument(skip(state))]
pub async fn detail_page(State(state): State<WebState>, Path(id): Path<String>) -> Response {
    match state.client.get_article(&id).await {
        Ok(article) => render(&state, "detail.html", StatusCode::OK, context! { article }),
        Err(e) => render(&state, "detail.html", e.status, context! { error => e.message }),
    }
}

#[instrument(skip_all)]
pub async fn create_form(State(state): State<WebState>) -> Response {
    render_form(&state, StatusCode::OK, None, &ArticleForm::default(), None)
}

#[instrument(skip_all)]
pub async fn create_submit(State(state): State<WebState>, Form(form): Form<ArticleForm>) -> Response {
    match state.client.create_article(&form.clone().into()).await {
        Ok(id) => {
            tracing::info!(article_id = %id, "Article created from web form");
            Redirect::to("/").into_response()
        }
        Err(e) => render_form(&state, e.status, None, &form, Some(e.message)),
    }
}

#[instrument(skip(state))]
pub async fn update_form(State(state): State<WebState>, Path(id): Path<String>) -> Response {
    match state.client.get_article(&id).await {
        Ok(article) => render_form(&state, StatusCode::OK, Some(&id), &article.into(), None),
        Err(e) => render_form(&state, e.status, Some(&id), &ArticleForm::default(), Some(e.message)),
    }
}

#[instrument(skip(state, form))]
pub async fn update_submit(State(state): State<WebState>, Path(id): Path<String>, Form(form): Form<ArticleForm>) -> Response {
    match state.client.update_article(&form.clone().into_update(&id)).await {
        Ok(updated) => {
            tracing::info!(article_id = %updated, "Article updated from web form");
            Redirect::to(&format!("/detail/{updated}")).into_response()
        }
        Err(e) => render_form(&state, e.status, Some(&id), &form, Some(e.message)),
    }
}

#[instrument(skip(state))]
pub async fn delete_submit(State(state): State<WebState>, Path(id): Path<String>) -> Response {
    match state.client.delete_article(&id).await {
        Ok(deleted) => {
            tracing::info!(article_id = %deleted, "Article deleted from web form");
            Redirect::to("/").into_response()
        }
        Err(e) => render_list(&state, Some(e)).await,
    }
}
