//! OpenAPI document for the article API, served at `/api-docs/openapi.json` and rendered at `/docs`.

use utoipa::OpenApi;

use crate::api::handlers::articles;
use crate::api::models::articles::{ArticleCreate, ArticleDelete, ArticleIdResponse, ArticleResponse, ArticleUpdate};
use crate::errors::{ErrorBody, ErrorEnvelope};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "articled",
        description = "Create, read, update and delete articles. Successful responses are wrapped in `{\"data\": ...}`, failures in `{\"error\": {\"message\": ...}}`."
    ),
    paths(
        articles::list_articles,
        articles::get_article,
        articles::create_article,
        articles::update_article,
        articles::delete_article,
    ),
    components(schemas(
        ArticleResponse,
        ArticleIdResponse,
        ArticleCreate,
        ArticleUpdate,
        ArticleDelete,
        ErrorEnvelope,
        ErrorBody,
    )),
    tags(
        (name = "articles", description = "Article CRUD"),
    )
)]
pub struct ApiDoc;
