use crate::routes::ApiError;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tessera::domain::constants::CONTENT_TAG;
use tessera::domain::content::{ContentItem, ContentStatus};
use tessera::features::content::{Content, NewContent};
use tessera::kernel::prelude::ApiState;
use utoipa::{IntoParams, ToSchema};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub(crate) fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(create_content, list_content))
        .routes(routes!(get_content, delete_content))
        .routes(routes!(get_content_by_slug))
        .routes(routes!(publish_content))
        .routes(routes!(save_settings))
        .routes(routes!(render_content))
}

/// A content item.
#[derive(Debug, Serialize, ToSchema)]
struct ContentResponse {
    id: String,
    title: String,
    slug: String,
    body: String,
    status: String,
    template: String,
    parent_id: Option<String>,
    sort_order: i64,
    published_at: Option<i64>,
}

impl From<ContentItem> for ContentResponse {
    fn from(item: ContentItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            slug: item.slug,
            body: item.body,
            status: item.status.as_str().to_owned(),
            template: item.template,
            parent_id: item.parent_id,
            sort_order: item.sort_order,
            published_at: item.published_at,
        }
    }
}

/// Fields for creating a content item (always starts as a draft).
#[derive(Debug, Deserialize, ToSchema)]
struct CreateContentRequest {
    title: String,
    slug: String,
    #[serde(default)]
    body: String,
    template: String,
    #[serde(default)]
    parent_id: Option<String>,
    #[serde(default)]
    sort_order: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
struct ListContentQuery {
    /// Restrict the listing to one status (`draft`, `published`, `archived`).
    #[serde(default)]
    status: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/content",
    request_body = CreateContentRequest,
    responses(
        (status = CREATED, description = "Draft created", body = ContentResponse),
        (status = NOT_FOUND, description = "Unknown template identifier"),
        (status = CONFLICT, description = "Slug already in use"),
    ),
    tag = CONTENT_TAG,
)]
async fn create_content(
    State(state): State<ApiState>,
    Json(request): Json<CreateContentRequest>,
) -> Result<(StatusCode, Json<ContentResponse>), ApiError> {
    let content = state.try_get_slice::<Content>()?;
    let item = content
        .store()
        .create(NewContent {
            title: request.title,
            slug: request.slug,
            body: request.body,
            template: request.template,
            parent_id: request.parent_id,
            sort_order: request.sort_order,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

#[utoipa::path(
    get,
    path = "/api/content",
    params(ListContentQuery),
    responses(
        (status = OK, description = "Content items ordered by sort order", body = [ContentResponse]),
        (status = BAD_REQUEST, description = "Unknown status filter"),
    ),
    tag = CONTENT_TAG,
)]
async fn list_content(
    State(state): State<ApiState>,
    Query(query): Query<ListContentQuery>,
) -> Result<Json<Vec<ContentResponse>>, ApiError> {
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => Some(ContentStatus::parse(raw).ok_or_else(|| {
            ApiError::new(StatusCode::BAD_REQUEST, format!("Unknown status filter '{raw}'"))
        })?),
    };

    let content = state.try_get_slice::<Content>()?;
    let items = content.store().list(status).await?;
    Ok(Json(items.into_iter().map(ContentResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/content/{id}",
    params(("id" = String, Path, description = "Content item id")),
    responses(
        (status = OK, description = "The content item", body = ContentResponse),
        (status = NOT_FOUND, description = "Unknown content id"),
    ),
    tag = CONTENT_TAG,
)]
async fn get_content(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<ContentResponse>, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    let item = content.store().get(&id).await?;
    Ok(Json(item.into()))
}

#[utoipa::path(
    delete,
    path = "/api/content/{id}",
    params(("id" = String, Path, description = "Content item id")),
    responses(
        (status = NO_CONTENT, description = "Item and its zone values deleted"),
        (status = NOT_FOUND, description = "Unknown content id"),
    ),
    tag = CONTENT_TAG,
)]
async fn delete_content(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    content.store().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/content/slug/{slug}",
    params(("slug" = String, Path, description = "Content item slug")),
    responses(
        (status = OK, description = "The content item", body = ContentResponse),
        (status = NOT_FOUND, description = "Unknown slug"),
    ),
    tag = CONTENT_TAG,
)]
async fn get_content_by_slug(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> Result<Json<ContentResponse>, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    let item = content.store().get_by_slug(&slug).await?;
    Ok(Json(item.into()))
}

#[utoipa::path(
    put,
    path = "/api/content/{id}/publish",
    params(("id" = String, Path, description = "Content item id")),
    responses(
        (status = OK, description = "The published item", body = ContentResponse),
        (status = NOT_FOUND, description = "Unknown content id"),
    ),
    tag = CONTENT_TAG,
)]
async fn publish_content(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<ContentResponse>, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    let item = content.store().publish(&id).await?;
    Ok(Json(item.into()))
}

#[utoipa::path(
    put,
    path = "/api/content/{id}/settings",
    params(("id" = String, Path, description = "Content item id")),
    request_body(content = Object, description = "Zone values keyed by zone key"),
    responses(
        (status = NO_CONTENT, description = "Zone values stored"),
        (status = NOT_FOUND, description = "Unknown content id"),
        (status = UNPROCESSABLE_ENTITY, description = "Required zones missing or malformed"),
    ),
    tag = CONTENT_TAG,
)]
async fn save_settings(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(values): Json<serde_json::Map<String, serde_json::Value>>,
) -> Result<StatusCode, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    content.store().save_settings(&id, values).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/content/{id}/render",
    params(("id" = String, Path, description = "Content item id")),
    responses(
        (status = OK, description = "Rendered HTML fragment per zone key", body = Object),
        (status = NOT_FOUND, description = "Unknown content id"),
    ),
    tag = CONTENT_TAG,
)]
async fn render_content(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<BTreeMap<String, String>>, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    let fragments = content.store().render(&id).await?;
    Ok(Json(fragments.into_iter().collect()))
}
