use crate::routes::ApiError;
use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use tessera::domain::constants::TEMPLATES_TAG;
use tessera::domain::template::Template;
use tessera::features::templates::Templates;
use tessera::kernel::prelude::ApiState;
use utoipa::{IntoParams, ToSchema};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub(crate) fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(list_templates)).routes(routes!(get_template))
}

/// One zone of a template's schema.
#[derive(Debug, Serialize, ToSchema)]
struct ZoneResponse {
    key: String,
    kind: String,
    label: String,
    required: bool,
}

/// A page template with its zone schema.
#[derive(Debug, Serialize, ToSchema)]
struct TemplateResponse {
    identifier: String,
    name: String,
    zones: Vec<ZoneResponse>,
    #[schema(value_type = Object)]
    settings_schema: serde_json::Value,
    view_path: String,
    category: String,
    active: bool,
    sort_order: i64,
}

impl From<Template> for TemplateResponse {
    fn from(template: Template) -> Self {
        Self {
            identifier: template.identifier,
            name: template.name,
            zones: template
                .zones
                .into_iter()
                .map(|z| ZoneResponse {
                    key: z.key,
                    kind: z.kind.as_str().to_owned(),
                    label: z.label,
                    required: z.required,
                })
                .collect(),
            settings_schema: template.settings_schema,
            view_path: template.view_path,
            category: template.category,
            active: template.active,
            sort_order: template.sort_order,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
struct ListTemplatesQuery {
    /// Restrict the listing to active templates.
    #[serde(default)]
    active_only: bool,
}

#[utoipa::path(
    get,
    path = "/api/templates",
    params(ListTemplatesQuery),
    responses((status = OK, description = "Templates ordered by sort order", body = [TemplateResponse])),
    tag = TEMPLATES_TAG,
)]
async fn list_templates(
    State(state): State<ApiState>,
    Query(query): Query<ListTemplatesQuery>,
) -> Result<Json<Vec<TemplateResponse>>, ApiError> {
    let templates = state.try_get_slice::<Templates>()?;
    let list = templates.registry().list(query.active_only).await?;
    Ok(Json(list.into_iter().map(TemplateResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/templates/{identifier}",
    params(("identifier" = String, Path, description = "Template identifier")),
    responses(
        (status = OK, description = "The template", body = TemplateResponse),
        (status = NOT_FOUND, description = "Unknown template identifier"),
    ),
    tag = TEMPLATES_TAG,
)]
async fn get_template(
    State(state): State<ApiState>,
    Path(identifier): Path<String>,
) -> Result<Json<TemplateResponse>, ApiError> {
    let templates = state.try_get_slice::<Templates>()?;
    let template = templates.registry().get(&identifier).await?;
    Ok(Json(template.into()))
}
