pub(crate) mod content;
pub(crate) mod jobs;
pub(crate) mod templates;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tessera::features::content::ContentError;
use tessera::features::legacy::LegacyError;
use tessera::features::templates::TemplateError;
use tessera::kernel::server::state::ApiStateError;
use tracing::error;

/// Error surface of the HTTP layer. Slice errors map onto status codes
/// here; handlers just use `?`.
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
    detail: Option<serde_json::Value>,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), detail: None }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, "{}", self.message);
        }

        let body = match self.detail {
            Some(detail) => json!({ "error": self.message, "detail": detail }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ApiStateError> for ApiError {
    fn from(err: ApiStateError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

impl From<TemplateError> for ApiError {
    fn from(err: TemplateError) -> Self {
        let status = match err {
            TemplateError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            ContentError::DuplicateSlug { .. } => Self::new(StatusCode::CONFLICT, err.to_string()),
            ContentError::Template(inner) => inner.into(),
            ContentError::InvalidZones { ref violations } => {
                let detail = violations
                    .iter()
                    .map(|v| {
                        json!({
                            "key": v.key,
                            "kind": v.kind.as_str(),
                            "reason": match v.reason {
                                tessera::zones::validator::ViolationReason::Missing => "missing",
                                tessera::zones::validator::ViolationReason::ShapeMismatch => {
                                    "shape_mismatch"
                                },
                            },
                        })
                    })
                    .collect();
                Self {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    message: err.to_string(),
                    detail: Some(serde_json::Value::Array(detail)),
                }
            },
            _ => Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        }
    }
}

impl From<LegacyError> for ApiError {
    fn from(err: LegacyError) -> Self {
        let status = match err {
            LegacyError::NotFound { .. } => StatusCode::NOT_FOUND,
            LegacyError::DuplicateMapping { .. }
            | LegacyError::Terminal { .. }
            | LegacyError::AlreadyRunning { .. } => StatusCode::CONFLICT,
            LegacyError::InvalidOverride { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}
