// ==========================================
// Tire registry - API errors
// ==========================================
// Maps layer errors to HTTP status + JSON body:
// - 400 / 404: {"error": "..."}
// - 500: {"error": "...", "detalle": "<underlying message>"}
// ==========================================

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API layer error
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad or unusable client input (batch abort)
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Server-side failure outside row processing
    #[error("{message}: {detail}")]
    Transport { message: String, detail: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    pub fn transport(message: impl Into<String>, detail: impl ToString) -> Self {
        ApiError::Transport {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Transport { .. } | ApiError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detalle: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest(error) | ApiError::NotFound(error) => ErrorBody {
                error,
                detalle: None,
            },
            ApiError::Transport { message, detail } => {
                tracing::error!(error = %message, detail = %detail, "request failed");
                ErrorBody {
                    error: message,
                    detalle: Some(detail),
                }
            }
            ApiError::Other(err) => {
                tracing::error!(error = %err, "request failed");
                ErrorBody {
                    error: "internal error".to_string(),
                    detalle: Some(err.to_string()),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Result alias
pub type ApiResult<T> = Result<T, ApiError>;
