use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use kudos_types::api::{ErrorResponse, ValidationErrorResponse};

pub const INVALID_ID: &str = "Invalid ID format";
pub const INVALID_BOARD_ID: &str = "Invalid board ID format";
pub const INVALID_BODY: &str = "Invalid JSON body";

pub const BOARD_NOT_FOUND: &str = "Board not found";
pub const CARD_NOT_FOUND: &str = "Card not found";
pub const COMMENT_NOT_FOUND: &str = "Comment not found";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidId(&'static str),

    #[error("Invalid JSON body")]
    InvalidBody,

    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("{0}")]
    NotFound(&'static str),

    /// `context` is the only part that reaches the client.
    #[error("{context}: {cause:#}")]
    Internal {
        context: &'static str,
        cause: anyhow::Error,
    },
}

impl ApiError {
    pub fn internal(context: &'static str, cause: anyhow::Error) -> Self {
        Self::Internal { context, cause }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        Self::InvalidBody
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidId(message) => error_body(StatusCode::BAD_REQUEST, message),
            Self::InvalidBody => error_body(StatusCode::BAD_REQUEST, INVALID_BODY),
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse { errors }),
            )
                .into_response(),
            Self::NotFound(message) => error_body(StatusCode::NOT_FOUND, message),
            Self::Internal { context, cause } => {
                error!("{}: {:#}", context, cause);
                error_body(StatusCode::INTERNAL_SERVER_ERROR, context)
            }
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
