// HTTP error mapping for TranslationError

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::commands::to_user_error;
use crate::dictionary::TranslationError;

/// Error body returned by every endpoint
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

/// A handler failure, rendered as `{"error": ...}` with a matching status
#[derive(Debug)]
pub struct ApiError(pub TranslationError);

impl ApiError {
    /// Malformed JSON bodies are validation failures
    pub fn from_rejection(rejection: JsonRejection) -> Self {
        ApiError(TranslationError::Validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }

    fn status(&self) -> StatusCode {
        match self.0 {
            TranslationError::Validation(_) | TranslationError::Constraint(_) => {
                StatusCode::BAD_REQUEST
            }
            TranslationError::TableMissing(_) | TranslationError::StoreUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            TranslationError::Persistence(_)
            | TranslationError::Load(_)
            | TranslationError::Lookup { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> Option<&'static str> {
        match self.0 {
            TranslationError::TableMissing(_) => Some("table_missing"),
            TranslationError::StoreUnavailable(_) => Some("store_unavailable"),
            _ => None,
        }
    }
}

impl From<TranslationError> for ApiError {
    fn from(error: TranslationError) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            crate::error!("Request failed: {}", self.0);
        } else {
            crate::debug!("Request rejected: {}", self.0);
        }

        let body = ErrorBody {
            error: to_user_error(&self.0),
            code: self.code(),
        };
        (status, Json(body)).into_response()
    }
}
