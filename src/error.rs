use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum MarkError {
    /// Malformed mark request, rejected before the store is touched.
    #[error("ValidationError: {0}")]
    Validation(String),
    #[error("NotFound: {0}")]
    NotFound(String),
    #[error("PersistenceError: {0}")]
    Persistence(#[source] anyhow::Error),
}

impl From<libsql::Error> for MarkError {
    fn from(error: libsql::Error) -> Self {
        MarkError::Persistence(error.into())
    }
}

impl From<anyhow::Error> for MarkError {
    fn from(error: anyhow::Error) -> Self {
        MarkError::Persistence(error)
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl MarkError {
    pub fn status(&self) -> StatusCode {
        match self {
            MarkError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            MarkError::NotFound(_) => StatusCode::NOT_FOUND,
            MarkError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for MarkError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match &self {
            MarkError::Validation(msg) | MarkError::NotFound(msg) => msg.clone(),
            MarkError::Persistence(e) => {
                tracing::error!(error = %crate::unpack_error(&**e), "persistence failure");
                "internal server error".to_string()
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
