use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors a handler can surface to the client. Every variant renders as the
/// standard envelope `{success: false, error: <code>, message: <text>}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest,
    #[error("resource not found")]
    NotFound,
    #[error("unprocessable")]
    Unprocessable,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("internal server error")]
    Database(#[from] sqlx::Error),
}

pub type JsonResult<T> = Result<Json<T>, ApiError>;

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Database(error) = &self {
            tracing::error!(%error, "store failure");
        }
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
