pub mod events;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use eventlist_core::EventListError;
use serde::Serialize;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert eventlist errors to HTTP responses
pub struct AppError(EventListError);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0 {
            EventListError::NotFound(_) => StatusCode::NOT_FOUND,
            EventListError::InvalidId(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<EventListError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
