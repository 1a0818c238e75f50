use crate::error::ModelError;
use crate::web::models::ErrorResponse;
use crate::web::templates;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error};

fn status_for(err: &ModelError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn log_failure(status: StatusCode, message: &str) {
    if status.is_server_error() {
        error!(%status, "{message}");
    } else {
        debug!(%status, "{message}");
    }
}

/// Failure of a JSON endpoint, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Json(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Model(e) => (status_for(e), e.to_string()),
            ApiError::Json(rejection) => (rejection.status(), rejection.body_text()),
        };
        log_failure(status, &message);
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Failure of an HTML endpoint, rendered as an error page.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct PageError(#[from] pub ModelError);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let message = self.0.to_string();
        log_failure(status, &message);
        let title = status.canonical_reason().unwrap_or("Error");
        (status, Html(templates::error_page(title, &message).into_string())).into_response()
    }
}
