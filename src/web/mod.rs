pub mod error;
pub mod handlers;
pub mod models;
pub mod templates;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::serving::ServedModel;

/// All routes, sharing one read-only model.
pub fn router(model: Arc<ServedModel>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/score", post(handlers::score))
        .route("/template_engine", get(handlers::template_engine))
        .route("/predict", get(handlers::predict).post(handlers::predict))
        .route("/health", get(handlers::health))
        .route("/model", get(handlers::model_info))
        .route("/schema", get(handlers::schema))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(model)
}
