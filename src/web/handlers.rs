//! HTTP handlers. Every handler only reads the shared model.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::{StatusCode, Uri},
    response::Html,
};
use schemars::schema_for;
use serde_json::{Value, json};

use super::error::{ApiError, PageError};
use super::models::{HealthResponse, ModelInfo, ScoreRequest, ScoreResponse};
use super::templates;
use crate::serving::ServedModel;

/// Static landing page.
pub async fn index() -> Html<String> {
    Html(templates::index_page().into_string())
}

/// Probability of the score class for a JSON feature vector.
pub async fn score(
    State(model): State<Arc<ServedModel>>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let Json(request) = payload?;
    let score = model.score(&request.example)?;
    Ok(Json(ScoreResponse { score }))
}

/// Template-rendered list of the model's feature names.
pub async fn template_engine(State(model): State<Arc<ServedModel>>) -> Html<String> {
    Html(templates::template_engine_page(&model.feature_fields()).into_string())
}

/// Reads one value per feature from the query string and renders the
/// class probabilities.
pub async fn predict(
    State(model): State<Arc<ServedModel>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, PageError> {
    let instance = model.features_from_params(&params)?;
    let prediction = model.predict(&instance)?;
    let inputs = model.describe_features(&instance);
    Ok(Html(
        templates::prediction_page(&inputs, &prediction).into_string(),
    ))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn model_info(State(model): State<Arc<ServedModel>>) -> Json<ModelInfo> {
    let fit = model.fit_report();
    Json(ModelInfo {
        relation: model.header().relation_name().to_string(),
        features: model.feature_names(),
        classes: model.class_labels(),
        score_class: model.score_class_label(),
        training_instances: fit.training_instances,
        fitted_at: model.fitted_at(),
        iterations: fit.iterations,
        converged: fit.converged,
        holdout: model.holdout().cloned(),
    })
}

/// JSON Schemas of the `/score` request and response bodies.
pub async fn schema() -> Json<Value> {
    Json(json!({
        "score_request": schema_for!(ScoreRequest),
        "score_response": schema_for!(ScoreResponse),
    }))
}

pub async fn not_found(uri: Uri) -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(templates::not_found_page(uri.path()).into_string()),
    )
}
