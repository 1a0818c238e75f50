//! Request and response bodies of the JSON endpoints.

use crate::tasks::HoldoutReport;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Body of `POST /score`: one feature vector in feature order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScoreRequest {
    pub example: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScoreResponse {
    /// Probability of the configured score class.
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub relation: String,
    pub features: Vec<String>,
    pub classes: Vec<String>,
    pub score_class: String,
    pub training_instances: usize,
    pub fitted_at: DateTime<Utc>,
    pub iterations: usize,
    pub converged: bool,
    pub holdout: Option<HoldoutReport>,
}
