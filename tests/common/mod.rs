#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use sepal::app::build_model;
use sepal::config::ServerConfig;
use sepal::serving::ServedModel;
use sepal::web::router;
use tower::ServiceExt;

/// Iris model fitted once per test binary.
pub fn iris_model() -> Arc<ServedModel> {
    static MODEL: OnceLock<Arc<ServedModel>> = OnceLock::new();
    MODEL
        .get_or_init(|| Arc::new(build_model(&ServerConfig::default()).unwrap()))
        .clone()
}

pub fn app() -> Router {
    router(iris_model())
}

/// Router over a model fitted with `config`.
pub fn app_with(config: &ServerConfig) -> Router {
    router(Arc::new(build_model(config).unwrap()))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(uri: &str) -> TestResponse {
    send(
        app(),
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post_json(uri: &str, body: &str) -> TestResponse {
    post_json_to(app(), uri, body).await
}

pub async fn post_json_to(app: Router, uri: &str, body: &str) -> TestResponse {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}
