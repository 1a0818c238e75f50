use crate::config::ServerConfig;
use crate::core::instances::as_instance_refs;
use crate::serving::ServedModel;
use crate::streams::{ArffFileStream, bundled_iris, collect_instances};
use crate::web;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Loads the configured dataset and fits the model that will be served.
pub fn build_model(config: &ServerConfig) -> Result<ServedModel> {
    let mut stream = match &config.dataset {
        Some(path) => {
            info!(path = %path.display(), "loading dataset");
            ArffFileStream::new(path, config.class_index)
                .with_context(|| format!("failed to load dataset {}", path.display()))?
        }
        None => {
            info!("loading bundled iris dataset");
            bundled_iris().context("failed to parse bundled dataset")?
        }
    };
    let header = stream.header_arc();
    let rows = stream.number_of_rows();
    let instances = collect_instances(&mut stream).context("failed to read instances")?;
    if instances.len() < rows {
        warn!(
            skipped = rows - instances.len(),
            "rows dropped for parse errors or a missing class"
        );
    }
    info!(
        relation = header.relation_name(),
        instances = instances.len(),
        features = header.number_of_features(),
        classes = header.number_of_classes(),
        "dataset loaded"
    );

    let settings = config.model_settings()?;
    let model = ServedModel::fit(header, &as_instance_refs(&instances), &settings)
        .context("failed to fit model")?;
    Ok(model)
}

/// Serves `model` on the configured address until Ctrl-C.
pub async fn serve(config: &ServerConfig, model: Arc<ServedModel>) -> Result<()> {
    let listener = TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;
    info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, web::router(model))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
