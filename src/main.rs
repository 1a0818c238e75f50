use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use sepal::app::{build_model, serve};
use sepal::cli::{Cli, Command};
use sepal::logging::init_logging;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config().context("invalid configuration")?;
    init_logging(config.log_format, cli.overrides.verbose).map_err(|e| anyhow!(e))?;

    let model = build_model(&config)?;

    match cli.command() {
        Command::Serve => serve(&config, Arc::new(model)).await,
        Command::Evaluate => {
            let report = json!({
                "relation": model.header().relation_name(),
                "fit": model.fit_report(),
                "holdout": model.holdout(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}
