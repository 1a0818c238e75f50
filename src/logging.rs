use crate::config::LogFormat;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SEPAL_LOG";

/// Filter used when `SEPAL_LOG` is unset.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose { "info,sepal=debug" } else { "info" }
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logging(
    format: LogFormat,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Full => builder.try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
}
