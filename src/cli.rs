use crate::config::{LogFormat, ServerConfig};
use crate::error::ConfigError;
use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Args, Parser, Subcommand};
use strum::VariantNames;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "sepal",
    version,
    about = "Fit a logistic-regression classifier and serve its predictions over HTTP"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub overrides: Overrides,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Fit the model and serve it (default).
    Serve,
    /// Fit the model, print holdout metrics as JSON and exit.
    Evaluate,
}

/// Flags that take precedence over the configuration file.
#[derive(Debug, Default, Args)]
pub struct Overrides {
    /// JSON configuration file.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:5000.
    #[arg(short, long, global = true, value_name = "ADDR")]
    pub bind: Option<String>,

    /// ARFF dataset to fit on instead of the bundled Iris data.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub dataset: Option<PathBuf>,

    /// Zero-based index of the class attribute.
    #[arg(long, global = true)]
    pub class_index: Option<usize>,

    /// Class label whose probability /score returns.
    #[arg(long, global = true)]
    pub score_class: Option<String>,

    /// Log output format.
    #[arg(long, global = true, value_parser = log_format_parser())]
    pub log_format: Option<LogFormat>,

    /// Enable debug logging for this crate.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

fn log_format_parser() -> impl TypedValueParser<Value = LogFormat> {
    PossibleValuesParser::new(LogFormat::VARIANTS.iter().copied())
        .try_map(|name| name.parse::<LogFormat>())
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }

    /// Defaults, then the config file if given, then command-line flags.
    pub fn load_config(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.overrides.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };
        self.overrides.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}

impl Overrides {
    pub fn apply(&self, config: &mut ServerConfig) {
        if let Some(bind) = &self.bind {
            config.bind_address = bind.clone();
        }
        if let Some(dataset) = &self.dataset {
            config.dataset = Some(dataset.clone());
        }
        if let Some(class_index) = self.class_index {
            config.class_index = Some(class_index);
        }
        if let Some(score_class) = &self.score_class {
            config.score_class = Some(score_class.clone());
        }
        if let Some(log_format) = self.log_format {
            config.log_format = log_format;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["sepal"]).unwrap();
        assert_eq!(cli.command(), Command::Serve);
        assert_eq!(cli.load_config().unwrap(), ServerConfig::default());
    }

    #[test]
    fn flags_override_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"bind_address": "0.0.0.0:9000", "score_class": "a"}}"#).unwrap();
        let path = f.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from([
            "sepal",
            "evaluate",
            "--config",
            &path,
            "--bind",
            "127.0.0.1:7000",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.command(), Command::Evaluate);
        let config = cli.load_config().unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:7000");
        assert_eq!(config.score_class.as_deref(), Some("a"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_log_format_lists_choices() {
        let err = Cli::try_parse_from(["sepal", "--log-format", "xml"]).unwrap_err();
        assert!(err.to_string().contains("full, compact, json"), "{err}");
    }

    #[test]
    fn invalid_file_values_fail_validation() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"holdout_fraction": 2.0}}"#).unwrap();
        let path = f.path().to_str().unwrap().to_string();
        let cli = Cli::try_parse_from(["sepal", "-c", &path]).unwrap();
        assert!(matches!(cli.load_config(), Err(ConfigError::Invalid(_))));
    }
}
