use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("expected {expected} feature values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("missing feature: {0}")]
    MissingFeature(String),

    #[error("invalid value for feature {name}: {value:?}")]
    InvalidFeatureValue { name: String, value: String },

    #[error("classifier produced no usable class probabilities")]
    NoUsableVotes,

    #[error("class attribute needs at least 2 labels, found {0}")]
    NotEnoughClasses(usize),

    #[error("no usable training instances")]
    EmptyTrainingSet,

    #[error("unknown class label: {0}")]
    UnknownClass(String),
}

impl ModelError {
    /// Errors caused by the caller's input rather than by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ModelError::DimensionMismatch { .. }
                | ModelError::MissingFeature(_)
                | ModelError::InvalidFeatureValue { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("no @data section found")]
    MissingData,

    #[error("class index {index} out of range for {attributes} attributes")]
    InvalidClassIndex { index: usize, attributes: usize },

    #[error("class attribute {0} is not nominal")]
    NonNominalClass(String),

    #[error("dataset contains no labeled instances")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
