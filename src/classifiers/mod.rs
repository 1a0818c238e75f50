pub mod classifier;
pub mod feature_encoder;
pub mod logistic_regression;

pub use classifier::{Classifier, FitReport};
pub use feature_encoder::{FeatureEncoder, label_index};
pub use logistic_regression::{LogisticRegression, LogisticRegressionParams, Penalty};
