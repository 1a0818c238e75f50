mod served_model;

pub use served_model::{ClassProbability, FeatureField, ModelSettings, Prediction, ServedModel};
