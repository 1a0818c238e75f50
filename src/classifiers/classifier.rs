use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::ModelError;
use serde::Serialize;
use std::sync::Arc;

/// Outcome of a batch fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FitReport {
    pub iterations: usize,
    pub converged: bool,
    pub training_instances: usize,
}

pub trait Classifier: Send + Sync {
    /// Class probability vector for `instance`, or `None` when the model is
    /// unfitted or the instance cannot be scored.
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Option<Vec<f64>>;

    fn set_model_context(&mut self, header: Arc<InstanceHeader>);

    /// Fits from scratch on `instances`, replacing any previous fit.
    fn train_on_instances(&mut self, instances: &[&dyn Instance]) -> Result<FitReport, ModelError>;
}
