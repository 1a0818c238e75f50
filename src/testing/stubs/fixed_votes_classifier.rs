use crate::classifiers::{Classifier, FitReport};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::ModelError;
use std::sync::Arc;

/// Returns the same votes for every instance once "trained".
pub struct FixedVotesClassifier {
    votes: Vec<f64>,
    trained: bool,
}

impl FixedVotesClassifier {
    pub fn new(votes: Vec<f64>) -> Self {
        Self {
            votes,
            trained: false,
        }
    }
}

impl Classifier for FixedVotesClassifier {
    fn get_votes_for_instance(&self, _instance: &dyn Instance) -> Option<Vec<f64>> {
        self.trained.then(|| self.votes.clone())
    }

    fn set_model_context(&mut self, _header: Arc<InstanceHeader>) {}

    fn train_on_instances(&mut self, instances: &[&dyn Instance]) -> Result<FitReport, ModelError> {
        self.trained = true;
        Ok(FitReport {
            iterations: 0,
            converged: true,
            training_instances: instances.len(),
        })
    }
}
