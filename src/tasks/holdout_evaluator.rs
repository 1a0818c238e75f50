use crate::classifiers::{Classifier, FitReport};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::{ConfigError, ModelError};
use crate::evaluation::{
    BasicClassificationEvaluator, BasicEstimator, Measurement, PerformanceEvaluator,
    PerformanceEvaluatorExt,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Serialize)]
pub struct HoldoutReport {
    pub train_size: usize,
    pub test_size: usize,
    pub fit: FitReport,
    pub measurements: Vec<Measurement>,
    /// Test-split weights, `[true class][predicted class]`.
    pub confusion_matrix: Vec<Vec<f64>>,
}

/// Seeded train/test split used to estimate generalization before serving.
pub struct HoldoutEvaluation {
    fraction: f64,
    seed: u64,
}

impl HoldoutEvaluation {
    pub fn new(fraction: f64, seed: u64) -> Result<Self, ConfigError> {
        if !(0.0..1.0).contains(&fraction) {
            return Err(ConfigError::Invalid(format!(
                "holdout_fraction must be in [0, 1), got {fraction}"
            )));
        }
        Ok(Self { fraction, seed })
    }

    /// Shuffled `(train, test)` index sets. The test set is empty when the
    /// fraction is zero or there are fewer than two instances.
    pub fn split_indices(&self, n: usize) -> (Vec<usize>, Vec<usize>) {
        let mut idx: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        idx.shuffle(&mut rng);

        let test_n = if self.fraction == 0.0 || n < 2 {
            0
        } else {
            ((n as f64 * self.fraction).round() as usize).clamp(1, n - 1)
        };
        let test = idx.split_off(n - test_n);
        (idx, test)
    }

    /// Fits a fresh classifier on the training split and scores the test
    /// split. Returns `None` when there is nothing to hold out.
    pub fn run<C, F>(
        &self,
        make_classifier: F,
        header: &Arc<InstanceHeader>,
        instances: &[&dyn Instance],
    ) -> Result<Option<HoldoutReport>, ModelError>
    where
        C: Classifier,
        F: Fn() -> C,
    {
        let (train_idx, test_idx) = self.split_indices(instances.len());
        if test_idx.is_empty() {
            if self.fraction > 0.0 {
                warn!(instances = instances.len(), "too few instances for a holdout split");
            }
            return Ok(None);
        }

        let train: Vec<&dyn Instance> = train_idx.iter().map(|&i| instances[i]).collect();
        let mut classifier = make_classifier();
        classifier.set_model_context(Arc::clone(header));
        let fit = classifier.train_on_instances(&train)?;

        let mut evaluator =
            BasicClassificationEvaluator::<BasicEstimator>::new(header.class_labels(), true);
        for &i in &test_idx {
            let example = instances[i];
            if let Some(votes) = classifier.get_votes_for_instance(example) {
                evaluator.add_result(example, votes);
            }
        }

        let report = HoldoutReport {
            train_size: train.len(),
            test_size: test_idx.len(),
            fit,
            measurements: evaluator.performance(),
            confusion_matrix: evaluator.confusion_matrix().to_vec(),
        };
        info!(
            train = report.train_size,
            test = report.test_size,
            accuracy = evaluator.metric("accuracy").unwrap_or(f64::NAN),
            "holdout evaluation finished"
        );
        Ok(Some(report))
    }
}
