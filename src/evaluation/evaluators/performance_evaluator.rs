use crate::core::instances::Instance;
use crate::evaluation::Measurement;

/// Evaluator of predictive performance.
///
/// A `PerformanceEvaluator` consumes ground-truth examples and their
/// predicted class probabilities and exposes aggregated metrics via
/// [`performance`].
pub trait PerformanceEvaluator {
    /// Feeds one labeled example and its class votes (one score per class).
    ///
    /// Examples with a missing class, non-positive weight or unusable votes
    /// are skipped.
    fn add_result(&mut self, example: &dyn Instance, class_votes: Vec<f64>);

    /// Returns a snapshot of current metrics.
    fn performance(&self) -> Vec<Measurement>;
}

pub trait PerformanceEvaluatorExt {
    fn metric(&self, name: &str) -> Option<f64>;
}

impl<T: PerformanceEvaluator + ?Sized> PerformanceEvaluatorExt for T {
    fn metric(&self, name: &str) -> Option<f64> {
        self.performance()
            .into_iter()
            .find(|m| m.name == name)
            .map(|m| m.value)
    }
}
