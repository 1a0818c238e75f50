use crate::evaluation::estimators::Estimator;

/// Weighted mean estimator: `mean = sum(w * v) / sum(w)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicEstimator {
    weight: f64,
    sum: f64,
}

impl Estimator for BasicEstimator {
    #[inline]
    fn add(&mut self, v: f64, weight: f64) {
        if v.is_nan() || weight.is_nan() || weight <= 0.0 {
            return;
        }
        self.weight += weight;
        self.sum += v * weight;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        if self.weight > 0.0 {
            self.sum / self.weight
        } else {
            f64::NAN
        }
    }
}
