use crate::classifiers::{Classifier, FeatureEncoder, FitReport};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::ModelError;
use crate::utils::math::{column_mean_std, softmax};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum_macros::{Display, EnumString};
use tracing::debug;

fn default_learning_rate() -> f64 {
    0.5
}

fn default_max_iterations() -> usize {
    1000
}

fn default_tolerance() -> f64 {
    1e-4
}

fn default_c() -> f64 {
    1.0
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Penalty {
    None,
    #[default]
    L2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LogisticRegressionParams {
    #[serde(default = "default_learning_rate")]
    #[schemars(
        title = "Learning Rate",
        description = "Gradient descent step size on standardized features",
        range(min = 0.0)
    )]
    pub learning_rate: f64,

    #[serde(default = "default_max_iterations")]
    #[schemars(title = "Max Iterations", range(min = 1))]
    pub max_iterations: usize,

    #[serde(default = "default_tolerance")]
    #[schemars(
        title = "Tolerance",
        description = "Stop once every gradient component is below this value"
    )]
    pub tolerance: f64,

    #[serde(default = "default_c")]
    #[schemars(
        title = "C",
        description = "Inverse of regularization strength",
        range(min = 0.0)
    )]
    pub c: f64,

    #[serde(default)]
    pub penalty: Penalty,
}

impl Default for LogisticRegressionParams {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            c: default_c(),
            penalty: Penalty::default(),
        }
    }
}

/// Standardized inputs are clamped to this many standard deviations so that
/// extreme but finite requests still produce finite logits.
const STANDARDIZED_LIMIT: f64 = 1e6;

struct Fitted {
    encoder: FeatureEncoder,
    mean: Vec<f64>,
    scale: Vec<f64>,
    // [class][feature]
    weights: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl Fitted {
    fn standardize(&self, features: &[f64]) -> Vec<f64> {
        features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| ((x - m) / s).clamp(-STANDARDIZED_LIMIT, STANDARDIZED_LIMIT))
            .collect()
    }

    fn logits(&self, z: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.intercepts)
            .map(|(w, b)| b + w.iter().zip(z).map(|(wj, xj)| wj * xj).sum::<f64>())
            .collect()
    }
}

/// Multinomial logistic regression fitted by full-batch gradient descent.
///
/// Nominal features are one-hot encoded, then every input is standardized
/// with the training mean and standard deviation.
/// The L2 penalty follows the `C` convention: the weight term of the mean
/// loss is `||w||^2 / (2 C n)` where `n` is the total training weight.
/// Intercepts are never penalized. Weights start at zero, so a fit is fully
/// determined by its input.
pub struct LogisticRegression {
    params: LogisticRegressionParams,
    header: Option<Arc<InstanceHeader>>,
    fitted: Option<Fitted>,
}

impl LogisticRegression {
    pub fn new(params: LogisticRegressionParams) -> Self {
        Self {
            params,
            header: None,
            fitted: None,
        }
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(LogisticRegressionParams::default())
    }
}

impl Classifier for LogisticRegression {
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Option<Vec<f64>> {
        let fitted = self.fitted.as_ref()?;
        let x = fitted.encoder.encode(&instance.feature_values())?;
        let z = fitted.standardize(&x);
        Some(softmax(&fitted.logits(&z)))
    }

    fn set_model_context(&mut self, header: Arc<InstanceHeader>) {
        self.header = Some(header);
        self.fitted = None;
    }

    fn train_on_instances(&mut self, instances: &[&dyn Instance]) -> Result<FitReport, ModelError> {
        let header: &InstanceHeader = match (&self.header, instances.first()) {
            (Some(h), _) => h.as_ref(),
            (None, Some(first)) => first.header(),
            (None, None) => return Err(ModelError::EmptyTrainingSet),
        };
        let k = header.number_of_classes();
        let encoder = FeatureEncoder::from_header(header);
        if k < 2 {
            return Err(ModelError::NotEnoughClasses(k));
        }

        let mut rows = Vec::with_capacity(instances.len());
        let mut labels = Vec::with_capacity(instances.len());
        let mut weights = Vec::with_capacity(instances.len());
        for inst in instances {
            let w = inst.weight();
            let Some(y) = inst.class_value() else {
                continue;
            };
            if !y.is_finite() || y < 0.0 || y as usize >= k || w.is_nan() || w <= 0.0 {
                continue;
            }
            let Some(x) = encoder.encode(&inst.feature_values()) else {
                continue;
            };
            rows.push(x);
            labels.push(y as usize);
            weights.push(w);
        }
        if rows.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }

        let d = encoder.width();
        let (mean, scale) = column_mean_std(&rows, d);
        let mut fitted = Fitted {
            encoder,
            mean,
            scale,
            weights: vec![vec![0.0; d]; k],
            intercepts: vec![0.0; k],
        };
        let z_rows: Vec<Vec<f64>> = rows.iter().map(|x| fitted.standardize(x)).collect();

        let total_weight: f64 = weights.iter().sum();
        let lambda = match self.params.penalty {
            Penalty::L2 => 1.0 / (self.params.c * total_weight),
            Penalty::None => 0.0,
        };

        let mut converged = false;
        let mut iterations = 0;
        while iterations < self.params.max_iterations {
            let mut grad_w = vec![vec![0.0; d]; k];
            let mut grad_b = vec![0.0; k];
            for ((z, &y), &w) in z_rows.iter().zip(&labels).zip(&weights) {
                let p = softmax(&fitted.logits(z));
                for c in 0..k {
                    let target = if c == y { 1.0 } else { 0.0 };
                    let err = (p[c] - target) * w;
                    grad_b[c] += err;
                    for (g, x) in grad_w[c].iter_mut().zip(z) {
                        *g += err * x;
                    }
                }
            }

            let mut max_grad: f64 = 0.0;
            for c in 0..k {
                grad_b[c] /= total_weight;
                max_grad = max_grad.max(grad_b[c].abs());
                for (g, w) in grad_w[c].iter_mut().zip(&fitted.weights[c]) {
                    *g = *g / total_weight + lambda * w;
                    max_grad = max_grad.max(g.abs());
                }
            }
            if max_grad < self.params.tolerance {
                converged = true;
                break;
            }

            let lr = self.params.learning_rate;
            for c in 0..k {
                fitted.intercepts[c] -= lr * grad_b[c];
                for (w, g) in fitted.weights[c].iter_mut().zip(&grad_w[c]) {
                    *w -= lr * g;
                }
            }
            iterations += 1;
        }

        debug!(
            iterations,
            converged,
            instances = rows.len(),
            classes = k,
            features = d,
            "logistic regression fitted"
        );
        self.fitted = Some(fitted);
        Ok(FitReport {
            iterations,
            converged,
            training_instances: rows.len(),
        })
    }
}
