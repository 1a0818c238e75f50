use crate::core::instances::Instance;
use crate::evaluation::{Estimator, Measurement, PerformanceEvaluator};
use crate::utils::math::{argmax, clamped_ln};

/// Batch classification evaluator over a weighted confusion matrix.
///
/// Reports:
/// - `accuracy` and `log_loss` as weighted means over evaluated examples;
/// - Cohen's `kappa` from the confusion matrix marginals;
/// - macro-averaged `precision`, `recall` and `f1` over classes where
///   they are defined;
/// - optionally `precision[<label>]` and `recall[<label>]` per class.
///
/// Votes are treated as probabilities for `log_loss`; they are normalized
/// if they do not sum to one.
pub struct BasicClassificationEvaluator<E: Estimator + Default> {
    labels: Vec<String>,
    // confusion[true][predicted]
    confusion: Vec<Vec<f64>>,
    accuracy: E,
    log_loss: E,
    total_weight: f64,
    show_per_class: bool,
}

impl<E: Estimator + Default> BasicClassificationEvaluator<E> {
    pub fn new(labels: Vec<String>, show_per_class: bool) -> Self {
        let k = labels.len();
        Self {
            labels,
            confusion: vec![vec![0.0; k]; k],
            accuracy: E::default(),
            log_loss: E::default(),
            total_weight: 0.0,
            show_per_class,
        }
    }

    pub fn confusion_matrix(&self) -> &[Vec<f64>] {
        &self.confusion
    }

    fn precision_of(&self, c: usize) -> f64 {
        let predicted: f64 = self.confusion.iter().map(|row| row[c]).sum();
        if predicted > 0.0 {
            self.confusion[c][c] / predicted
        } else {
            f64::NAN
        }
    }

    fn recall_of(&self, c: usize) -> f64 {
        let actual: f64 = self.confusion[c].iter().sum();
        if actual > 0.0 {
            self.confusion[c][c] / actual
        } else {
            f64::NAN
        }
    }

    fn kappa(&self) -> f64 {
        let total = self.total_weight;
        let k = self.labels.len();
        let p_o = (0..k).map(|c| self.confusion[c][c]).sum::<f64>() / total;
        let mut p_e = 0.0;
        for c in 0..k {
            let row: f64 = self.confusion[c].iter().sum();
            let col: f64 = self.confusion.iter().map(|r| r[c]).sum();
            p_e += (row / total) * (col / total);
        }
        let denom = 1.0 - p_e;
        if denom.abs() > f64::EPSILON {
            (p_o - p_e) / denom
        } else {
            f64::NAN
        }
    }
}

fn finite_mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n > 0 { sum / n as f64 } else { f64::NAN }
}

impl<E: Estimator + Default> PerformanceEvaluator for BasicClassificationEvaluator<E> {
    fn add_result(&mut self, example: &dyn Instance, class_votes: Vec<f64>) {
        let k = self.labels.len();
        let Some(yf) = example.class_value() else {
            return;
        };
        if !yf.is_finite() || yf < 0.0 || yf as usize >= k {
            return;
        }
        let y = yf as usize;

        let w = example.weight();
        if w.is_nan() || w <= 0.0 || class_votes.len() != k {
            return;
        }
        let Some(yhat) = argmax(&class_votes) else {
            return;
        };

        let sum: f64 = class_votes.iter().filter(|v| v.is_finite()).sum();
        let p_true = if sum > 0.0 { class_votes[y] / sum } else { 0.0 };

        self.total_weight += w;
        self.confusion[y][yhat] += w;
        self.accuracy.add(if yhat == y { 1.0 } else { 0.0 }, w);
        self.log_loss.add(-clamped_ln(p_true), w);
    }

    fn performance(&self) -> Vec<Measurement> {
        let k = self.labels.len();
        let mut m = vec![
            Measurement::new("accuracy", self.accuracy.estimation()),
            Measurement::new("log_loss", self.log_loss.estimation()),
        ];
        if self.total_weight <= 0.0 {
            m.push(Measurement::new("kappa", 0.0));
            return m;
        }
        m.push(Measurement::new("kappa", self.kappa()));

        let precision: Vec<f64> = (0..k).map(|c| self.precision_of(c)).collect();
        let recall: Vec<f64> = (0..k).map(|c| self.recall_of(c)).collect();
        let macro_precision = finite_mean(precision.iter().copied());
        let macro_recall = finite_mean(recall.iter().copied());
        let s = macro_precision + macro_recall;
        let macro_f1 = if s.is_finite() && s > f64::EPSILON {
            2.0 * macro_precision * macro_recall / s
        } else {
            f64::NAN
        };
        m.push(Measurement::new("precision", macro_precision));
        m.push(Measurement::new("recall", macro_recall));
        m.push(Measurement::new("f1", macro_f1));

        if self.show_per_class {
            for (c, label) in self.labels.iter().enumerate() {
                m.push(Measurement::new(format!("precision[{label}]"), precision[c]));
                m.push(Measurement::new(format!("recall[{label}]"), recall[c]));
            }
        }
        m
    }
}
