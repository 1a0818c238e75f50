use crate::classifiers::{
    Classifier, FitReport, LogisticRegression, LogisticRegressionParams, label_index,
};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::error::ModelError;
use crate::tasks::{HoldoutEvaluation, HoldoutReport};
use crate::utils::math::argmax;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

pub struct ModelSettings {
    pub params: LogisticRegressionParams,
    pub holdout: HoldoutEvaluation,
    pub score_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassProbability {
    pub label: String,
    pub probability: f64,
}

/// A feature as shown on the form: its name, and its labels if nominal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureField {
    pub name: String,
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: String,
    pub class_index: usize,
    pub probabilities: Vec<ClassProbability>,
}

/// A classifier fitted once at startup and only read afterwards.
///
/// Shared across request handlers behind an `Arc`; nothing in here is
/// mutated after [`ServedModel::fit`] returns.
pub struct ServedModel {
    header: Arc<InstanceHeader>,
    classifier: Box<dyn Classifier>,
    fit: FitReport,
    holdout: Option<HoldoutReport>,
    fitted_at: DateTime<Utc>,
    score_class: usize,
}

impl ServedModel {
    pub fn fit(
        header: Arc<InstanceHeader>,
        instances: &[&dyn Instance],
        settings: &ModelSettings,
    ) -> Result<Self, ModelError> {
        let k = header.number_of_classes();
        if k < 2 {
            return Err(ModelError::NotEnoughClasses(k));
        }
        let score_class = match &settings.score_class {
            Some(label) => header
                .class_attribute()
                .and_then(|c| c.index_of_value(label))
                .ok_or_else(|| ModelError::UnknownClass(label.clone()))?,
            None => 1,
        };

        let make = || LogisticRegression::new(settings.params.clone());
        let holdout = settings.holdout.run(make, &header, instances)?;
        if let Some(report) = &holdout {
            let summary: Vec<String> = report.measurements.iter().map(|m| m.to_string()).collect();
            info!("holdout metrics: {}", summary.join(" "));
        }

        let mut classifier = make();
        classifier.set_model_context(Arc::clone(&header));
        let fit = classifier.train_on_instances(instances)?;
        if fit.converged {
            info!(iterations = fit.iterations, "model converged");
        } else {
            warn!(
                iterations = fit.iterations,
                "model did not converge; consider raising max_iterations"
            );
        }

        Ok(Self {
            header,
            classifier: Box::new(classifier),
            fit,
            holdout,
            fitted_at: Utc::now(),
            score_class,
        })
    }

    pub fn header(&self) -> &InstanceHeader {
        &self.header
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.header.feature_names()
    }

    pub fn class_labels(&self) -> Vec<String> {
        self.header.class_labels()
    }

    pub fn score_class_label(&self) -> String {
        self.header
            .class_attribute()
            .and_then(|c| c.value_at(self.score_class))
            .unwrap_or_default()
            .to_string()
    }

    pub fn fit_report(&self) -> FitReport {
        self.fit
    }

    pub fn holdout(&self) -> Option<&HoldoutReport> {
        self.holdout.as_ref()
    }

    pub fn fitted_at(&self) -> DateTime<Utc> {
        self.fitted_at
    }

    /// One entry per feature, with the labels of nominal features.
    pub fn feature_fields(&self) -> Vec<FeatureField> {
        self.header
            .feature_indices()
            .map(|i| FeatureField {
                name: self.header.attributes[i].name(),
                labels: self.header.nominal_attribute_at(i).map(|a| a.values.clone()),
            })
            .collect()
    }

    /// Builds an instance from values given in feature order. A nominal
    /// feature takes the index of one of its labels.
    pub fn features_from_slice(&self, values: &[f64]) -> Result<DenseInstance, ModelError> {
        let expected = self.header.number_of_features();
        if values.len() != expected {
            return Err(ModelError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }
        for (i, &v) in self.header.feature_indices().zip(values) {
            let valid = match self.header.nominal_attribute_at(i) {
                Some(attr) => label_index(v, attr.number_of_values()).is_some(),
                None => v.is_finite(),
            };
            if !valid {
                return Err(ModelError::InvalidFeatureValue {
                    name: self.header.attributes[i].name(),
                    value: v.to_string(),
                });
            }
        }
        Ok(DenseInstance::from_features(Arc::clone(&self.header), values))
    }

    /// Reads every feature by name from `params`; other keys are ignored.
    /// Nominal features are given by label.
    pub fn features_from_params(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<DenseInstance, ModelError> {
        let mut values = Vec::with_capacity(self.header.number_of_features());
        for i in self.header.feature_indices() {
            let name = self.header.attributes[i].name();
            let raw = params
                .get(&name)
                .ok_or_else(|| ModelError::MissingFeature(name.clone()))?;
            let value = match self.header.nominal_attribute_at(i) {
                Some(attr) => attr.index_of_value(raw.trim()).map(|v| v as f64),
                None => raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            };
            match value {
                Some(v) => values.push(v),
                None => {
                    return Err(ModelError::InvalidFeatureValue {
                        name,
                        value: raw.clone(),
                    });
                }
            }
        }
        Ok(DenseInstance::from_features(Arc::clone(&self.header), &values))
    }

    /// Feature names with their values as a user would type them: labels for
    /// nominal features, numbers otherwise.
    pub fn describe_features(&self, instance: &dyn Instance) -> Vec<(String, String)> {
        self.header
            .feature_indices()
            .zip(instance.feature_values())
            .map(|(i, v)| {
                let shown = self
                    .header
                    .nominal_attribute_at(i)
                    .and_then(|attr| attr.value_at(label_index(v, attr.number_of_values())?))
                    .map(str::to_string)
                    .unwrap_or_else(|| v.to_string());
                (self.header.attributes[i].name(), shown)
            })
            .collect()
    }

    pub fn predict_proba(&self, instance: &dyn Instance) -> Result<Vec<ClassProbability>, ModelError> {
        let votes = self
            .classifier
            .get_votes_for_instance(instance)
            .filter(|v| v.iter().all(|p| p.is_finite()))
            .ok_or(ModelError::NoUsableVotes)?;
        Ok(self
            .header
            .class_labels()
            .into_iter()
            .zip(votes)
            .map(|(label, probability)| ClassProbability { label, probability })
            .collect())
    }

    pub fn predict(&self, instance: &dyn Instance) -> Result<Prediction, ModelError> {
        let probabilities = self.predict_proba(instance)?;
        let p: Vec<f64> = probabilities.iter().map(|c| c.probability).collect();
        let class_index = argmax(&p).ok_or(ModelError::NoUsableVotes)?;
        Ok(Prediction {
            label: probabilities[class_index].label.clone(),
            class_index,
            probabilities,
        })
    }

    /// Probability of the configured score class for a raw feature vector.
    pub fn score(&self, values: &[f64]) -> Result<f64, ModelError> {
        let instance = self.features_from_slice(values)?;
        let probabilities = self.predict_proba(&instance)?;
        probabilities
            .get(self.score_class)
            .map(|c| c.probability)
            .ok_or(ModelError::NoUsableVotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::instances::as_instance_refs;
    use crate::streams::{bundled_iris, collect_instances};
    use crate::tasks::DEFAULT_SEED;
    use crate::testing::CapturedLogs;
    use crate::testing::dummies::header_weather_like;

    fn settings(score_class: Option<&str>) -> ModelSettings {
        ModelSettings {
            params: LogisticRegressionParams::default(),
            holdout: HoldoutEvaluation::new(0.2, DEFAULT_SEED).unwrap(),
            score_class: score_class.map(str::to_string),
        }
    }

    fn iris_model(score_class: Option<&str>) -> ServedModel {
        let mut s = bundled_iris().unwrap();
        let header = s.header_arc();
        let data = collect_instances(&mut s).unwrap();
        ServedModel::fit(header, &as_instance_refs(&data), &settings(score_class)).unwrap()
    }

    #[test]
    fn predicts_obvious_setosa() {
        let model = iris_model(None);
        let inst = model.features_from_slice(&[5.1, 3.5, 1.4, 0.2]).unwrap();
        let pred = model.predict(&inst).unwrap();
        assert_eq!(pred.label, "Iris-setosa");
        assert_eq!(pred.class_index, 0);
        assert_eq!(pred.probabilities.len(), 3);
        let total: f64 = pred.probabilities.iter().map(|c| c.probability).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn predicts_obvious_virginica() {
        let model = iris_model(None);
        let inst = model.features_from_slice(&[7.7, 3.0, 6.1, 2.3]).unwrap();
        assert_eq!(model.predict(&inst).unwrap().label, "Iris-virginica");
    }

    #[test]
    fn score_defaults_to_second_class() {
        let model = iris_model(None);
        assert_eq!(model.score_class_label(), "Iris-versicolor");
        let versicolor = model.score(&[6.0, 2.7, 4.2, 1.3]).unwrap();
        let setosa = model.score(&[5.0, 3.4, 1.5, 0.2]).unwrap();
        assert!(versicolor > 0.5);
        assert!(setosa < 0.2);
    }

    #[test]
    fn score_class_can_be_chosen_by_label() {
        let model = iris_model(Some("Iris-setosa"));
        assert!(model.score(&[5.0, 3.4, 1.5, 0.2]).unwrap() > 0.8);
    }

    #[test]
    fn unknown_score_class_is_rejected() {
        let mut s = bundled_iris().unwrap();
        let header = s.header_arc();
        let data = collect_instances(&mut s).unwrap();
        let err = ServedModel::fit(header, &as_instance_refs(&data), &settings(Some("rose")))
            .err()
            .unwrap();
        assert!(matches!(err, ModelError::UnknownClass(l) if l == "rose"));
    }

    #[test]
    fn dimension_is_enforced() {
        let model = iris_model(None);
        let err = model.score(&[1.0, 2.0]).err().unwrap();
        assert!(matches!(
            err,
            ModelError::DimensionMismatch {
                expected: 4,
                actual: 2
            }
        ));
        assert!(err.is_client_error());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let model = iris_model(None);
        let err = model
            .features_from_slice(&[1.0, f64::INFINITY, 1.0, 1.0])
            .err()
            .unwrap();
        assert!(matches!(err, ModelError::InvalidFeatureValue { name, .. } if name == "sepal_width"));
    }

    #[test]
    fn params_are_read_by_feature_name() {
        let model = iris_model(None);
        let mut params: HashMap<String, String> = [
            ("sepal_length", "5.1"),
            ("sepal_width", " 3.5"),
            ("petal_length", "1.4"),
            ("petal_width", "0.2"),
            ("unrelated", "x"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let inst = model.features_from_params(&params).unwrap();
        assert_eq!(inst.feature_values(), vec![5.1, 3.5, 1.4, 0.2]);

        params.insert("petal_width".into(), "wide".into());
        let err = model.features_from_params(&params).err().unwrap();
        assert!(matches!(err, ModelError::InvalidFeatureValue { name, value } if name == "petal_width" && value == "wide"));

        params.insert("petal_width".into(), "NaN".into());
        assert!(model.features_from_params(&params).is_err());

        params.remove("sepal_length");
        let err = model.features_from_params(&params).err().unwrap();
        assert!(matches!(err, ModelError::MissingFeature(n) if n == "sepal_length"));
    }

    fn weather_model() -> ServedModel {
        let h = header_weather_like();
        let data: Vec<Box<dyn Instance>> = [(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]
            .into_iter()
            .cycle()
            .take(12)
            .enumerate()
            .map(|(i, (outlook, play))| {
                Box::new(DenseInstance::new(
                    Arc::clone(&h),
                    vec![outlook, 60.0 + i as f64, play],
                    1.0,
                )) as Box<dyn Instance>
            })
            .collect();
        let settings = ModelSettings {
            holdout: HoldoutEvaluation::new(0.0, DEFAULT_SEED).unwrap(),
            ..settings(Some("no"))
        };
        ServedModel::fit(h, &as_instance_refs(&data), &settings).unwrap()
    }

    fn params_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn nominal_params_are_read_by_label() {
        let model = weather_model();
        let inst = model
            .features_from_params(&params_of(&[("outlook", "overcast"), ("temperature", "66")]))
            .unwrap();
        assert_eq!(inst.feature_values(), vec![1.0, 66.0]);
        assert_eq!(model.predict(&inst).unwrap().label, "no");
        assert_eq!(
            model.describe_features(&inst),
            vec![
                ("outlook".to_string(), "overcast".to_string()),
                ("temperature".to_string(), "66".to_string())
            ]
        );

        let sunny = model
            .features_from_params(&params_of(&[("outlook", "sunny"), ("temperature", "80")]))
            .unwrap();
        assert_eq!(model.predict(&sunny).unwrap().label, "yes");

        let err = model
            .features_from_params(&params_of(&[("outlook", "0"), ("temperature", "80")]))
            .err()
            .unwrap();
        assert!(matches!(err, ModelError::InvalidFeatureValue { name, .. } if name == "outlook"));
    }

    #[test]
    fn nominal_slice_values_must_be_label_indices() {
        let model = weather_model();
        assert!(model.score(&[2.0, 70.0]).unwrap() < 0.5);
        for bad in [[3.0, 70.0], [0.5, 70.0], [-1.0, 70.0]] {
            let err = model.score(&bad).err().unwrap();
            assert!(err.is_client_error());
            assert!(matches!(err, ModelError::InvalidFeatureValue { name, .. } if name == "outlook"));
        }
    }

    #[test]
    fn feature_fields_carry_labels() {
        let fields = weather_model().feature_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(
            fields[0].labels.as_deref(),
            Some(&["sunny".to_string(), "overcast".to_string(), "rainy".to_string()][..])
        );
        assert_eq!(fields[1].name, "temperature");
        assert!(fields[1].labels.is_none());
    }

    #[test]
    fn huge_finite_values_still_score() {
        let model = iris_model(None);
        let score = model.score(&[1e308, -1e308, 1e308, -1e308]).unwrap();
        assert!((0.0..=1.0).contains(&score));
        let inst = model.features_from_slice(&[f64::MAX; 4]).unwrap();
        assert!(model.predict(&inst).is_ok());
    }

    #[test]
    fn unconverged_fit_is_served_with_a_warning() {
        let mut s = bundled_iris().unwrap();
        let header = s.header_arc();
        let data = collect_instances(&mut s).unwrap();
        let settings = ModelSettings {
            params: LogisticRegressionParams {
                max_iterations: 2,
                ..Default::default()
            },
            ..settings(None)
        };
        let logs = CapturedLogs::default();
        let model = logs
            .capture(|| ServedModel::fit(header, &as_instance_refs(&data), &settings))
            .unwrap();

        assert!(!model.fit_report().converged);
        assert_eq!(model.fit_report().iterations, 2);
        assert!(model.score(&[6.0, 2.7, 4.2, 1.3]).is_ok());
        let out = logs.contents();
        assert!(out.contains("WARN"), "{out}");
        assert!(out.contains("did not converge"), "{out}");
    }

    #[test]
    fn records_fit_and_holdout() {
        let model = iris_model(None);
        assert_eq!(model.fit_report().training_instances, 150);
        let holdout = model.holdout().unwrap();
        assert_eq!(holdout.test_size, 30);
        assert!(model.fitted_at() <= Utc::now());
    }
}
