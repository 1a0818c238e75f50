use crate::core::instance_header::InstanceHeader;
use crate::core::instances::instance::Instance;
use std::sync::Arc;

pub struct DenseInstance {
    pub header: Arc<InstanceHeader>,
    pub values: Vec<f64>,
    pub weight: f64,
}

impl DenseInstance {
    pub fn new(header: Arc<InstanceHeader>, values: Vec<f64>, weight: f64) -> DenseInstance {
        DenseInstance {
            header,
            values,
            weight,
        }
    }

    /// Builds an unlabeled instance from values given in feature order.
    ///
    /// The caller guarantees `features.len() == header.number_of_features()`;
    /// surplus values are dropped and absent ones are missing.
    pub fn from_features(header: Arc<InstanceHeader>, features: &[f64]) -> DenseInstance {
        let mut values = vec![f64::NAN; header.number_of_attributes()];
        for (slot, &value) in header.feature_indices().zip(features) {
            values[slot] = value;
        }
        DenseInstance::new(header, values, 1.0)
    }
}

impl Instance for DenseInstance {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn class_value(&self) -> Option<f64> {
        self.values.get(self.header.class_index()).copied()
    }

    fn is_class_missing(&self) -> bool {
        self.class_value().is_none_or(f64::is_nan)
    }

    fn feature_values(&self) -> Vec<f64> {
        self.header
            .feature_indices()
            .map(|i| self.values.get(i).copied().unwrap_or(f64::NAN))
            .collect()
    }

    fn header(&self) -> &InstanceHeader {
        &self.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::header_iris_like;

    #[test]
    fn from_features_leaves_class_missing() {
        let h = header_iris_like();
        let inst = DenseInstance::from_features(Arc::clone(&h), &[5.1, 3.5, 1.4, 0.2]);
        assert!(inst.is_class_missing());
        assert_eq!(inst.feature_values(), vec![5.1, 3.5, 1.4, 0.2]);
        assert_eq!(inst.weight(), 1.0);
    }

    #[test]
    fn feature_values_skip_class_column() {
        let h = header_iris_like();
        let inst = DenseInstance::new(Arc::clone(&h), vec![1.0, 2.0, 3.0, 4.0, 2.0], 1.0);
        assert_eq!(inst.class_value(), Some(2.0));
        assert!(!inst.is_class_missing());
        assert_eq!(inst.feature_values(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn short_row_has_missing_class() {
        let h = header_iris_like();
        let inst = DenseInstance::new(h, vec![1.0], 1.0);
        assert!(inst.is_class_missing());
        assert!(inst.feature_values()[1].is_nan());
    }
}
