use crate::core::instance_header::InstanceHeader;

/// A single row conforming to an [`InstanceHeader`].
///
/// Missing values, including a missing class, are stored as `NaN`.
pub trait Instance: Send + Sync {
    fn weight(&self) -> f64;

    fn class_value(&self) -> Option<f64>;

    fn is_class_missing(&self) -> bool;

    /// Feature values in header feature order, class excluded.
    fn feature_values(&self) -> Vec<f64>;

    fn header(&self) -> &InstanceHeader;
}

/// Borrows each boxed instance, preserving order.
pub fn as_instance_refs(instances: &[Box<dyn Instance>]) -> Vec<&dyn Instance> {
    instances.iter().map(|b| b.as_ref()).collect()
}
