use crate::core::attributes::Attribute;
use std::any::Any;
use std::collections::HashMap;

/// A column drawn from a fixed, ordered set of labels.
///
/// The position of a label in `values` is the numeric value stored in an
/// instance, so the order must never change once instances exist.
#[derive(Debug, Clone)]
pub struct NominalAttribute {
    pub name: String,
    pub values: Vec<String>,
    pub label_to_index: HashMap<String, usize>,
}

impl NominalAttribute {
    /// Builds the label index from `values` in order.
    pub fn from_labels(name: String, values: Vec<String>) -> NominalAttribute {
        let label_to_index = values
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();
        NominalAttribute {
            name,
            values,
            label_to_index,
        }
    }

    pub fn index_of_value(&self, v: &str) -> Option<usize> {
        self.label_to_index.get(v).copied()
    }

    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn number_of_values(&self) -> usize {
        self.values.len()
    }
}

impl Attribute for NominalAttribute {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_labels_indexes_in_order() {
        let attr = NominalAttribute::from_labels(
            "class".into(),
            vec!["setosa".into(), "versicolor".into(), "virginica".into()],
        );
        assert_eq!(attr.index_of_value("versicolor"), Some(1));
        assert_eq!(attr.index_of_value("unknown"), None);
        assert_eq!(attr.value_at(2), Some("virginica"));
        assert_eq!(attr.value_at(3), None);
        assert_eq!(attr.number_of_values(), 3);
    }
}
