use crate::core::attributes::{Attribute, AttributeRef, NominalAttribute};

/// Schema shared by every instance of a dataset: relation name, ordered
/// attributes and the position of the class attribute.
///
/// Every attribute other than the class is a feature. Feature order is the
/// attribute order with the class skipped, and it is the order expected by
/// feature vectors handed to a classifier.
#[derive(Clone)]
pub struct InstanceHeader {
    pub relation_name: String,
    pub attributes: Vec<AttributeRef>,
    pub class_index: usize,
}

impl InstanceHeader {
    pub fn new(
        relation_name: String,
        attributes: Vec<AttributeRef>,
        class_index: usize,
    ) -> InstanceHeader {
        InstanceHeader {
            relation_name,
            attributes,
            class_index,
        }
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute> {
        self.attributes.get(index).map(|a| a.as_ref())
    }

    /// The attribute at `index` if it is nominal.
    pub fn nominal_attribute_at(&self, index: usize) -> Option<&NominalAttribute> {
        self.attribute_at_index(index)?
            .as_any()
            .downcast_ref::<NominalAttribute>()
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    pub fn class_attribute(&self) -> Option<&NominalAttribute> {
        self.nominal_attribute_at(self.class_index)
    }

    /// Number of labels of the class attribute, or 0 if it is not nominal.
    pub fn number_of_classes(&self) -> usize {
        self.class_attribute()
            .map(NominalAttribute::number_of_values)
            .unwrap_or(0)
    }

    pub fn class_labels(&self) -> Vec<String> {
        self.class_attribute()
            .map(|c| c.values.clone())
            .unwrap_or_default()
    }

    pub fn number_of_features(&self) -> usize {
        self.feature_indices().count()
    }

    /// Attribute indices of the features, in feature order.
    pub fn feature_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.attributes.len()).filter(move |&i| i != self.class_index)
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.feature_indices()
            .map(|i| self.attributes[i].name())
            .collect()
    }
}
