use crate::core::instance_header::InstanceHeader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Numeric,
    OneHot { labels: usize },
}

/// Maps feature values, in header feature order, onto the inputs of a
/// linear model.
///
/// Numeric features pass through. A nominal feature stores a label index,
/// which becomes one indicator input per label so that label order carries
/// no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureEncoder {
    columns: Vec<Column>,
    width: usize,
}

impl FeatureEncoder {
    pub fn from_header(header: &InstanceHeader) -> Self {
        let columns: Vec<Column> = header
            .feature_indices()
            .map(|i| match header.nominal_attribute_at(i) {
                Some(attr) => Column::OneHot {
                    labels: attr.number_of_values(),
                },
                None => Column::Numeric,
            })
            .collect();
        let width = columns
            .iter()
            .map(|c| match c {
                Column::Numeric => 1,
                Column::OneHot { labels } => *labels,
            })
            .sum();
        Self { columns, width }
    }

    /// Number of encoded inputs.
    pub fn width(&self) -> usize {
        self.width
    }

    /// `None` on a length mismatch, a non-finite numeric value, or a nominal
    /// value that is not a label index.
    pub fn encode(&self, features: &[f64]) -> Option<Vec<f64>> {
        if features.len() != self.columns.len() {
            return None;
        }
        let mut out = Vec::with_capacity(self.width);
        for (&x, column) in features.iter().zip(&self.columns) {
            match *column {
                Column::Numeric => {
                    if !x.is_finite() {
                        return None;
                    }
                    out.push(x);
                }
                Column::OneHot { labels } => {
                    let hot = label_index(x, labels)?;
                    out.extend((0..labels).map(|i| if i == hot { 1.0 } else { 0.0 }));
                }
            }
        }
        Some(out)
    }
}

/// `x` as an index into a label set of size `labels`, if it is one.
pub fn label_index(x: f64, labels: usize) -> Option<usize> {
    let valid = x.is_finite() && x >= 0.0 && x.fract() == 0.0 && (x as usize) < labels;
    valid.then_some(x as usize)
}
