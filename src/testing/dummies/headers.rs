use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::instance_header::InstanceHeader;
use std::sync::Arc;

fn numeric(name: &str) -> AttributeRef {
    Arc::new(NumericAttribute::new(name.into()))
}

fn nominal(name: &str, labels: &[&str]) -> AttributeRef {
    Arc::new(NominalAttribute::from_labels(
        name.into(),
        labels.iter().map(|l| l.to_string()).collect(),
    ))
}

/// One numeric feature `x`, class `{A, B}` last.
pub fn header_binary_numeric() -> Arc<InstanceHeader> {
    Arc::new(InstanceHeader::new(
        "bin".into(),
        vec![numeric("x"), nominal("class", &["A", "B"])],
        1,
    ))
}

/// Same shape as the bundled Iris data.
pub fn header_iris_like() -> Arc<InstanceHeader> {
    Arc::new(InstanceHeader::new(
        "iris".into(),
        vec![
            numeric("sepal_length"),
            numeric("sepal_width"),
            numeric("petal_length"),
            numeric("petal_width"),
            nominal("class", &["Iris-setosa", "Iris-versicolor", "Iris-virginica"]),
        ],
        4,
    ))
}

pub fn header_single_class() -> Arc<InstanceHeader> {
    Arc::new(InstanceHeader::new(
        "one".into(),
        vec![numeric("x"), nominal("class", &["only"])],
        1,
    ))
}

/// Nominal `outlook {sunny, overcast, rainy}`, numeric `temperature`,
/// class `play {yes, no}` last.
pub fn header_weather_like() -> Arc<InstanceHeader> {
    Arc::new(InstanceHeader::new(
        "weather".into(),
        vec![
            nominal("outlook", &["sunny", "overcast", "rainy"]),
            numeric("temperature"),
            nominal("play", &["yes", "no"]),
        ],
        2,
    ))
}
