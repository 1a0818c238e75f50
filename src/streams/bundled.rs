use crate::error::DatasetError;
use crate::streams::ArffFileStream;

const IRIS_ARFF: &str = include_str!("../../data/iris.arff");

/// Fisher's Iris data: four numeric features, three classes, 150 rows.
pub fn bundled_iris() -> Result<ArffFileStream, DatasetError> {
    ArffFileStream::from_source(IRIS_ARFF, None)
}
