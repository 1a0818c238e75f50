mod arff;
mod bundled;
mod stream;

pub use arff::ArffFileStream;
pub use bundled::bundled_iris;
pub use stream::{Stream, collect_instances};
