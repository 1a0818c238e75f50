mod dense_instance;
mod instance;

pub use dense_instance::DenseInstance;
pub use instance::{Instance, as_instance_refs};
