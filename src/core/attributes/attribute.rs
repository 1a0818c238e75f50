use std::any::Any;
use std::sync::Arc;

/// A single column of a dataset schema.
pub trait Attribute: Any + Send + Sync {
    fn name(&self) -> String;

    fn as_any(&self) -> &dyn Any;
}

pub type AttributeRef = Arc<dyn Attribute>;
