use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::DatasetError;

/// Pull-based source of labeled `Instance`s.
///
/// All returned instances conform to the same, immutable
/// [`InstanceHeader`] for the lifetime of the stream.
pub trait Stream {
    /// Returns the stream header (relation name, attributes, class index).
    fn header(&self) -> &InstanceHeader;

    /// Indicates whether the stream *may* produce more instances.
    ///
    /// If it returns `false`, a subsequent call to [`next_instance`] must
    /// return `None`.
    fn has_more_instances(&self) -> bool;

    /// Produces the next instance, or `None` if the stream is exhausted.
    ///
    /// Malformed records are skipped rather than ending the stream.
    fn next_instance(&mut self) -> Option<Box<dyn Instance>>;
}

/// Drains `stream` into memory, dropping instances whose class is missing.
pub fn collect_instances(stream: &mut dyn Stream) -> Result<Vec<Box<dyn Instance>>, DatasetError> {
    let mut out = Vec::new();
    while stream.has_more_instances() {
        let Some(instance) = stream.next_instance() else {
            break;
        };
        if instance.is_class_missing() {
            continue;
        }
        out.push(instance);
    }
    if out.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(out)
}
