/// Online scalar estimator over weighted observations.
///
/// Implementations accept values incrementally via [`add`] and expose the
/// current estimate via [`estimation`].
pub trait Estimator {
    /// Incorporates a new observation with the given weight.
    fn add(&mut self, v: f64, weight: f64);

    /// Returns the current estimate.
    fn estimation(&self) -> f64;
}
