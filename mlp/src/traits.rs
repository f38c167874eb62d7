use std::fmt::Debug;

use ndarray::prelude::*;

pub trait ActivationFn: Copy + Clone + Debug {
    fn f(self, x: f64) -> f64;

    /// Derivative of `f`. Callers pass the pre-activation sum `x`, never the
    /// output `f(x)`.
    fn df(self, x: f64) -> f64;
}

/// A measure of how far a prediction `yh` is from the target `y`.
///
/// Used for reporting progress; the update rule itself does not consult it.
pub trait Loss: Debug {
    fn loss(&self, y: ArrayView1<'_, f64>, yh: ArrayView1<'_, f64>) -> f64;
    fn accuracy(&self, y: ArrayView1<'_, f64>, yh: ArrayView1<'_, f64>) -> f64;
}
