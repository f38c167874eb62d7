//! Activation functions.

use crate::ActivationFn;

/// Largest magnitude passed to `exp` by [`sigmoid`]. The logistic function is
/// already saturated to within `f64` precision long before this point.
pub const SIGMOID_INPUT_LIMIT: f64 = 500.0;

/// The logistic function `1 / (1 + e^-x)`.
///
/// `x` is clamped to `±SIGMOID_INPUT_LIMIT` so the result is always finite for
/// finite or infinite input. NaN stays NaN.
pub fn sigmoid(x: f64) -> f64 {
    let x = x.clamp(-SIGMOID_INPUT_LIMIT, SIGMOID_INPUT_LIMIT);
    1.0 / (1.0 + (-x).exp())
}

/// The logistic function, a handy symmetric, s-shaped function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sigmoid;

impl ActivationFn for Sigmoid {
    fn f(self, x: f64) -> f64 {
        sigmoid(x)
    }

    fn df(self, x: f64) -> f64 {
        let y = sigmoid(x);
        y * (1.0 - y)
    }
}
