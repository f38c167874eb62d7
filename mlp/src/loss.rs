//! Loss functions.

use ndarray::prelude::*;
use ndarray::Zip;

use crate::traits::Loss;

/// Half the sum of squared differences, `½ Σ (y - yh)²`.
///
/// This is the loss whose gradient the network's update rule descends.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredError;

impl Loss for SquaredError {
    fn loss(&self, y: ArrayView1<'_, f64>, yh: ArrayView1<'_, f64>) -> f64 {
        assert_eq!(y.shape(), yh.shape());
        0.5 * (&y - &yh).mapv(|d| d * d).sum()
    }

    /// Fraction of outputs that land on the same side of 0.5 as the target.
    fn accuracy(&self, y: ArrayView1<'_, f64>, yh: ArrayView1<'_, f64>) -> f64 {
        assert_eq!(y.shape(), yh.shape());
        let n = y.len();
        if n == 0 {
            return 1.0;
        }
        let mut num_good = 0;
        Zip::from(&y).and(&yh).for_each(|&y, &yh| {
            if (y >= 0.5) == (yh >= 0.5) {
                num_good += 1;
            }
        });
        num_good as f64 / n as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_error() {
        let y = array![1.0, 0.0, 0.5];
        let yh = array![0.5, 0.25, 0.5];
        assert_eq!(SquaredError.loss(y.view(), y.view()), 0.0);
        assert!((SquaredError.loss(y.view(), yh.view()) - 0.5 * (0.25 + 0.0625)).abs() < 1e-12);
    }

    #[test]
    fn accuracy() {
        let y = array![1.0, 0.0, 1.0, 0.0];
        let yh = array![0.9, 0.1, 0.4, 0.7];
        assert_eq!(SquaredError.accuracy(y.view(), yh.view()), 0.5);
    }
}
