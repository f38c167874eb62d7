use ndarray::prelude::*;

use crate::error::{Error, Result, VectorKind};

/// Fail with `DimensionMismatch` unless `v` has exactly `expected` elements.
pub fn check_len(vector: VectorKind, expected: usize, v: ArrayView1<'_, f64>) -> Result<()> {
    let actual = v.len();
    if actual != expected {
        return Err(Error::DimensionMismatch {
            vector,
            expected,
            actual,
        });
    }
    Ok(())
}

pub fn all_finite(v: ArrayView1<'_, f64>) -> bool {
    v.iter().all(|x| x.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_check() {
        let v = array![1.0, 2.0, 3.0];
        assert_eq!(check_len(VectorKind::Input, 3, v.view()), Ok(()));
        assert_eq!(
            check_len(VectorKind::ExpectedOutput, 2, v.view()),
            Err(Error::DimensionMismatch {
                vector: VectorKind::ExpectedOutput,
                expected: 2,
                actual: 3,
            })
        );
    }

    #[test]
    fn finiteness() {
        assert!(all_finite(array![0.0, -1.0, 1e300].view()));
        assert!(all_finite(Array1::<f64>::zeros(0).view()));
        assert!(!all_finite(array![0.0, f64::NAN].view()));
        assert!(!all_finite(array![f64::NEG_INFINITY].view()));
    }
}
