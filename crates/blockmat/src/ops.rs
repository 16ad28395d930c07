//! Free-standing helpers built on the math types.

use crate::error::{LinalgError, Result};
use crate::math::{Matrix, Vector};

/// Kronecker delta.
pub fn delta(i: usize, j: usize) -> f64 {
    if i == j {
        1.0
    } else {
        0.0
    }
}

/// Matrix power by repeated multiplication; see [`Matrix::power`].
pub fn square(mtx: &Matrix, exponent: usize) -> Result<Matrix> {
    mtx.power(exponent)
}

/// Angle in radians between two vectors.
///
/// The cosine is clamped to `[-1, 1]` so rounding on (anti)parallel inputs
/// cannot push it outside the domain of `acos`.
pub fn angle(v1: &Vector, v2: &Vector) -> Result<f64> {
    let norms = v1.magnitude() * v2.magnitude();
    if norms == 0.0 {
        return Err(LinalgError::DivideByZero);
    }
    let cos = v1.dot(v2)? / norms;
    Ok(cos.clamp(-1.0, 1.0).acos())
}
