use std::fmt;
use std::iter::FromIterator;
use std::ops::{Bound, Index, IndexMut, Mul, Neg, Range, RangeBounds};
use std::slice::{Iter, IterMut};

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::FormatConfig;
use crate::error::{shape_mismatch, LinalgError, Result};
use crate::math::matrix::Matrix;

/// Fixed-length sequence of `f64` components.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        Self::new(data)
    }

    pub fn from_slice(data: &[f64]) -> Self {
        Self::new(data.to_vec())
    }

    pub fn zeros(len: usize) -> Self {
        Self::new(vec![0.0; len])
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, f64> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, f64> {
        self.data.iter_mut()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn shape(&self) -> (usize,) {
        (self.len(),)
    }

    pub fn mapv<F>(&self, f: F) -> Vector
    where
        F: FnMut(&f64) -> f64,
    {
        self.data.iter().map(f).collect()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    pub fn get(&self, index: usize) -> Result<f64> {
        self.data
            .get(index)
            .copied()
            .ok_or(LinalgError::OutOfBounds {
                index,
                bound: self.len(),
            })
    }

    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        let bound = self.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(LinalgError::OutOfBounds { index, bound })?;
        *slot = value;
        Ok(())
    }

    /// Copy of the components selected by `range`.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Result<Vector> {
        let range = resolve_range(&range, self.len())?;
        Ok(Vector::from_slice(&self.data[range]))
    }

    /// Elementwise sum.
    pub fn add(&self, other: &Vector) -> Result<Vector> {
        self.check_len("vector add", other)?;
        Ok(self.iter().zip(other.iter()).map(|(a, b)| a + b).collect())
    }

    /// `self + (-other)`.
    pub fn sub(&self, other: &Vector) -> Result<Vector> {
        self.add(&-other)
    }

    /// Sums every term; `Ok(None)` for an empty sequence (the additive identity).
    pub fn sum_all<'a, I>(terms: I) -> Result<Option<Vector>>
    where
        I: IntoIterator<Item = &'a Vector>,
    {
        let mut acc: Option<Vector> = None;
        for term in terms {
            acc = Some(match acc {
                None => term.clone(),
                Some(sum) => sum.add(term)?,
            });
        }
        Ok(acc)
    }

    /// Multiplies every component by `scalar`, failing when it has no `f64` value.
    pub fn scale<S>(&self, scalar: S) -> Result<Vector>
    where
        S: ToPrimitive + fmt::Debug,
    {
        let factor = to_factor(&scalar)?;
        Ok(self * factor)
    }

    /// Euclidean norm.
    pub fn magnitude(&self) -> f64 {
        self.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    pub fn normalized(&self) -> Result<Vector> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Err(LinalgError::DivideByZero);
        }
        Ok(self * (1.0 / magnitude))
    }

    /// Truthiness: any nonzero magnitude.
    pub fn is_nonzero(&self) -> bool {
        self.magnitude() != 0.0
    }

    /// Standard inner product.
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        self.check_len("vector dot", other)?;
        Ok(dot_scalar_f64(self.as_slice(), other.as_slice()))
    }

    /// Promotes the vector to a single-row matrix.
    pub fn transpose(&self) -> Matrix {
        Matrix::from_raw(1, self.len(), self.to_vec())
    }

    pub fn render_with(&self, cfg: &FormatConfig) -> String {
        let cells: Vec<String> = self
            .iter()
            .map(|v| format!("{:.p$}", v, p = cfg.precision))
            .collect();
        format!("Vector({})", cells.join(", "))
    }

    fn check_len(&self, op: &'static str, other: &Vector) -> Result<()> {
        if self.len() != other.len() {
            return Err(shape_mismatch(
                op,
                format!("length {}", self.len()),
                format!("length {}", other.len()),
            ));
        }
        Ok(())
    }
}

fn dot_scalar_f64(lhs: &[f64], rhs: &[f64]) -> f64 {
    lhs.iter().zip(rhs.iter()).map(|(a, b)| a * b).sum()
}

pub(crate) fn to_factor<S>(scalar: &S) -> Result<f64>
where
    S: ToPrimitive + fmt::Debug,
{
    scalar
        .to_f64()
        .ok_or_else(|| LinalgError::TypeMismatch(format!("{:?} has no f64 value", scalar)))
}

/// Resolves any `RangeBounds` against a length, rejecting ranges that leave `0..len`.
pub(crate) fn resolve_range<R>(range: &R, len: usize) -> Result<Range<usize>>
where
    R: RangeBounds<usize> + ?Sized,
{
    let start = match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.checked_add(1).ok_or(LinalgError::OutOfBounds {
            index: s,
            bound: len,
        })?,
    };

    let end = match range.end_bound() {
        Bound::Unbounded => len,
        Bound::Included(&e) => e.checked_add(1).ok_or(LinalgError::OutOfBounds {
            index: e,
            bound: len,
        })?,
        Bound::Excluded(&e) => e,
    };

    if end > len {
        return Err(LinalgError::OutOfBounds {
            index: end - 1,
            bound: len,
        });
    }
    if start > end {
        return Err(LinalgError::OutOfBounds {
            index: start,
            bound: end,
        });
    }
    Ok(start..end)
}

impl From<Vec<f64>> for Vector {
    fn from(value: Vec<f64>) -> Self {
        Vector::from_vec(value)
    }
}

impl From<&[f64]> for Vector {
    fn from(value: &[f64]) -> Self {
        Vector::from_slice(value)
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(value: [f64; N]) -> Self {
        Vector::from_vec(value.to_vec())
    }
}

impl AsRef<[f64]> for Vector {
    fn as_ref(&self) -> &[f64] {
        &self.data
    }
}

impl From<Vector> for Vec<f64> {
    fn from(value: Vector) -> Self {
        value.data
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector::from_vec(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a f64;
    type IntoIter = Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        self.mapv(|x| -x)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, factor: f64) -> Self::Output {
        self.mapv(|x| x * factor)
    }
}

impl Mul<&Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: &Vector) -> Self::Output {
        rhs * self
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector(")?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, "{:?}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, ")")
    }
}
