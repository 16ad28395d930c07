use std::fmt;
use std::ops::{
    Bound, Index, IndexMut, Mul, Neg, Range, RangeBounds, RangeFrom, RangeFull, RangeInclusive,
    RangeTo, RangeToInclusive,
};

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::FormatConfig;
use crate::error::{shape_mismatch, LinalgError, Result};
use crate::math::vector::{resolve_range, to_factor, Vector};
use crate::ops::delta;

/// A dense matrix of `f64` values.
///
/// Storage is a single row-major buffer: element `(i, j)` lives at
/// `i * ncols + j`. Row and column views are computed from it on demand, so
/// every write is immediately visible through all of them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

/// One axis of a `(row, column)` selection: a single index or a range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Select {
    Index(usize),
    Range(Bound<usize>, Bound<usize>),
}

/// Result of [`Matrix::select`], shaped by the kinds of the two selectors.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Scalar(f64),
    Vector(Vector),
    Matrix(Matrix),
}

impl Selection {
    pub fn into_scalar(self) -> Option<f64> {
        match self {
            Selection::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_vector(self) -> Option<Vector> {
        match self {
            Selection::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_matrix(self) -> Option<Matrix> {
        match self {
            Selection::Matrix(m) => Some(m),
            _ => None,
        }
    }
}

impl From<usize> for Select {
    fn from(value: usize) -> Self {
        Select::Index(value)
    }
}

macro_rules! select_from_range {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Select {
                fn from(value: $ty) -> Self {
                    Select::Range(value.start_bound().cloned(), value.end_bound().cloned())
                }
            }
        )*
    };
}

select_from_range!(
    Range<usize>,
    RangeInclusive<usize>,
    RangeFrom<usize>,
    RangeTo<usize>,
    RangeToInclusive<usize>,
    RangeFull
);

impl Matrix {
    /// Builds a matrix from a buffer laid out row by row.
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(shape_mismatch(
                "matrix from buffer",
                format!("{} values for {}x{}", rows * cols, rows, cols),
                format!("{} values", data.len()),
            ));
        }
        Ok(Self { data, rows, cols })
    }

    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        Self::from_shape_vec((rows, cols), data)
    }

    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    /// Builds a matrix from nested rows, all of the same length.
    ///
    /// An empty sequence gives a 0x0 matrix.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(LinalgError::RaggedShape {
                    row: idx,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self::from_raw(rows.len(), cols, data))
    }

    /// Builds a matrix whose `j`-th column is `columns[j]`.
    pub fn from_columns<C: AsRef<[f64]>>(columns: &[C]) -> Result<Self> {
        Ok(Self::from_rows(columns)?.transpose())
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_raw(rows, cols, vec![0.0; rows * cols])
    }

    /// The `size` x `size` identity, built entry by entry from the Kronecker delta.
    pub fn identity(size: usize) -> Self {
        let data = (0..size)
            .flat_map(|i| (0..size).map(move |j| delta(i, j)))
            .collect();
        Self::from_raw(size, size, data)
    }

    /// Identity with rows `r1` and `r2` exchanged.
    pub fn elementary_row_swap(size: usize, r1: usize, r2: usize) -> Result<Self> {
        check_index(r1, size)?;
        check_index(r2, size)?;
        let mut mtx = Self::identity(size);
        mtx[(r1, r1)] = 0.0;
        mtx[(r2, r2)] = 0.0;
        mtx[(r1, r2)] = 1.0;
        mtx[(r2, r1)] = 1.0;
        Ok(mtx)
    }

    /// Identity with diagonal entry `r` multiplied by `scalar`.
    pub fn elementary_scalar_multiplication(size: usize, r: usize, scalar: f64) -> Result<Self> {
        check_index(r, size)?;
        let mut mtx = Self::identity(size);
        mtx[(r, r)] *= scalar;
        Ok(mtx)
    }

    /// Identity with entry `(r2, r1)` set to `scalar`.
    ///
    /// Left-multiplying by it adds `scalar` times row `r1` to row `r2`.
    pub fn elementary_row_sum(size: usize, r1: usize, r2: usize, scalar: f64) -> Result<Self> {
        check_index(r1, size)?;
        check_index(r2, size)?;
        let mut mtx = Self::identity(size);
        mtx[(r2, r1)] = scalar;
        Ok(mtx)
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// The row-major backing buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Row `row` as a slice of the backing buffer.
    pub fn row_slice(&self, row: usize) -> Result<&[f64]> {
        check_index(row, self.rows)?;
        Ok(self.row_data(row))
    }

    pub fn row(&self, row: usize) -> Result<Vector> {
        Ok(Vector::from_slice(self.row_slice(row)?))
    }

    /// A full column; this is what a single integer index selects.
    pub fn column(&self, col: usize) -> Result<Vector> {
        check_index(col, self.cols)?;
        Ok(self.column_data(col))
    }

    pub(crate) fn row_data(&self, row: usize) -> &[f64] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    fn column_data(&self, col: usize) -> Vector {
        (0..self.rows).map(|row| self[(row, col)]).collect()
    }

    /// Rows in order; an `n x 0` matrix still yields `n` empty rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |row| self.row_data(row))
    }

    pub fn columns(&self) -> impl Iterator<Item = Vector> + '_ {
        (0..self.cols).map(move |col| self.column_data(col))
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        check_index(row, self.rows)?;
        check_index(col, self.cols)?;
        Ok(self.data[self.offset(row, col)])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        check_index(row, self.rows)?;
        check_index(col, self.cols)?;
        let offset = self.offset(row, col);
        self.data[offset] = value;
        Ok(())
    }

    /// Mixed scalar/range selection.
    ///
    /// `(index, index)` gives a scalar, `(range, index)` a column segment,
    /// `(index, range)` a row segment and `(range, range)` a sub-matrix.
    pub fn select(&self, rows: impl Into<Select>, cols: impl Into<Select>) -> Result<Selection> {
        match (rows.into(), cols.into()) {
            (Select::Index(r), Select::Index(c)) => {
                check_index(r, self.rows)?;
                check_index(c, self.cols)?;
                Ok(Selection::Scalar(self[(r, c)]))
            }
            (Select::Range(start, end), Select::Index(c)) => {
                check_index(c, self.cols)?;
                let rows = resolve_range(&(start, end), self.rows)?;
                Ok(Selection::Vector(rows.map(|r| self[(r, c)]).collect()))
            }
            (Select::Index(r), Select::Range(start, end)) => {
                check_index(r, self.rows)?;
                let cols = resolve_range(&(start, end), self.cols)?;
                Ok(Selection::Vector(Vector::from_slice(
                    &self.row_data(r)[cols],
                )))
            }
            (Select::Range(rs, re), Select::Range(cs, ce)) => {
                let rows = resolve_range(&(rs, re), self.rows)?;
                let cols = resolve_range(&(cs, ce), self.cols)?;
                let mut data = Vec::with_capacity(rows.len() * cols.len());
                for r in rows.clone() {
                    data.extend_from_slice(&self.row_data(r)[cols.clone()]);
                }
                Ok(Selection::Matrix(Self::from_raw(rows.len(), cols.len(), data)))
            }
        }
    }

    /// Elementwise sum of two equally shaped matrices.
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_shape("matrix add", other)?;
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a + b)
            .collect();
        Ok(Self::from_raw(self.rows, self.cols, data))
    }

    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        self.add(&-other)
    }

    /// Sums every term; `Ok(None)` for an empty sequence (the additive identity).
    pub fn sum_all<'a, I>(terms: I) -> Result<Option<Matrix>>
    where
        I: IntoIterator<Item = &'a Matrix>,
    {
        let mut acc: Option<Matrix> = None;
        for term in terms {
            acc = Some(match acc {
                None => term.clone(),
                Some(sum) => sum.add(term)?,
            });
        }
        Ok(acc)
    }

    /// Returns a scaled copy; `self` is untouched.
    pub fn scale<S>(&self, scalar: S) -> Result<Matrix>
    where
        S: ToPrimitive + fmt::Debug,
    {
        let factor = to_factor(&scalar)?;
        Ok(self * factor)
    }

    /// Scales every entry in place.
    pub fn scale_in_place<S>(&mut self, scalar: S) -> Result<()>
    where
        S: ToPrimitive + fmt::Debug,
    {
        let factor = to_factor(&scalar)?;
        for v in self.data.iter_mut() {
            *v *= factor;
        }
        Ok(())
    }

    pub fn mapv<F>(&self, f: F) -> Matrix
    where
        F: FnMut(&f64) -> f64,
    {
        Self::from_raw(self.rows, self.cols, self.data.iter().map(f).collect())
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = vec![0.0; self.rows * self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Self::from_raw(self.cols, self.rows, data)
    }

    pub fn trace(&self) -> Result<f64> {
        if !self.is_square() {
            return Err(LinalgError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let mut tr = 0.0;
        for i in 0..self.rows {
            tr += self[(i, i)];
        }
        Ok(tr)
    }

    /// Matrix-vector product as a linear combination of the columns,
    /// weighted by the components of `vector`.
    pub fn dot_vector(&self, vector: &Vector) -> Result<Vector> {
        if vector.len() != self.cols {
            return Err(shape_mismatch(
                "matrix-vector dot",
                format!("length {}", self.cols),
                format!("length {}", vector.len()),
            ));
        }
        let mut out = Vector::zeros(self.rows);
        for (col, &weight) in vector.iter().enumerate() {
            for row in 0..self.rows {
                out[row] += weight * self[(row, col)];
            }
        }
        Ok(out)
    }

    /// Matrix product: column `j` of the result is `self` applied to column `j` of `other`.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(shape_mismatch(
                "matrix-matrix dot",
                format!("{} rows on the right", self.cols),
                format!("{}x{}", other.rows, other.cols),
            ));
        }
        let columns = other
            .columns()
            .map(|col| self.dot_vector(&col))
            .collect::<Result<Vec<Vector>>>()?;
        if columns.is_empty() {
            return Ok(Self::zeros(self.rows, 0));
        }
        Self::from_columns(&columns)
    }

    /// `self` multiplied by itself `exponent - 1` times.
    ///
    /// Exponent 1 returns a copy of any matrix; every other exponent requires a
    /// square matrix, and exponent 0 yields the identity.
    pub fn power(&self, exponent: usize) -> Result<Matrix> {
        if exponent == 1 {
            return Ok(self.clone());
        }
        if !self.is_square() {
            return Err(LinalgError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if exponent == 0 {
            return Ok(Self::identity(self.rows));
        }
        log::debug!(
            "Raising {}x{} matrix to power {} ({} products)",
            self.rows,
            self.cols,
            exponent,
            exponent - 1
        );
        let mut acc = self.clone();
        for _ in 1..exponent {
            acc = acc.matmul(self)?;
        }
        Ok(acc)
    }

    pub fn render_with(&self, cfg: &FormatConfig) -> String {
        let mut s = String::from("Matrix(\n");
        for row in self.rows() {
            for &v in row {
                s.push_str(&cfg.cell(v));
            }
            s.push('\n');
        }
        s.push(')');
        s
    }

    fn check_same_shape(&self, op: &'static str, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(shape_mismatch(
                op,
                format!("{}x{}", self.rows, self.cols),
                format!("{}x{}", other.rows, other.cols),
            ));
        }
        Ok(())
    }
}

pub(crate) fn check_index(index: usize, bound: usize) -> Result<()> {
    if index >= bound {
        return Err(LinalgError::OutOfBounds { index, bound });
    }
    Ok(())
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "matrix index out of bounds"
        );
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "matrix index out of bounds"
        );
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Self::Output {
        self.mapv(|x| -x)
    }
}

impl Neg for Matrix {
    type Output = Matrix;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, factor: f64) -> Self::Output {
        self.mapv(|x| x * factor)
    }
}

impl Mul<&Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Self::Output {
        rhs * self
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(&FormatConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).unwrap()
    }

    #[test]
    fn views_agree_with_buffer() {
        let m = sample();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(m.row(i).unwrap()[j], m.column(j).unwrap()[i]);
                assert_eq!(m.row(i).unwrap()[j], m.as_slice()[i * 3 + j]);
            }
        }
    }

    #[test]
    fn writes_show_through_every_view() {
        let mut m = sample();
        m.set(2, 0, -1.0).unwrap();
        assert_eq!(m.row(2).unwrap()[0], -1.0);
        assert_eq!(m.column(0).unwrap()[2], -1.0);
        assert_eq!(m.as_slice()[6], -1.0);
        assert!(m.set(3, 0, 0.0).is_err());
    }

    #[test]
    fn single_index_selectors_report_out_of_bounds() {
        let m = Matrix::identity(2);
        assert_eq!(
            m.column(5),
            Err(LinalgError::OutOfBounds { index: 5, bound: 2 })
        );
        assert_eq!(
            m.row(5),
            Err(LinalgError::OutOfBounds { index: 5, bound: 2 })
        );
        assert!(m.row_slice(2).is_err());
        assert_eq!(m.get(0, 2), Err(LinalgError::OutOfBounds { index: 2, bound: 2 }));
        assert_eq!(m.get(1, 1), Ok(1.0));
    }

    #[test]
    fn zero_width_matrix_keeps_its_rows() {
        let m = Matrix::zeros(2, 0);
        assert_eq!(m.rows().count(), 2);
        assert!(m.rows().all(|row| row.is_empty()));
        assert_eq!(m.to_string(), "Matrix(\n\n\n)");

        let product = Matrix::zeros(2, 3).matmul(&Matrix::zeros(3, 0)).unwrap();
        assert_eq!(product.shape(), (2, 0));
        assert_eq!(product.rows().count(), 2);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![3.0]];
        assert_eq!(
            Matrix::from_rows(&rows),
            Err(LinalgError::RaggedShape {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn select_shapes_follow_selector_kinds() {
        let m = sample();
        assert_eq!(m.select(1usize, 2usize).unwrap(), Selection::Scalar(6.0));
        assert_eq!(
            m.select(0..2usize, 1usize).unwrap(),
            Selection::Vector(Vector::from([2.0, 5.0]))
        );
        assert_eq!(
            m.select(2usize, 1usize..).unwrap(),
            Selection::Vector(Vector::from([8.0, 9.0]))
        );
        let sub = m.select(1usize.., ..2usize).unwrap().into_matrix().unwrap();
        assert_eq!(sub, Matrix::from_rows(&[[4.0, 5.0], [7.0, 8.0]]).unwrap());
        assert!(m.select(0..4usize, 0usize).is_err());
        assert!(m.select(3usize, 0usize).is_err());
    }

    #[test]
    fn scale_is_pure_and_scale_in_place_mutates() {
        let mut m = sample();
        let doubled = m.scale(2).unwrap();
        assert_eq!(m, sample());
        assert_eq!(doubled[(2, 2)], 18.0);

        m.scale_in_place(0.5f32).unwrap();
        assert_eq!(m[(0, 1)], 1.0);
    }

    #[test]
    fn elementary_matrices_act_by_left_multiplication() {
        let m = sample();
        let swapped = Matrix::elementary_row_swap(3, 0, 2)
            .unwrap()
            .matmul(&m)
            .unwrap();
        assert_eq!(swapped.row(0).unwrap(), m.row(2).unwrap());
        assert_eq!(swapped.row(2).unwrap(), m.row(0).unwrap());

        let scaled = Matrix::elementary_scalar_multiplication(3, 1, 10.0)
            .unwrap()
            .matmul(&m)
            .unwrap();
        assert_eq!(scaled.row(1).unwrap(), Vector::from([40.0, 50.0, 60.0]));

        let summed = Matrix::elementary_row_sum(3, 0, 1, -4.0)
            .unwrap()
            .matmul(&m)
            .unwrap();
        assert_eq!(summed.row(1).unwrap(), Vector::from([0.0, -3.0, -6.0]));

        assert!(Matrix::elementary_row_swap(3, 0, 3).is_err());
    }

    #[test]
    fn power_edge_exponents() {
        let wide = Matrix::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(wide.power(1).unwrap(), wide);
        assert!(matches!(wide.power(2), Err(LinalgError::NotSquare { .. })));
        assert_eq!(sample().power(0).unwrap(), Matrix::identity(3));
    }

    #[test]
    fn display_uses_fixed_width_cells() {
        let m = Matrix::from_rows(&[[1.0, -2.5]]).unwrap();
        assert_eq!(m.to_string(), "Matrix(\n   1.000  -2.500\n)");
    }
}
