//! The generalized dot product across vectors, matrices and block matrices.

use crate::error::{LinalgError, Result};
use crate::math::{BlockMatrix, Matrix, Vector};

/// A borrowed operand of [`dot`].
#[derive(Clone, Copy, Debug)]
pub enum Operand<'a> {
    Vector(&'a Vector),
    Matrix(&'a Matrix),
    Block(&'a BlockMatrix),
}

impl Operand<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Vector(_) => "Vector",
            Operand::Matrix(_) => "Matrix",
            Operand::Block(_) => "BlockMatrix",
        }
    }
}

impl<'a> From<&'a Vector> for Operand<'a> {
    fn from(value: &'a Vector) -> Self {
        Operand::Vector(value)
    }
}

impl<'a> From<&'a Matrix> for Operand<'a> {
    fn from(value: &'a Matrix) -> Self {
        Operand::Matrix(value)
    }
}

impl<'a> From<&'a BlockMatrix> for Operand<'a> {
    fn from(value: &'a BlockMatrix) -> Self {
        Operand::Block(value)
    }
}

/// Result of [`dot`]; the variant follows from the operand kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum Product {
    Scalar(f64),
    Vector(Vector),
    Matrix(Matrix),
    Block(BlockMatrix),
}

impl Product {
    pub fn into_scalar(self) -> Option<f64> {
        match self {
            Product::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_vector(self) -> Option<Vector> {
        match self {
            Product::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_matrix(self) -> Option<Matrix> {
        match self {
            Product::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn into_block(self) -> Option<BlockMatrix> {
        match self {
            Product::Block(b) => Some(b),
            _ => None,
        }
    }
}

/// Generalized dot product.
///
/// | lhs         | rhs         | result                                  |
/// |-------------|-------------|-----------------------------------------|
/// | Vector      | Vector      | inner product                           |
/// | Matrix      | Vector      | linear combination of the columns       |
/// | Matrix      | Matrix      | one matrix-vector product per column    |
/// | BlockMatrix | BlockMatrix | summed block products, block by block   |
///
/// Any other pairing fails with [`LinalgError::UnsupportedOperandTypes`].
///
/// # Example
/// ```
/// use blockmat::math::{dot, Matrix, Vector};
/// let shear = Matrix::from_rows(&[[1.0, 1.0], [0.0, 1.0]]).unwrap();
/// let v = Vector::from([1.0, 0.0]);
/// let out = dot(&shear, &v).unwrap().into_vector().unwrap();
/// assert_eq!(out, Vector::from([1.0, 0.0]));
/// ```
pub fn dot<'a, 'b>(a: impl Into<Operand<'a>>, b: impl Into<Operand<'b>>) -> Result<Product> {
    match (a.into(), b.into()) {
        (Operand::Vector(a), Operand::Vector(b)) => a.dot(b).map(Product::Scalar),
        (Operand::Matrix(a), Operand::Vector(b)) => a.dot_vector(b).map(Product::Vector),
        (Operand::Matrix(a), Operand::Matrix(b)) => a.matmul(b).map(Product::Matrix),
        (Operand::Block(a), Operand::Block(b)) => a.matmul(b).map(Product::Block),
        (a, b) => Err(LinalgError::UnsupportedOperandTypes {
            lhs: a.kind(),
            rhs: b.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_operand_kinds() {
        let v = Vector::from([1.0, 2.0]);
        let m = Matrix::from_rows(&[[0.0, 1.0], [1.0, 0.0]]).unwrap();
        let b = BlockMatrix::new(vec![vec![m.clone()]]).unwrap();

        assert_eq!(dot(&v, &v).unwrap(), Product::Scalar(5.0));
        assert_eq!(
            dot(&m, &v).unwrap(),
            Product::Vector(Vector::from([2.0, 1.0]))
        );
        assert_eq!(
            dot(&m, &m).unwrap(),
            Product::Matrix(Matrix::identity(2))
        );
        let bb = dot(&b, &b).unwrap().into_block().unwrap();
        assert_eq!(bb.to_matrix(), Matrix::identity(2));
    }

    #[test]
    fn rejects_unsupported_pairings() {
        let v = Vector::from([1.0, 2.0]);
        let m = Matrix::identity(2);
        let b = BlockMatrix::new(vec![vec![m.clone()]]).unwrap();

        assert_eq!(
            dot(&v, &m),
            Err(LinalgError::UnsupportedOperandTypes {
                lhs: "Vector",
                rhs: "Matrix"
            })
        );
        assert!(matches!(
            dot(&b, &m),
            Err(LinalgError::UnsupportedOperandTypes { .. })
        ));
        assert!(matches!(
            dot(&m, &b),
            Err(LinalgError::UnsupportedOperandTypes { .. })
        ));
        assert!(matches!(
            dot(&b, &v),
            Err(LinalgError::UnsupportedOperandTypes { .. })
        ));
    }

    #[test]
    fn shape_errors_surface_from_nested_products() {
        let tall = Matrix::zeros(3, 2);
        assert!(matches!(
            dot(&tall, &tall),
            Err(LinalgError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            dot(&tall, &Vector::zeros(3)),
            Err(LinalgError::ShapeMismatch { .. })
        ));

        let one = BlockMatrix::new(vec![vec![tall.clone()]]).unwrap();
        assert!(matches!(
            dot(&one, &one),
            Err(LinalgError::ShapeMismatch { .. })
        ));
    }
}
