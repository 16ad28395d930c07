use std::error::Error;
use std::fmt;

/// Errors raised by vector, matrix and block-matrix operations.
#[derive(Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// Operand dimensions are incompatible for `op`.
    ShapeMismatch {
        op: &'static str,
        expected: String,
        found: String,
    },
    /// Constructor input rows of unequal length.
    RaggedShape {
        row: usize,
        expected: usize,
        found: usize,
    },
    NotSquare {
        rows: usize,
        cols: usize,
    },
    /// A block-row (or block-column) holds matrices with different row (or column) counts.
    BlockShapeMismatch {
        block_row: usize,
        block_col: usize,
        dimension: &'static str,
        expected: usize,
        found: usize,
    },
    DivideByZero,
    UnsupportedOperandTypes {
        lhs: &'static str,
        rhs: &'static str,
    },
    /// Scalar operand cannot be represented as an `f64`.
    TypeMismatch(String),
    OutOfBounds {
        index: usize,
        bound: usize,
    },
    EmptyInput(&'static str),
}

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinalgError::ShapeMismatch { op, expected, found } => write!(
                f,
                "shape mismatch in {}: expected {}, found {}",
                op, expected, found
            ),
            LinalgError::RaggedShape { row, expected, found } => write!(
                f,
                "row {} has {} entries, expected {}",
                row, found, expected
            ),
            LinalgError::NotSquare { rows, cols } => {
                write!(f, "matrix is not square: {}x{}", rows, cols)
            }
            LinalgError::BlockShapeMismatch {
                block_row,
                block_col,
                dimension,
                expected,
                found,
            } => write!(
                f,
                "block ({}, {}) has {} {}, expected {}",
                block_row, block_col, found, dimension, expected
            ),
            LinalgError::DivideByZero => write!(f, "division by zero magnitude"),
            LinalgError::UnsupportedOperandTypes { lhs, rhs } => {
                write!(f, "dot product is not defined for {} and {}", lhs, rhs)
            }
            LinalgError::TypeMismatch(msg) => write!(f, "type mismatch: {}", msg),
            LinalgError::OutOfBounds { index, bound } => {
                write!(f, "index {} out of bounds for length {}", index, bound)
            }
            LinalgError::EmptyInput(what) => write!(f, "empty input: {}", what),
        }
    }
}

impl Error for LinalgError {}

pub type Result<T> = std::result::Result<T, LinalgError>;

pub(crate) fn shape_mismatch(
    op: &'static str,
    expected: impl fmt::Display,
    found: impl fmt::Display,
) -> LinalgError {
    LinalgError::ShapeMismatch {
        op,
        expected: expected.to_string(),
        found: found.to_string(),
    }
}
