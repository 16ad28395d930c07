//! blockmat: dense vector, matrix and block-matrix arithmetic.
//!
//! The crate provides `Vector`, `Matrix` and `BlockMatrix` with the usual
//! arithmetic (addition, scaling, negation, transpose, trace), elementary
//! row-operation matrices, matrix powers, and a generalized `dot` that
//! multiplies any supported pair of them, recursing through block structure
//! without materializing flat intermediates.
pub mod config;
pub mod error;
pub mod math;
pub mod ops;

pub use error::{LinalgError, Result};
