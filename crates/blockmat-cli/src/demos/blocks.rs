//! Block product versus flat product on a fixed pair of block matrices.
use anyhow::{Context, Result};

use blockmat::math::{dot, BlockMatrix, Matrix};

/// Block-matrix operands and both ways of multiplying them.
#[derive(Debug)]
pub struct BlocksReport {
    pub left: BlockMatrix,
    pub right: BlockMatrix,
    pub blocked: BlockMatrix,
    pub flat: Matrix,
}

impl BlocksReport {
    /// Whether the materialized block product equals the flat product within `tol`.
    pub fn agrees(&self, tol: f64) -> bool {
        let blocked = self.blocked.to_matrix();
        blocked.shape() == self.flat.shape()
            && blocked
                .as_slice()
                .iter()
                .zip(self.flat.as_slice())
                .all(|(a, b)| (a - b).abs() <= tol)
    }
}

fn matrix(columns: &[&[f64]]) -> Result<Matrix> {
    Matrix::from_columns(columns).context("Invalid demo matrix")
}

/// A 3x5 matrix in a 2x2 grid and a 5x2 matrix in a 2x1 grid with
/// compatible interior partitions. Operand data is listed column by column.
pub fn sample_operands() -> Result<(BlockMatrix, BlockMatrix)> {
    let mtx1 = matrix(&[&[2.0, 1.0], &[-3.0, 5.0], &[1.0, -2.0]])?;
    let mtx2 = matrix(&[&[0.0, 3.0], &[-4.0, -1.0]])?;
    let mtx3 = matrix(&[&[0.0], &[-4.0], &[-2.0]])?;
    let mtx4 = matrix(&[&[7.0], &[-1.0]])?;
    let mtx5 = matrix(&[&[6.0, -2.0, -3.0], &[4.0, 1.0, 7.0]])?;
    let mtx6 = matrix(&[&[-1.0, 5.0], &[3.0, 2.0]])?;

    let left = BlockMatrix::new(vec![vec![mtx1, mtx2], vec![mtx3, mtx4]])
        .context("Invalid left block grid")?;
    let right =
        BlockMatrix::new(vec![vec![mtx5], vec![mtx6]]).context("Invalid right block grid")?;
    Ok((left, right))
}

pub fn run_blocks() -> Result<BlocksReport> {
    let (left, right) = sample_operands()?;

    let blocked = dot(&left, &right)
        .context("Block product failed")?
        .into_block()
        .context("Block product did not return a block matrix")?;
    let flat = dot(&left.to_matrix(), &right.to_matrix())
        .context("Flat product failed")?
        .into_matrix()
        .context("Flat product did not return a matrix")?;

    log::debug!(
        "Block product {:?} grid, flat product {:?}",
        blocked.size(),
        flat.shape()
    );
    Ok(BlocksReport {
        left,
        right,
        blocked,
        flat,
    })
}
