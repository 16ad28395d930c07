use std::fmt;

use crate::config::FormatConfig;
use crate::error::{shape_mismatch, LinalgError, Result};
use crate::math::matrix::{check_index, Matrix};

/// A matrix partitioned into a grid of rectangular blocks.
///
/// Every block in a block-row has the same number of rows and every block in
/// a block-column the same number of columns; construction rejects any grid
/// that breaks either rule. Blocks are owned and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockMatrix {
    /// Block grid, row-major.
    blocks: Vec<Matrix>,
    grid_rows: usize,
    grid_cols: usize,
    row_sizes: Vec<usize>,
    col_sizes: Vec<usize>,
}

impl BlockMatrix {
    pub fn new(grid: Vec<Vec<Matrix>>) -> Result<Self> {
        let grid_rows = grid.len();
        let grid_cols = grid.first().map_or(0, Vec::len);
        if grid_rows == 0 || grid_cols == 0 {
            return Err(LinalgError::EmptyInput("block grid"));
        }

        for (k, block_row) in grid.iter().enumerate() {
            if block_row.len() != grid_cols {
                return Err(LinalgError::RaggedShape {
                    row: k,
                    expected: grid_cols,
                    found: block_row.len(),
                });
            }
        }

        let row_sizes: Vec<usize> = grid.iter().map(|block_row| block_row[0].nrows()).collect();
        let col_sizes: Vec<usize> = grid[0].iter().map(Matrix::ncols).collect();

        for (k, block_row) in grid.iter().enumerate() {
            for (l, mtx) in block_row.iter().enumerate() {
                if mtx.nrows() != row_sizes[k] {
                    log::debug!(
                        "Rejecting block grid: block ({}, {}) is {}x{}, block-row expects {} rows",
                        k,
                        l,
                        mtx.nrows(),
                        mtx.ncols(),
                        row_sizes[k]
                    );
                    return Err(LinalgError::BlockShapeMismatch {
                        block_row: k,
                        block_col: l,
                        dimension: "rows",
                        expected: row_sizes[k],
                        found: mtx.nrows(),
                    });
                }
            }
        }

        for l in 0..grid_cols {
            for (k, block_row) in grid.iter().enumerate() {
                let mtx = &block_row[l];
                if mtx.ncols() != col_sizes[l] {
                    log::debug!(
                        "Rejecting block grid: block ({}, {}) is {}x{}, block-column expects {} columns",
                        k,
                        l,
                        mtx.nrows(),
                        mtx.ncols(),
                        col_sizes[l]
                    );
                    return Err(LinalgError::BlockShapeMismatch {
                        block_row: k,
                        block_col: l,
                        dimension: "columns",
                        expected: col_sizes[l],
                        found: mtx.ncols(),
                    });
                }
            }
        }

        Ok(Self {
            blocks: grid.into_iter().flatten().collect(),
            grid_rows,
            grid_cols,
            row_sizes,
            col_sizes,
        })
    }

    /// Splits `matrix` into blocks with the given block-row heights and
    /// block-column widths.
    pub fn partition(matrix: &Matrix, row_sizes: &[usize], col_sizes: &[usize]) -> Result<Self> {
        if row_sizes.is_empty() || col_sizes.is_empty() {
            return Err(LinalgError::EmptyInput("partition sizes"));
        }
        let (rows, cols) = matrix.shape();
        let total_rows: usize = row_sizes.iter().sum();
        let total_cols: usize = col_sizes.iter().sum();
        if (total_rows, total_cols) != (rows, cols) {
            return Err(shape_mismatch(
                "block partition",
                format!("{}x{}", rows, cols),
                format!("partition covering {}x{}", total_rows, total_cols),
            ));
        }

        let mut grid = Vec::with_capacity(row_sizes.len());
        let mut row_start = 0;
        for &height in row_sizes {
            let mut block_row = Vec::with_capacity(col_sizes.len());
            let mut col_start = 0;
            for &width in col_sizes {
                let mut data = Vec::with_capacity(height * width);
                for r in row_start..row_start + height {
                    data.extend_from_slice(&matrix.row_data(r)[col_start..col_start + width]);
                }
                block_row.push(Matrix::from_raw(height, width, data));
                col_start += width;
            }
            grid.push(block_row);
            row_start += height;
        }

        Self::new(grid)
    }

    /// Grid shape: (block-rows, block-columns).
    pub fn size(&self) -> (usize, usize) {
        (self.grid_rows, self.grid_cols)
    }

    /// Shape of the materialized matrix.
    pub fn whole_size(&self) -> (usize, usize) {
        (self.row_sizes.iter().sum(), self.col_sizes.iter().sum())
    }

    pub fn row_sizes(&self) -> &[usize] {
        &self.row_sizes
    }

    pub fn col_sizes(&self) -> &[usize] {
        &self.col_sizes
    }

    pub fn block(&self, block_row: usize, block_col: usize) -> Option<&Matrix> {
        if block_row < self.grid_rows && block_col < self.grid_cols {
            Some(&self.blocks[block_row * self.grid_cols + block_col])
        } else {
            None
        }
    }

    /// The matrices of block-row `block_row`, left to right.
    pub fn block_row(&self, block_row: usize) -> Result<&[Matrix]> {
        check_index(block_row, self.grid_rows)?;
        Ok(self.blocks_in_row(block_row))
    }

    /// The matrices of block-column `block_col`, top to bottom.
    pub fn block_column(&self, block_col: usize) -> Result<impl Iterator<Item = &Matrix> + '_> {
        check_index(block_col, self.grid_cols)?;
        Ok(self.blocks_in_column(block_col))
    }

    fn blocks_in_row(&self, block_row: usize) -> &[Matrix] {
        let start = block_row * self.grid_cols;
        &self.blocks[start..start + self.grid_cols]
    }

    fn blocks_in_column(&self, block_col: usize) -> impl Iterator<Item = &Matrix> + '_ {
        self.blocks.iter().skip(block_col).step_by(self.grid_cols)
    }

    /// Entry `(row, col)` of the materialized matrix.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        let (rows, cols) = self.whole_size();
        let (k, r) = locate(&self.row_sizes, row)
            .ok_or(LinalgError::OutOfBounds { index: row, bound: rows })?;
        let (l, c) = locate(&self.col_sizes, col)
            .ok_or(LinalgError::OutOfBounds { index: col, bound: cols })?;
        self.blocks[k * self.grid_cols + l].get(r, c)
    }

    /// Row-major buffer of the materialized matrix: each block-row is walked
    /// one inner row at a time, left to right across its blocks.
    pub fn components(&self) -> Vec<f64> {
        let (rows, cols) = self.whole_size();
        let mut data = Vec::with_capacity(rows * cols);
        for k in 0..self.grid_rows {
            let block_row = self.blocks_in_row(k);
            for i in 0..self.row_sizes[k] {
                for mtx in block_row {
                    data.extend_from_slice(mtx.row_data(i));
                }
            }
        }
        data
    }

    pub fn to_matrix(&self) -> Matrix {
        let (rows, cols) = self.whole_size();
        Matrix::from_raw(rows, cols, self.components())
    }

    /// Block product: block `(k, l)` is the sum over `idx` of
    /// `self[k, idx] · other[idx, l]`.
    pub fn matmul(&self, other: &BlockMatrix) -> Result<BlockMatrix> {
        if self.grid_cols != other.grid_rows {
            return Err(shape_mismatch(
                "block dot",
                format!("{} block-rows on the right", self.grid_cols),
                format!("{}x{} block grid", other.grid_rows, other.grid_cols),
            ));
        }
        log::trace!(
            "Block product of {}x{} and {}x{} block grids",
            self.grid_rows,
            self.grid_cols,
            other.grid_rows,
            other.grid_cols
        );

        let mut grid = Vec::with_capacity(self.grid_rows);
        for k in 0..self.grid_rows {
            let mut block_row = Vec::with_capacity(other.grid_cols);
            for l in 0..other.grid_cols {
                let products = self
                    .blocks_in_row(k)
                    .iter()
                    .zip(other.blocks_in_column(l))
                    .map(|(a, b)| a.matmul(b))
                    .collect::<Result<Vec<Matrix>>>()?;
                let sum = Matrix::sum_all(&products)?
                    .ok_or(LinalgError::EmptyInput("block product"))?;
                block_row.push(sum);
            }
            grid.push(block_row);
        }
        BlockMatrix::new(grid)
    }

    pub fn render_with(&self, cfg: &FormatConfig) -> String {
        let (_, whole_cols) = self.whole_size();
        let rule = "-".repeat(cfg.width * whole_cols + self.grid_cols - 1);
        let mut s = String::from("BlockMatrix(\n");
        for k in 0..self.grid_rows {
            let block_row = self.blocks_in_row(k);
            for i in 0..self.row_sizes[k] {
                let line: Vec<String> = block_row
                    .iter()
                    .map(|mtx| mtx.row_data(i).iter().map(|&v| cfg.cell(v)).collect())
                    .collect();
                s.push_str(&line.join("|"));
                s.push('\n');
            }
            if k + 1 != self.grid_rows {
                s.push_str(&rule);
                s.push('\n');
            }
        }
        s.push(')');
        s
    }
}

/// Maps a flat index onto (part, offset within part).
fn locate(sizes: &[usize], index: usize) -> Option<(usize, usize)> {
    let mut start = 0;
    for (part, &size) in sizes.iter().enumerate() {
        if index < start + size {
            return Some((part, index - start));
        }
        start += size;
    }
    None
}

impl fmt::Display for BlockMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(&FormatConfig::default()))
    }
}
