//! # Gaussian elimination over Z_m
//!
//! Pivots sit on the diagonal. A zero diagonal entry is replaced by swapping in the first
//! lower row with a non-zero entry in that column; if there is none the whole procedure
//! stops and the partially reduced matrix is returned. Entries below a pivot are cancelled
//! by adding the smallest multiple `k` of the pivot row with `k * pivot + entry ≡ 0`.

pub mod steps;

pub use steps::{EliminationResult, RowOperation};

use crate::errors::ResidueError;
use crate::ring::ResidueMatrix;
use steps::{Silent, StepRecorder, Trace};

impl ResidueMatrix {
    /// Reduces a copy of this matrix to row-echelon form.
    ///
    /// # Errors
    ///
    /// `NoEliminationFactor` if, under a composite modulus, no multiple of a pivot cancels
    /// an entry below it.
    ///
    /// # Example
    ///
    /// ```
    /// # use residue_linalg::ring::ResidueMatrix;
    /// let m = ResidueMatrix::try_with(2, 5, &[1, 2, 3, 4]).unwrap();
    /// assert_eq!(m.gauss().unwrap().to_values(), vec![vec![1, 2], vec![0, 3]]);
    /// ```
    pub fn gauss(&self) -> Result<ResidueMatrix, ResidueError> {
        let mut working = self.clone();
        eliminate(&mut working, &mut Silent)?;
        Ok(working)
    }

    /// Same transformation as [`ResidueMatrix::gauss`], additionally recording every swap
    /// and row addition together with the matrix state it produced.
    pub fn gauss_with_steps(&self) -> Result<EliminationResult, ResidueError> {
        let mut working = self.clone();
        let mut trace = Trace::default();
        let stopped_at = eliminate(&mut working, &mut trace)?;
        Ok(trace.finish(working, stopped_at))
    }
}

/// Runs elimination in place and returns the column where no pivot was found, if any.
fn eliminate<R: StepRecorder>(
    matrix: &mut ResidueMatrix,
    recorder: &mut R,
) -> Result<Option<usize>, ResidueError> {
    let rows = matrix.height();
    let cols = matrix.width();
    let ring = matrix.ring();
    log::debug!("eliminating {}x{} matrix mod {}", rows, cols, ring.modulus());

    let mut column = 0;
    let mut offset = 0;
    let mut stopped_at = None;

    while stopped_at.is_none() && column + offset < rows && column < cols {
        let pivot_col = column + offset;

        if entry(matrix, column, pivot_col) == 0 {
            match (column..rows).find(|&row| entry(matrix, row, pivot_col) != 0) {
                Some(source) => {
                    matrix.swap_rows(column, source)?;
                    log::trace!("swapped rows {} and {}", column, source);
                    recorder.record(
                        RowOperation::Swap {
                            pivot_row: column,
                            source_row: source,
                        },
                        matrix,
                    );
                }
                None => {
                    log::debug!("no pivot in column {}, stopping", pivot_col);
                    recorder.no_pivot(pivot_col);
                    offset += 1;
                    stopped_at = Some(pivot_col);
                    continue;
                }
            }
        }

        let pivot = entry(matrix, column, pivot_col);
        for row in (column + 1)..rows {
            let factor = ring.elimination_factor(pivot, entry(matrix, row, pivot_col))?;
            matrix.add_scaled_row(column, row, factor);
            log::trace!("added {} times row {} to row {}", factor, column, row);
            recorder.record(
                RowOperation::AddScaled {
                    factor,
                    source: column,
                    target: row,
                },
                matrix,
            );
        }
        column += 1;
    }

    log::debug!("elimination finished after {} pivot columns", column);
    Ok(stopped_at)
}

fn entry(matrix: &ResidueMatrix, row: usize, col: usize) -> u64 {
    matrix.value(row, col).unwrap_or(0)
}
