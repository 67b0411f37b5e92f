//! Step records produced while eliminating.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ring::{LINE_SEPARATOR, ResidueMatrix};

/// One row operation performed by elimination.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowOperation {
    /// `source_row` was swapped into `pivot_row` to obtain a non-zero pivot.
    Swap { pivot_row: usize, source_row: usize },
    /// `factor` times row `source` was added to row `target`.
    AddScaled {
        factor: u64,
        source: usize,
        target: usize,
    },
}

impl fmt::Display for RowOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowOperation::Swap {
                pivot_row,
                source_row,
            } => write!(f, "Swapping lines {} and {}:", pivot_row, source_row),
            RowOperation::AddScaled {
                factor,
                source,
                target,
            } => write!(f, "Adding {} times line {} to line {}", factor, source, target),
        }
    }
}

/// The outcome of [`ResidueMatrix::gauss_with_steps`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminationResult {
    steps: String,
    operations: Vec<RowOperation>,
    stopped_at: Option<usize>,
    matrix: ResidueMatrix,
}

impl EliminationResult {
    /// Human-readable trace: every operation followed by the matrix it produced.
    pub fn steps(&self) -> &str {
        &self.steps
    }

    pub fn operations(&self) -> &[RowOperation] {
        &self.operations
    }

    /// Number of swaps plus row additions performed.
    pub fn step_count(&self) -> usize {
        self.operations.len()
    }

    /// Column in which no pivot could be found, if elimination stopped early.
    pub fn stopped_at(&self) -> Option<usize> {
        self.stopped_at
    }

    /// The reduced matrix.
    pub fn matrix(&self) -> &ResidueMatrix {
        &self.matrix
    }

    pub fn into_parts(self) -> (String, ResidueMatrix) {
        (self.steps, self.matrix)
    }
}

/// Receives every operation right after it was applied to the working matrix.
pub(crate) trait StepRecorder {
    fn record(&mut self, operation: RowOperation, matrix: &ResidueMatrix);
    fn no_pivot(&mut self, column: usize);
}

/// Recorder for the untraced variant.
pub(crate) struct Silent;

impl StepRecorder for Silent {
    fn record(&mut self, _operation: RowOperation, _matrix: &ResidueMatrix) {}
    fn no_pivot(&mut self, _column: usize) {}
}

#[derive(Default)]
pub(crate) struct Trace {
    steps: String,
    operations: Vec<RowOperation>,
}

impl Trace {
    pub(crate) fn finish(
        self,
        matrix: ResidueMatrix,
        stopped_at: Option<usize>,
    ) -> EliminationResult {
        EliminationResult {
            steps: self.steps,
            operations: self.operations,
            stopped_at,
            matrix,
        }
    }
}

impl StepRecorder for Trace {
    fn record(&mut self, operation: RowOperation, matrix: &ResidueMatrix) {
        self.steps.push_str(&operation.to_string());
        self.steps.push_str(LINE_SEPARATOR);
        self.steps.push_str(&matrix.to_string());
        // a swap block is not followed by an empty line
        if let RowOperation::AddScaled { .. } = operation {
            self.steps.push_str(LINE_SEPARATOR);
        }
        self.operations.push(operation);
    }

    fn no_pivot(&mut self, _column: usize) {
        self.steps.push_str("Didn't find a pivot");
        self.steps.push_str(LINE_SEPARATOR);
    }
}
