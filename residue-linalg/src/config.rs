//! JSON description of an elimination job.

use crate::errors::ResidueError;
use crate::ring::ResidueMatrix;

use serde::{Deserialize, Serialize};

fn default_trace() -> bool {
    true
}

/// A self-contained elimination job: the matrix to reduce and how to report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemConfig {
    /// Number of columns; `values` is split into rows of this width.
    pub width: usize,
    /// Modulus m of the ring Z_m all entries live in.
    pub modulus: u64,
    /// Row-major matrix entries, each in `[0, modulus)`.
    pub values: Vec<u64>,
    /// Whether to record and print every elimination step.
    #[serde(default = "default_trace")]
    pub trace: bool,
}

impl ProblemConfig {
    /// Creates a new ProblemConfig, rejecting parameters that cannot form a matrix.
    pub fn try_with(
        width: usize,
        modulus: u64,
        values: Vec<u64>,
        trace: bool,
    ) -> Result<Self, ResidueError> {
        let config = Self {
            width,
            modulus,
            values,
            trace,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ResidueError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ResidueError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the matrix described by this config.
    pub fn matrix(&self) -> Result<ResidueMatrix, ResidueError> {
        ResidueMatrix::try_with(self.width, self.modulus, &self.values)
    }

    fn validate(&self) -> Result<(), ResidueError> {
        if self.values.is_empty() {
            return Err(ResidueError::InvalidParameters(
                "At least one matrix value is required".to_string(),
            ));
        }
        self.matrix().map(|_| ())
    }
}

/// The 4×4 matrix over Z_10 used when no job is supplied.
impl Default for ProblemConfig {
    fn default() -> Self {
        Self {
            width: 4,
            modulus: 10,
            values: vec![4, 4, 2, 0, 4, 3, 3, 3, 4, 1, 0, 4, 0, 4, 1, 3],
            trace: true,
        }
    }
}
