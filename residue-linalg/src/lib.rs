//! # Residue Linalg
//!
//! Linear algebra over the residue class rings Z_m: scalars, vectors and matrices with entries
//! in Z_m, modular-inverse division, matrix products and Gaussian elimination with a
//! step-by-step trace.

pub mod config;
pub mod errors;
pub mod gauss;
pub mod ring;

pub use config::ProblemConfig;
pub use errors::ResidueError;
pub use gauss::{EliminationResult, RowOperation};
pub use ring::{ResidueMatrix, ResidueScalar, ResidueVector, Ring};
