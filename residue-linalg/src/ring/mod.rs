//! # Ring Module
//!
//! Provides the [`Ring`] struct for representing finite rings Z_m, and the scalar, vector and
//! matrix types whose entries live in such a ring.

pub mod helper;
pub mod math;
pub mod matrix;
pub mod scalar;
pub mod vector;

/// Terminates every rendered matrix row and every trace line.
pub const LINE_SEPARATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

pub use helper::{extended_gcd, gcd};
pub use math::Ring;
pub use matrix::ResidueMatrix;
pub use scalar::ResidueScalar;
pub use vector::ResidueVector;
