//! A single element of Z_m carried together with its modulus.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ResidueError;

use super::Ring;

/// An immutable residue class integer.
///
/// The value always lies in `[0, modulus)`. Arithmetic between scalars of different
/// moduli is rejected with [`ResidueError::ModulusMismatch`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(into = "RawScalar", try_from = "RawScalar")]
pub struct ResidueScalar {
    value: u64,
    ring: Ring,
}

/// Wire form of a scalar; decoding goes through [`ResidueScalar::try_with`].
#[derive(Serialize, Deserialize)]
struct RawScalar {
    value: u64,
    modulus: u64,
}

impl From<ResidueScalar> for RawScalar {
    fn from(scalar: ResidueScalar) -> Self {
        RawScalar {
            value: scalar.value,
            modulus: scalar.modulus(),
        }
    }
}

impl TryFrom<RawScalar> for ResidueScalar {
    type Error = ResidueError;

    fn try_from(raw: RawScalar) -> Result<Self, Self::Error> {
        ResidueScalar::try_with(raw.value, raw.modulus)
    }
}

impl From<ResidueScalar> for u64 {
    fn from(scalar: ResidueScalar) -> Self {
        scalar.value
    }
}

impl ResidueScalar {
    /// Creates a new residue class integer.
    ///
    /// # Errors
    ///
    /// `InvalidModulus` for a zero modulus, `ValueOutOfRange` if `value >= modulus`.
    pub fn try_with(value: u64, modulus: u64) -> Result<Self, ResidueError> {
        let ring = Ring::try_with(modulus)?;
        Self::in_ring(value, ring)
    }

    /// Creates a scalar from signed raw integers, rejecting negative values and moduli.
    pub fn try_from_signed(value: i64, modulus: i64) -> Result<Self, ResidueError> {
        if modulus <= 0 {
            return Err(ResidueError::InvalidModulus(format!(
                "Modulus must be greater than 0, got {}",
                modulus
            )));
        }
        if value < 0 {
            return Err(ResidueError::ValueOutOfRange(format!(
                "Value {} must not be negative (modulus {})",
                value, modulus
            )));
        }

        Self::try_with(value as u64, modulus as u64)
    }

    pub(crate) fn in_ring(value: u64, ring: Ring) -> Result<Self, ResidueError> {
        Ok(Self {
            value: ring.check(value)?,
            ring,
        })
    }

    /// Wraps a value that is already known to be reduced into `[0, modulus)`.
    pub(crate) fn from_reduced(value: u64, ring: Ring) -> Self {
        debug_assert!(value < ring.modulus());
        Self { value, ring }
    }

    /// The zero element of Z_m.
    pub fn zero(modulus: u64) -> Result<Self, ResidueError> {
        Self::try_with(0, modulus)
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn modulus(&self) -> u64 {
        self.ring.modulus()
    }

    pub fn ring(&self) -> Ring {
        self.ring
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Computes `(self + summand) mod m`.
    pub fn add(&self, summand: &Self) -> Result<Self, ResidueError> {
        self.ensure_same_ring(summand)?;
        Ok(self.derive(self.ring.add(self.value, summand.value)))
    }

    /// Computes `(self - subtrahend) mod m`; the result is never negative.
    pub fn sub(&self, subtrahend: &Self) -> Result<Self, ResidueError> {
        self.ensure_same_ring(subtrahend)?;
        Ok(self.derive(self.ring.sub(self.value, subtrahend.value)))
    }

    /// Computes `(self * factor) mod m`.
    pub fn mul(&self, factor: &Self) -> Result<Self, ResidueError> {
        self.ensure_same_ring(factor)?;
        Ok(self.derive(self.ring.mul(self.value, factor.value)))
    }

    pub fn neg(&self) -> Self {
        self.derive(self.ring.neg(self.value))
    }

    /// Returns the multiplicative inverse, the smallest positive `k` with `k * self ≡ 1`.
    ///
    /// # Errors
    ///
    /// `NoInverse` if the value is 0 or not coprime with the modulus.
    pub fn inv(&self) -> Result<Self, ResidueError> {
        Ok(self.derive(self.ring.inv(self.value)?))
    }

    /// "Divides" by multiplying with the multiplicative inverse of `divisor`.
    ///
    /// # Example
    ///
    /// ```
    /// # use residue_linalg::ring::ResidueScalar;
    /// let six = ResidueScalar::try_with(6, 10).unwrap();
    /// let three = ResidueScalar::try_with(3, 10).unwrap();
    /// assert_eq!(six.div(&three).unwrap().value(), 2); // 6 * 7 = 42 = 2 mod 10
    /// assert!(six.div(&ResidueScalar::zero(10).unwrap()).is_err());
    /// ```
    pub fn div(&self, divisor: &Self) -> Result<Self, ResidueError> {
        self.ensure_same_ring(divisor)?;
        let inverse = divisor.inv()?;
        self.mul(&inverse)
    }

    /// Compares two scalars by value, failing when their moduli differ.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, ResidueError> {
        self.ensure_same_ring(other)?;
        Ok(self.value.cmp(&other.value))
    }

    pub(crate) fn ensure_same_ring(&self, other: &Self) -> Result<(), ResidueError> {
        if self.ring != other.ring {
            return Err(ResidueError::ModulusMismatch {
                expected: self.modulus(),
                found: other.modulus(),
            });
        }
        Ok(())
    }

    fn derive(&self, value: u64) -> Self {
        Self {
            value,
            ring: self.ring,
        }
    }
}

/// Scalars of different moduli are unordered.
impl PartialOrd for ResidueScalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl fmt::Display for ResidueScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
