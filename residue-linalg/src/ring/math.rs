//! Implementation of ring ops using modular arithmetic.

use serde::{Deserialize, Serialize};

use crate::errors::ResidueError;

use super::{extended_gcd, gcd};

/// Represents a finite ring Z_m using modular arithmetic.
///
/// All operations take values already reduced into `[0, modulus)` and return
/// reduced values. Products are widened to `u128`, so any `u64` modulus works.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRing")]
pub struct Ring {
    modulus: u64,
}

#[derive(Deserialize)]
struct RawRing {
    modulus: u64,
}

impl TryFrom<RawRing> for Ring {
    type Error = ResidueError;

    fn try_from(raw: RawRing) -> Result<Self, Self::Error> {
        Ring::try_with(raw.modulus)
    }
}

impl Ring {
    /// Create a new Ring with the given modulus.
    ///
    /// The modulus must be positive.
    pub fn try_with(modulus: u64) -> Result<Self, ResidueError> {
        if modulus == 0 {
            return Err(ResidueError::InvalidModulus(
                "Modulus must be greater than 0, got 0".to_string(),
            ));
        }

        Ok(Ring { modulus })
    }

    /// Returns the modulus of the ring.
    ///
    /// # Example
    ///
    /// ```
    /// # use residue_linalg::ring::Ring;
    /// let ring = Ring::try_with(13).unwrap();
    /// assert_eq!(ring.modulus(), 13);
    /// ```
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Checks that `value` is a canonical representative of this ring.
    pub fn check(&self, value: u64) -> Result<u64, ResidueError> {
        if value >= self.modulus {
            return Err(ResidueError::ValueOutOfRange(format!(
                "Value {} must be lower than modulus {}",
                value, self.modulus
            )));
        }

        Ok(value)
    }

    /// Computes `(a + b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use residue_linalg::ring::Ring;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.add(7, 5), 2);
    /// assert_eq!(ring.add(9, 1), 0);
    /// ```
    pub fn add(&self, a: u64, b: u64) -> u64 {
        ((a as u128 + b as u128) % self.modulus as u128) as u64
    }

    /// Computes `(a - b) mod modulus`, always in `[0, modulus)`.
    ///
    /// # Example
    ///
    /// ```
    /// # use residue_linalg::ring::Ring;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.sub(7, 5), 2);
    /// assert_eq!(ring.sub(3, 5), 8);
    /// ```
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        let m = self.modulus as u128;
        ((a as u128 + m - b as u128 % m) % m) as u64
    }

    /// Computes `(a * b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use residue_linalg::ring::Ring;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.mul(7, 5), 5);
    /// assert_eq!(ring.mul(4, 5), 0);
    /// ```
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.modulus as u128) as u64
    }

    /// Computes the additive inverse `-a mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use residue_linalg::ring::Ring;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.neg(3), 7);
    /// assert_eq!(ring.neg(0), 0);
    /// ```
    pub fn neg(&self, a: u64) -> u64 {
        self.sub(0, a)
    }

    /// Computes the modular multiplicative inverse `a^-1 mod modulus`.
    ///
    /// The inverse is the unique `k` in `[1, modulus)` with `k * a ≡ 1`. It exists if and
    /// only if `a != 0` and `gcd(a, modulus) == 1`; this is checked before solving, so
    /// the call never searches.
    ///
    /// # Errors
    ///
    /// Returns `ResidueError::NoInverse` if `a` is 0 or shares a factor with the modulus.
    ///
    /// # Example
    ///
    /// ```
    /// # use residue_linalg::ring::Ring;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.inv(3).unwrap(), 7); // 3 * 7 = 21 = 1 mod 10
    /// assert_eq!(ring.inv(9).unwrap(), 9);
    /// assert!(ring.inv(2).is_err());
    /// assert!(ring.inv(0).is_err());
    /// ```
    pub fn inv(&self, a: u64) -> Result<u64, ResidueError> {
        let a_norm = a % self.modulus;
        if a_norm == 0 {
            return Err(ResidueError::NoInverse(format!(
                "Cannot invert 0 in mod {}",
                self.modulus
            )));
        }

        let g = gcd(a_norm, self.modulus);
        if g != 1 {
            return Err(ResidueError::NoInverse(format!(
                "Modular inverse does not exist for {} mod {} (gcd={})",
                a_norm, self.modulus, g
            )));
        }

        let (_, x, _) = extended_gcd(a_norm as i128, self.modulus as i128);
        Ok(x.rem_euclid(self.modulus as i128) as u64)
    }

    /// Finds the smallest `k >= 0` with `(k * pivot + target) ≡ 0 (mod modulus)`.
    ///
    /// Solvable iff `g = gcd(pivot, modulus)` divides `-target`; the solutions then form
    /// the class `k0 + j * (modulus / g)` and `k0` is returned.
    ///
    /// # Errors
    ///
    /// Returns `ResidueError::NoEliminationFactor` when no such `k` exists.
    ///
    /// # Example
    ///
    /// ```
    /// # use residue_linalg::ring::Ring;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.elimination_factor(4, 4).unwrap(), 4); // 4*4 + 4 = 20
    /// assert_eq!(ring.elimination_factor(5, 5).unwrap(), 1);
    /// assert!(ring.elimination_factor(5, 3).is_err());
    /// ```
    pub fn elimination_factor(&self, pivot: u64, target: u64) -> Result<u64, ResidueError> {
        let pivot = pivot % self.modulus;
        let need = self.neg(target % self.modulus);
        let g = gcd(pivot, self.modulus);

        if need % g != 0 {
            return Err(ResidueError::NoEliminationFactor(format!(
                "No multiple of {} cancels {} in mod {} (gcd={})",
                pivot, target, self.modulus, g
            )));
        }

        let reduced = Ring {
            modulus: self.modulus / g,
        };
        if reduced.modulus == 1 {
            return Ok(0);
        }

        let inverse = reduced.inv(pivot / g)?;
        Ok(reduced.mul(need / g, inverse))
    }
}
