//! Fixed-length vectors over Z_m.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::errors::ResidueError;
use crate::ring::{ResidueScalar, Ring};

/// A fixed-length vector over Z_m.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "RawVector", try_from = "RawVector")]
pub struct ResidueVector {
    entries: Vec<ResidueScalar>,
    ring: Ring,
}

#[derive(Serialize, Deserialize)]
struct RawVector {
    modulus: u64,
    values: Vec<u64>,
}

impl From<ResidueVector> for RawVector {
    fn from(vector: ResidueVector) -> Self {
        RawVector {
            modulus: vector.modulus(),
            values: vector.to_values(),
        }
    }
}

impl TryFrom<RawVector> for ResidueVector {
    type Error = ResidueError;

    fn try_from(raw: RawVector) -> Result<Self, Self::Error> {
        ResidueVector::try_with(raw.modulus, &raw.values)
    }
}

impl ResidueVector {
    /// Creates a new vector from a modulus and a set of raw values.
    pub fn try_with(modulus: u64, values: &[u64]) -> Result<Self, ResidueError> {
        let ring = Ring::try_with(modulus)?;
        let entries = values
            .iter()
            .map(|&v| ResidueScalar::in_ring(v, ring))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries, ring })
    }

    /// Creates a new vector from already built scalars.
    ///
    /// The modulus is taken from the first scalar, so the slice must not be empty.
    pub fn try_from_scalars(scalars: &[ResidueScalar]) -> Result<Self, ResidueError> {
        let first = scalars.first().ok_or_else(|| {
            ResidueError::InvalidParameters(
                "Cannot infer a modulus from an empty scalar list".to_string(),
            )
        })?;
        for s in scalars {
            first.ensure_same_ring(s)?;
        }
        Ok(Self {
            entries: scalars.to_vec(),
            ring: first.ring(),
        })
    }

    pub(crate) fn from_parts(entries: Vec<ResidueScalar>, ring: Ring) -> Self {
        Self { entries, ring }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn modulus(&self) -> u64 {
        self.ring.modulus()
    }

    pub fn get(&self, position: usize) -> Option<ResidueScalar> {
        self.entries.get(position).copied()
    }

    pub fn value(&self, position: usize) -> Option<u64> {
        self.entries.get(position).map(ResidueScalar::value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResidueScalar> {
        self.entries.iter()
    }

    pub fn to_values(&self) -> Vec<u64> {
        self.entries.iter().map(ResidueScalar::value).collect()
    }

    /// Computes the component-wise sum.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the lengths differ, `ModulusMismatch` if the moduli differ.
    pub fn add(&self, other: &Self) -> Result<Self, ResidueError> {
        self.ensure_compatible(other)?;
        let entries = self
            .entries
            .iter()
            .zip(&other.entries)
            .map(|(a, b)| a.add(b))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_parts(entries, self.ring))
    }

    /// Multiplies every entry with `factor`.
    ///
    /// # Errors
    ///
    /// `ModulusMismatch` if `factor` lives in a different ring, even for an empty vector.
    pub fn scale(&self, factor: &ResidueScalar) -> Result<Self, ResidueError> {
        if factor.ring() != self.ring {
            return Err(ResidueError::ModulusMismatch {
                expected: self.modulus(),
                found: factor.modulus(),
            });
        }
        let entries = self
            .entries
            .iter()
            .map(|a| a.mul(factor))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_parts(entries, self.ring))
    }

    /// Inner product `Σ self[i] * other[i] mod m`.
    pub fn dot(&self, other: &Self) -> Result<ResidueScalar, ResidueError> {
        self.ensure_compatible(other)?;
        dot_entries(&self.entries, &other.entries, self.ring)
    }

    /// Generalised cross product.
    ///
    /// Both operands are rotated left by one position (`u'`, `v'`), then
    /// `r[i] = u'[i] * v'[i+1] - u'[i+1] * v'[i]` with `i+1` wrapping to 0 at the end.
    /// For length 3 this is the ordinary cross product.
    ///
    /// # Example
    ///
    /// ```
    /// # use residue_linalg::ring::ResidueVector;
    /// let e1 = ResidueVector::try_with(7, &[1, 0, 0]).unwrap();
    /// let e2 = ResidueVector::try_with(7, &[0, 1, 0]).unwrap();
    /// assert_eq!(e1.cross(&e2).unwrap().to_values(), vec![0, 0, 1]);
    /// ```
    pub fn cross(&self, other: &Self) -> Result<Self, ResidueError> {
        self.ensure_compatible(other)?;
        let n = self.entries.len();
        if n == 0 {
            return Ok(Self::from_parts(Vec::new(), self.ring));
        }

        let mut first = self.entries.clone();
        let mut second = other.entries.clone();
        first.rotate_left(1);
        second.rotate_left(1);

        let entries = (0..n)
            .map(|i| {
                let next = (i + 1) % n;
                let minuend = first[i].mul(&second[next])?;
                let subtrahend = first[next].mul(&second[i])?;
                minuend.sub(&subtrahend)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_parts(entries, self.ring))
    }

    /// Parses the `{a;b;c]` rendering back into a vector of the given modulus.
    pub fn parse(text: &str, modulus: u64) -> Result<Self, ResidueError> {
        let inner = text
            .trim()
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| {
                ResidueError::Parse(format!("Vector must look like {{a;b], got {:?}", text))
            })?;
        let values = parse_values(inner)?;
        Self::try_with(modulus, &values)
    }

    fn ensure_compatible(&self, other: &Self) -> Result<(), ResidueError> {
        if self.entries.len() != other.entries.len() {
            return Err(ResidueError::DimensionMismatch(format!(
                "Vector lengths must match ({} vs {})",
                self.entries.len(),
                other.entries.len()
            )));
        }
        if self.ring != other.ring {
            return Err(ResidueError::ModulusMismatch {
                expected: self.modulus(),
                found: other.modulus(),
            });
        }
        Ok(())
    }
}

/// Renders as `{v0;v1;...;vn-1]`. The closing bracket is intentionally a square one.
impl fmt::Display for ResidueVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}]", self.entries.iter().join(";"))
    }
}

pub(crate) fn dot_entries(
    a: &[ResidueScalar],
    b: &[ResidueScalar],
    ring: Ring,
) -> Result<ResidueScalar, ResidueError> {
    a.iter()
        .zip(b)
        .try_fold(ResidueScalar::in_ring(0, ring)?, |sum, (x, y)| {
            sum.add(&x.mul(y)?)
        })
}

/// Splits `a;b;c` into integers; an empty string is an empty list.
pub(crate) fn parse_values(inner: &str) -> Result<Vec<u64>, ResidueError> {
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split(';')
        .map(|token| {
            token
                .trim()
                .parse::<u64>()
                .map_err(|e| ResidueError::Parse(format!("Invalid entry {:?}: {}", token, e)))
        })
        .collect()
}
