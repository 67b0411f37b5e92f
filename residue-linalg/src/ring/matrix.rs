//! Row-major matrices over Z_m and the row primitives elimination works with.

use std::fmt;

use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ResidueError;
use crate::ring::vector::{dot_entries, parse_values};
use crate::ring::{LINE_SEPARATOR, ResidueScalar, ResidueVector, Ring};

/// A rectangular, row-major matrix over Z_m.
///
/// Public operations never modify the receiver; the row primitives used by
/// elimination are crate-private and only ever run on a private copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "RawMatrix", try_from = "RawMatrix")]
pub struct ResidueMatrix {
    rows: Vec<Vec<ResidueScalar>>,
    width: usize,
    ring: Ring,
}

/// Wire form of a matrix. `width` is kept explicitly so matrices without rows survive.
#[derive(Serialize, Deserialize)]
struct RawMatrix {
    width: usize,
    modulus: u64,
    rows: Vec<Vec<u64>>,
}

impl From<ResidueMatrix> for RawMatrix {
    fn from(matrix: ResidueMatrix) -> Self {
        RawMatrix {
            width: matrix.width,
            modulus: matrix.modulus(),
            rows: matrix.to_values(),
        }
    }
}

impl TryFrom<RawMatrix> for ResidueMatrix {
    type Error = ResidueError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        if let Some((i, row)) = raw.rows.iter().find_position(|row| row.len() != raw.width) {
            return Err(ResidueError::FillMismatch(format!(
                "Row {} has length {} but expected {}",
                i,
                row.len(),
                raw.width
            )));
        }
        ResidueMatrix::try_with(raw.width, raw.modulus, &raw.rows.concat())
    }
}

impl ResidueMatrix {
    /// Builds a matrix of the given width from a flat, row-major list of raw values.
    ///
    /// # Errors
    ///
    /// `FillMismatch` if `width` is zero or does not divide the number of values,
    /// `ValueOutOfRange` / `InvalidModulus` for bad entries.
    ///
    /// # Example
    ///
    /// ```
    /// # use residue_linalg::ring::ResidueMatrix;
    /// let m = ResidueMatrix::try_with(2, 5, &[1, 2, 3, 4]).unwrap();
    /// assert_eq!((m.height(), m.width()), (2, 2));
    /// assert!(ResidueMatrix::try_with(3, 5, &[1, 2, 3, 4]).is_err());
    /// ```
    pub fn try_with(width: usize, modulus: u64, values: &[u64]) -> Result<Self, ResidueError> {
        let ring = Ring::try_with(modulus)?;
        check_fill(width, values.len())?;
        let rows = values
            .chunks(width)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|&v| ResidueScalar::in_ring(v, ring))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows, width, ring })
    }

    /// Builds a matrix from already constructed scalars, all sharing one modulus.
    pub fn try_from_scalars(
        width: usize,
        scalars: &[ResidueScalar],
    ) -> Result<Self, ResidueError> {
        let first = scalars.first().ok_or_else(|| {
            ResidueError::FillMismatch(
                "Cannot infer a modulus from an empty scalar list".to_string(),
            )
        })?;
        check_fill(width, scalars.len())?;
        for s in scalars {
            first.ensure_same_ring(s)?;
        }
        let rows = scalars.chunks(width).map(<[_]>::to_vec).collect();
        Ok(Self {
            rows,
            width,
            ring: first.ring(),
        })
    }

    /// Builds a matrix from nested rows of raw values.
    pub fn try_from_rows(modulus: u64, rows: &[Vec<u64>]) -> Result<Self, ResidueError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((i, row)) = rows.iter().find_position(|row| row.len() != width) {
            return Err(ResidueError::FillMismatch(format!(
                "Row {} has length {} but expected {}",
                i,
                row.len(),
                width
            )));
        }
        let flat: Vec<u64> = rows.concat();
        Self::try_with(width, modulus, &flat)
    }

    /// Creates an `n×n` identity matrix.
    pub fn identity(n: usize, modulus: u64) -> Result<Self, ResidueError> {
        let ring = Ring::try_with(modulus)?;
        let one = 1 % ring.modulus();
        let values: Vec<u64> = (0..n * n)
            .map(|i| if i / n == i % n { one } else { 0 })
            .collect();
        Self::try_with(n, modulus, &values)
    }

    pub(crate) fn from_parts(rows: Vec<Vec<ResidueScalar>>, width: usize, ring: Ring) -> Self {
        Self { rows, width, ring }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn modulus(&self) -> u64 {
        self.ring.modulus()
    }

    pub fn ring(&self) -> Ring {
        self.ring
    }

    pub fn get(&self, row: usize, col: usize) -> Option<ResidueScalar> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn value(&self, row: usize, col: usize) -> Option<u64> {
        self.get(row, col).map(|s| s.value())
    }

    pub fn row(&self, row: usize) -> Option<&[ResidueScalar]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn to_values(&self) -> Vec<Vec<u64>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(ResidueScalar::value).collect())
            .collect()
    }

    /// Exchanges two rows in place. Only the row buffers move, entries are not copied.
    pub(crate) fn swap_rows(&mut self, i: usize, j: usize) -> Result<(), ResidueError> {
        let height = self.height();
        if i == j || i >= height || j >= height {
            return Err(ResidueError::InvalidRowIndex(format!(
                "Cannot swap rows {} and {} of a matrix with {} rows",
                i, j, height
            )));
        }
        self.rows.swap(i, j);
        Ok(())
    }

    /// `target[col] += source[col] * factor` for every column.
    pub(crate) fn add_scaled_row(&mut self, source: usize, target: usize, factor: u64) {
        debug_assert!(source < self.height() && target < self.height());
        let ring = self.ring;
        for col in 0..self.width {
            let addend = ring.mul(self.rows[source][col].value(), factor);
            let cell = &mut self.rows[target][col];
            *cell = ResidueScalar::from_reduced(ring.add(cell.value(), addend), ring);
        }
    }

    /// A·x where A is this matrix and x a vector of length `width`.
    ///
    /// Every row is dotted with the vector, producing a vector of length `height`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the vector length differs from the column count,
    /// `ModulusMismatch` if the moduli differ.
    pub fn mul_vector(&self, vector: &ResidueVector) -> Result<ResidueVector, ResidueError> {
        if vector.len() != self.width {
            return Err(ResidueError::DimensionMismatch(format!(
                "Matrix columns ({}) must match vector length ({})",
                self.width,
                vector.len()
            )));
        }
        if vector.modulus() != self.modulus() {
            return Err(ResidueError::ModulusMismatch {
                expected: self.modulus(),
                found: vector.modulus(),
            });
        }

        let entries: Vec<ResidueScalar> = vector.iter().copied().collect();
        let result = self
            .rows
            .iter()
            .map(|row| dot_entries(row, &entries, self.ring))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ResidueVector::from_parts(result, self.ring))
    }

    /// Computes the matrix product `C = AB`.
    ///
    /// Output cells are independent, so the work is spread over the rayon pool by rows
    /// or by columns, whichever dimension of the result is larger.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `A.width != B.height`, `ModulusMismatch` if the moduli differ.
    pub fn mul_matrix(&self, other: &Self) -> Result<Self, ResidueError> {
        if self.ring != other.ring {
            return Err(ResidueError::ModulusMismatch {
                expected: self.modulus(),
                found: other.modulus(),
            });
        }
        if self.width != other.height() {
            return Err(ResidueError::DimensionMismatch(format!(
                "Inner dimensions must match for matrix multiplication ({} vs {})",
                self.width,
                other.height()
            )));
        }

        let height = self.height();
        let width = other.width;
        let ring = self.ring;
        let cell = |row: &[ResidueScalar], col: usize| {
            let sum = row.iter().zip(&other.rows).fold(0, |sum, (a, b_row)| {
                ring.add(sum, ring.mul(a.value(), b_row[col].value()))
            });
            ResidueScalar::from_reduced(sum, ring)
        };

        let rows: Vec<Vec<ResidueScalar>> = if height >= width {
            log::debug!(
                "multiplying {}x{} by {}x{}, parallel over rows",
                height,
                self.width,
                other.height(),
                width
            );
            self.rows
                .par_iter()
                .map(|row| (0..width).map(|col| cell(row, col)).collect::<Vec<_>>())
                .collect()
        } else {
            log::debug!(
                "multiplying {}x{} by {}x{}, parallel over columns",
                height,
                self.width,
                other.height(),
                width
            );
            let columns: Vec<Vec<ResidueScalar>> = (0..width)
                .into_par_iter()
                .map(|col| self.rows.iter().map(|row| cell(row, col)).collect())
                .collect();
            (0..height)
                .map(|r| columns.iter().map(|column| column[r]).collect())
                .collect()
        };

        Ok(Self::from_parts(rows, width, ring))
    }

    /// Whether every row's leading non-zero entry lies strictly right of the one above,
    /// with all zero rows at the bottom.
    pub fn is_row_echelon(&self) -> bool {
        let mut previous_lead: Option<usize> = None;
        let mut seen_zero_row = false;
        for row in &self.rows {
            match row.iter().position(|s| !s.is_zero()) {
                None => seen_zero_row = true,
                Some(_) if seen_zero_row => return false,
                Some(lead) => {
                    if previous_lead.is_some_and(|prev| lead <= prev) {
                        return false;
                    }
                    previous_lead = Some(lead);
                }
            }
        }
        true
    }

    /// Parses the textual rendering (one `[a;b;c]` line per row) back into a matrix.
    ///
    /// # Example
    ///
    /// ```
    /// # use residue_linalg::ring::ResidueMatrix;
    /// let m = ResidueMatrix::parse("[1;2]\n[3;4]\n", 5).unwrap();
    /// assert_eq!(m.to_values(), vec![vec![1, 2], vec![3, 4]]);
    /// ```
    pub fn parse(text: &str, modulus: u64) -> Result<Self, ResidueError> {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                let inner = line
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                    .ok_or_else(|| {
                        ResidueError::Parse(format!("Row must look like [a;b], got {:?}", line))
                    })?;
                parse_values(inner)
            })
            .collect::<Result<Vec<_>, _>>()?;
        if rows.is_empty() {
            return Err(ResidueError::Parse(
                "Matrix text contains no rows".to_string(),
            ));
        }
        Self::try_from_rows(modulus, &rows)
    }
}

/// One line per row, `[a;b;c]`, each terminated by the platform line separator.
impl fmt::Display for ResidueMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            write!(f, "[{}]{}", row.iter().join(";"), LINE_SEPARATOR)?;
        }
        Ok(())
    }
}

fn check_fill(width: usize, count: usize) -> Result<(), ResidueError> {
    if width == 0 || count % width != 0 {
        return Err(ResidueError::FillMismatch(format!(
            "{} values cannot fill rows of width {}",
            count, width
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    fn test_matrix(rows: &[Vec<u64>]) -> ResidueMatrix {
        ResidueMatrix::try_from_rows(13, rows).unwrap()
    }

    /// Deterministic matrix filled from a seed list, reduced mod `modulus`.
    fn seeded(rows: usize, cols: usize, seed: &[u64], modulus: u64) -> ResidueMatrix {
        let values: Vec<u64> = (0..rows * cols)
            .map(|i| {
                let s = if seed.is_empty() { 0 } else { seed[i % seed.len()] };
                s.wrapping_add(i as u64 * 7) % modulus
            })
            .collect();
        ResidueMatrix::try_with(cols, modulus, &values).unwrap()
    }

    #[test]
    fn test_construction_fill() {
        assert!(matches!(
            ResidueMatrix::try_with(3, 10, &[1, 2, 3, 4]),
            Err(ResidueError::FillMismatch(_))
        ));
        assert!(matches!(
            ResidueMatrix::try_with(0, 10, &[]),
            Err(ResidueError::FillMismatch(_))
        ));
        assert!(matches!(
            ResidueMatrix::try_with(2, 10, &[1, 10]),
            Err(ResidueError::ValueOutOfRange(_))
        ));
        let empty = ResidueMatrix::try_with(3, 10, &[]).unwrap();
        assert_eq!((empty.height(), empty.width()), (0, 3));
    }

    #[test]
    fn test_from_scalars() -> Result<(), ResidueError> {
        let a = ResidueScalar::try_with(1, 5)?;
        let b = ResidueScalar::try_with(4, 5)?;
        let m = ResidueMatrix::try_from_scalars(2, &[a, b, b, a])?;
        assert_eq!(m.to_values(), vec![vec![1, 4], vec![4, 1]]);

        let c = ResidueScalar::try_with(1, 7)?;
        assert!(ResidueMatrix::try_from_scalars(2, &[a, c]).is_err());
        assert!(ResidueMatrix::try_from_scalars(2, &[a, b, a]).is_err());
        Ok(())
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        assert!(matches!(
            ResidueMatrix::try_from_rows(13, &[vec![1, 2], vec![3]]),
            Err(ResidueError::FillMismatch(_))
        ));
    }

    #[test]
    fn test_swap_rows() -> Result<(), ResidueError> {
        let mut m = test_matrix(&[vec![1, 2], vec![3, 4]]);
        m.swap_rows(0, 1)?;
        assert_eq!(m.to_values(), vec![vec![3, 4], vec![1, 2]]);
        assert!(m.swap_rows(1, 1).is_err());
        assert!(m.swap_rows(0, 2).is_err());
        Ok(())
    }

    #[test]
    fn test_add_scaled_row() {
        let mut m = test_matrix(&[vec![1, 2], vec![3, 4]]);
        m.add_scaled_row(0, 1, 5);
        // [3 + 5, 4 + 10] mod 13
        assert_eq!(m.to_values(), vec![vec![1, 2], vec![8, 1]]);
    }

    #[test]
    fn test_matrix_vector_mul_ok() -> Result<(), ResidueError> {
        let a = test_matrix(&[vec![1, 2], vec![3, 4]]);
        let x = ResidueVector::try_with(13, &[5, 6])?;
        // R1: (1*5 + 2*6) % 13 = 4, R2: (3*5 + 4*6) % 13 = 0
        assert_eq!(a.mul_vector(&x)?.to_values(), vec![4, 0]);
        Ok(())
    }

    #[test]
    fn test_matrix_vector_mul_dimension_mismatch() -> Result<(), ResidueError> {
        let a = test_matrix(&[vec![1, 2], vec![3, 4]]);
        let x = ResidueVector::try_with(13, &[5, 6, 7])?;
        assert!(matches!(
            a.mul_vector(&x),
            Err(ResidueError::DimensionMismatch(_))
        ));
        let y = ResidueVector::try_with(11, &[5, 6])?;
        assert!(a.mul_vector(&y).is_err());
        Ok(())
    }

    #[test]
    fn test_matrix_mul_ok() -> Result<(), ResidueError> {
        let a = test_matrix(&[vec![1, 2], vec![3, 4]]);
        let b = test_matrix(&[vec![5, 6], vec![7, 8]]);
        assert_eq!(a.mul_matrix(&b)?.to_values(), vec![vec![6, 9], vec![4, 11]]);
        Ok(())
    }

    #[test]
    fn test_matrix_mul_shapes() -> Result<(), ResidueError> {
        // 2x1 · 1x3 takes the column-parallel path
        let c = test_matrix(&[vec![1], vec![2]]);
        let d = test_matrix(&[vec![3, 4, 5]]);
        assert_eq!(
            c.mul_matrix(&d)?.to_values(),
            vec![vec![3, 4, 5], vec![6, 8, 10]]
        );

        let e = test_matrix(&[vec![1, 2], vec![3, 4]]);
        let f = test_matrix(&[vec![1], vec![2], vec![3]]);
        assert!(matches!(
            e.mul_matrix(&f),
            Err(ResidueError::DimensionMismatch(_))
        ));
        Ok(())
    }

    #[test]
    fn test_identity() -> Result<(), ResidueError> {
        let a = test_matrix(&[vec![1, 2, 3], vec![4, 5, 6]]);
        let i = ResidueMatrix::identity(3, 13)?;
        assert_eq!(a.mul_matrix(&i)?, a);
        assert!(ResidueMatrix::identity(0, 13).is_err());
        assert_eq!(ResidueMatrix::identity(2, 1)?.to_values(), vec![vec![0, 0], vec![0, 0]]);
        Ok(())
    }

    #[test]
    fn test_row_echelon_predicate() {
        assert!(test_matrix(&[vec![1, 2, 3], vec![0, 0, 4], vec![0, 0, 0]]).is_row_echelon());
        assert!(!test_matrix(&[vec![1, 2], vec![1, 0]]).is_row_echelon());
        assert!(!test_matrix(&[vec![0, 0], vec![0, 1]]).is_row_echelon());
        assert!(!test_matrix(&[vec![0, 1], vec![0, 1]]).is_row_echelon());
    }

    #[test]
    fn test_rendering() {
        let m = test_matrix(&[vec![1, 12], vec![0, 3]]);
        let expected = format!("[1;12]{0}[0;3]{0}", LINE_SEPARATOR);
        assert_eq!(m.to_string(), expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(ResidueMatrix::parse("", 5).is_err());
        assert!(ResidueMatrix::parse("1;2\n", 5).is_err());
        assert!(ResidueMatrix::parse("[1;x]\n", 5).is_err());
        assert!(ResidueMatrix::parse("[1;2]\n[3]\n", 5).is_err());
    }

    #[test]
    fn test_serde_round_trip() -> Result<(), ResidueError> {
        let m = test_matrix(&[vec![1, 12], vec![0, 3]]);
        let json = serde_json::to_string(&m)?;
        assert_eq!(json, r#"{"width":2,"modulus":13,"rows":[[1,12],[0,3]]}"#);
        assert_eq!(serde_json::from_str::<ResidueMatrix>(&json)?, m);

        let empty = ResidueMatrix::try_with(3, 13, &[])?;
        let json = serde_json::to_string(&empty)?;
        assert_eq!(serde_json::from_str::<ResidueMatrix>(&json)?, empty);
        Ok(())
    }

    #[test]
    fn test_serde_rejects_invalid_matrices() {
        for json in [
            r#"{"width":2,"modulus":13,"rows":[[1,13],[0,3]]}"#,
            r#"{"width":2,"modulus":13,"rows":[[1,2],[3]]}"#,
            r#"{"width":0,"modulus":13,"rows":[]}"#,
            r#"{"width":1,"modulus":0,"rows":[[0]]}"#,
        ] {
            assert!(serde_json::from_str::<ResidueMatrix>(json).is_err(), "{}", json);
        }
    }

    #[quickcheck]
    fn prop_render_then_parse_round_trips(
        seed: Vec<u64>,
        rows: u8,
        cols: u8,
        modulus: u64,
    ) -> TestResult {
        if modulus == 0 {
            return TestResult::discard();
        }
        let m = seeded(rows as usize % 6, cols as usize % 6 + 1, &seed, modulus);
        if m.height() == 0 {
            return TestResult::discard();
        }
        TestResult::from_bool(ResidueMatrix::parse(&m.to_string(), modulus).ok() == Some(m))
    }

    #[quickcheck]
    fn prop_multiplication_is_associative(
        seed: Vec<u64>,
        dims: (u8, u8, u8, u8),
        modulus: u16,
    ) -> TestResult {
        if modulus == 0 {
            return TestResult::discard();
        }
        let modulus = modulus as u64;
        let (r, k, l, cols) = (
            dims.0 as usize % 5 + 1,
            dims.1 as usize % 5 + 1,
            dims.2 as usize % 5 + 1,
            dims.3 as usize % 5 + 1,
        );
        let a = seeded(r, k, &seed, modulus);
        let b = seeded(k, l, &seed[seed.len() / 2..], modulus);
        let c = seeded(l, cols, &seed[seed.len() / 3..], modulus);

        let left = a.mul_matrix(&b).and_then(|ab| ab.mul_matrix(&c));
        let right = b.mul_matrix(&c).and_then(|bc| a.mul_matrix(&bc));
        match (left, right) {
            (Ok(x), Ok(y)) => TestResult::from_bool(x == y),
            _ => TestResult::failed(),
        }
    }
}
