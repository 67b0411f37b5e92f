#[derive(thiserror::Error, Debug)]
pub enum ResidueError {
    /// Error when creating a ring with a modulus of zero.
    #[error("InvalidModulus: {0}")]
    InvalidModulus(String),
    /// Error when a value does not lie in `[0, modulus)`.
    #[error("ValueOutOfRange: {0}")]
    ValueOutOfRange(String),
    /// Error when the supplied values cannot fill a rectangular matrix.
    #[error("FillMismatch: {0}")]
    FillMismatch(String),
    #[error("Parse: {0}")]
    Parse(String),

    /// Error performing ops on elements, vectors or matrices with different moduli.
    #[error("ModulusMismatch: expected modulus {expected}, got {found}")]
    ModulusMismatch { expected: u64, found: u64 },
    #[error("DimensionMismatch: {0}")]
    DimensionMismatch(String),
    #[error("InvalidRowIndex: {0}")]
    InvalidRowIndex(String),

    /// Error when trying to find a modular inverse that doesn't exist (gcd(a, m) != 1).
    #[error("NoInverse: {0}")]
    NoInverse(String),
    /// Error when no multiple of the pivot cancels an entry below it.
    #[error("NoEliminationFactor: {0}")]
    NoEliminationFactor(String),

    #[error("InvalidParameters: {0}")]
    InvalidParameters(String),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}
