use thiserror::Error;

/// Validation errors for canonical primitives.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When an algorithm name is not in the supported set.
    #[error("unsupported hash algorithm '{value}' (expected sha256, sha384, or sha512)")]
    UnsupportedAlgorithm {
        /// Offending algorithm name.
        value: String,
    },
}
