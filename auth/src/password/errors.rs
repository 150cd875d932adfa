use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Invalid hashing parameters: {0}")]
    InvalidParameters(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash could not be parsed. Callers must treat this exactly
    /// like a mismatch when deciding whether to let someone in.
    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
