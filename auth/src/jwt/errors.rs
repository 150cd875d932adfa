use thiserror::Error;

/// Error type for token issuance and verification.
///
/// Messages are deliberately generic: they are shown to API callers and must
/// not reveal which verification step failed beyond the kind of problem.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    /// Missing or unsupported secret/algorithm, or claims that are not a
    /// mapping with a subject. Indicates misconfiguration, not user error.
    #[error("Invalid token parameters: {0}")]
    InvalidParameters(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Access token expired")]
    TokenExpired,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Invalid type for token")]
    WrongTokenKind,
}
