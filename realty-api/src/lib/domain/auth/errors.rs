use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Errors surfaced by sign-up, login, refresh and identity resolution.
///
/// Transport status is chosen by the inbound adapter, not here.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("User with username '{0}' already exists")]
    UsernameTaken(String),

    #[error("User with email '{0}' already exists")]
    EmailTaken(String),

    /// Same error whether the user is unknown or the password is wrong.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error("Refresh token has already been used")]
    RefreshTokenReused,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameAlreadyExists(username) => AuthError::UsernameTaken(username),
            UserError::EmailAlreadyExists(email) => AuthError::EmailTaken(email),
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::DatabaseError(_) => AuthError::Repository(err.to_string()),
        }
    }
}
