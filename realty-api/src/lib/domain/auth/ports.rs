use async_trait::async_trait;
use auth::Claims;
use auth::JwtError;
use auth::PasswordError;
use auth::TokenKind;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::SignUpCommand;
use crate::domain::auth::models::TokenPair;
use crate::domain::user::models::User;

/// Port for authentication operations consumed by the inbound adapters.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `EmailTaken` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `Repository` - Store operation failed
    async fn sign_up(&self, command: SignUpCommand) -> Result<User, AuthError>;

    /// Check a username/password pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user, inactive user or wrong password
    /// * `Repository` - Store operation failed
    async fn authenticate(&self, credentials: Credentials) -> Result<User, AuthError>;

    /// Authenticate and mint a token pair for the user.
    ///
    /// # Errors
    /// * `InvalidCredentials` - See [`AuthServicePort::authenticate`]
    /// * `Token` - Signing failed (misconfiguration)
    async fn login(&self, credentials: Credentials) -> Result<TokenPair, AuthError>;

    /// Mint one access and one refresh token for `subject`.
    fn create_token_pair(&self, subject: &str) -> Result<TokenPair, AuthError>;

    /// Exchange a refresh token for a brand-new pair.
    ///
    /// # Errors
    /// * `Token(RefreshTokenExpired)` - Refresh token has expired
    /// * `Token(InvalidRefreshToken)` - Invalid signature or format, unknown or inactive user
    /// * `Token(WrongTokenKind)` - An access token was presented
    /// * `RefreshTokenReused` - Token was already exchanged (rotation revocation on)
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Turn a bearer access token into the active user it names.
    ///
    /// # Errors
    /// * `Token(TokenExpired)` - Access token has expired
    /// * `Token(InvalidToken)` - Invalid token, unknown or inactive user
    /// * `Token(WrongTokenKind)` - A refresh token was presented
    async fn resolve_identity(&self, access_token: &str) -> Result<User, AuthError>;
}

/// One-way password hashing.
///
/// Implementations are CPU-bound and synchronous; the service moves calls
/// onto the blocking pool.
pub trait CredentialHasher: Send + Sync + 'static {
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// `Ok(false)` on mismatch, `Err` only for an unreadable hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

/// Signed token issuance and verification.
pub trait TokenIssuer: Send + Sync + 'static {
    fn issue(&self, subject: &str, kind: TokenKind, ttl: Duration) -> Result<String, JwtError>;

    fn decode_access_token(&self, token: &str) -> Result<Claims, JwtError>;

    fn decode_refresh_token(&self, token: &str) -> Result<Claims, JwtError>;
}

/// Denylist of refresh tokens that were already exchanged.
#[async_trait]
pub trait RevokedTokenRepository: Send + Sync + 'static {
    /// Record `jti` as revoked until `expires_at`.
    ///
    /// Insert-if-absent in a single atomic step.
    ///
    /// # Returns
    /// `true` if the token was newly revoked, `false` if it already was
    ///
    /// # Errors
    /// * `Repository` - Store operation failed
    async fn revoke(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<bool, AuthError>;

    /// Drop entries for tokens that have expired by `now`.
    ///
    /// # Returns
    /// Number of entries removed
    ///
    /// # Errors
    /// * `Repository` - Store operation failed
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AuthError>;
}
