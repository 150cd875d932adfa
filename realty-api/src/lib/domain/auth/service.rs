use std::sync::Arc;

use async_trait::async_trait;
use auth::JwtError;
use auth::TokenKind;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::SignUpCommand;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::models::TokenSettings;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::CredentialHasher;
use crate::domain::auth::ports::RevokedTokenRepository;
use crate::domain::auth::ports::TokenIssuer;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PlainPassword;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::ports::UserRepository;

/// Verified against when the username is unknown, so that both failure
/// branches of a login pay for one hash verification.
const TIMING_EQUALIZER: &str = "timing-equalizer-password";

/// Domain service implementation for authentication.
///
/// Holds no per-user state: accounts live in the user repository, tokens are
/// self-contained and only rotated refresh tokens are remembered.
pub struct AuthService<UR, RR, H, T>
where
    UR: UserRepository,
    RR: RevokedTokenRepository,
    H: CredentialHasher,
    T: TokenIssuer,
{
    users: Arc<UR>,
    revoked_tokens: Arc<RR>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    settings: TokenSettings,
    timing_hash: String,
}

impl<UR, RR, H, T> AuthService<UR, RR, H, T>
where
    UR: UserRepository,
    RR: RevokedTokenRepository,
    H: CredentialHasher,
    T: TokenIssuer,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - Credential store
    /// * `revoked_tokens` - Denylist for rotated refresh tokens
    /// * `hasher` - Password hashing implementation
    /// * `tokens` - Token issuer/verifier
    /// * `settings` - Token lifetimes and rotation policy
    ///
    /// # Errors
    /// * `Password` - The hasher cannot produce the unknown-user verification hash
    pub fn new(
        users: Arc<UR>,
        revoked_tokens: Arc<RR>,
        hasher: Arc<H>,
        tokens: Arc<T>,
        settings: TokenSettings,
    ) -> Result<Self, AuthError> {
        let timing_hash = hasher.hash(TIMING_EQUALIZER)?;

        Ok(Self {
            users,
            revoked_tokens,
            hasher,
            tokens,
            settings,
            timing_hash,
        })
    }

    async fn hash_password(&self, password: PlainPassword) -> Result<String, AuthError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(password.expose()))
            .await
            .map_err(|e| AuthError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(AuthError::from)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AuthError::Internal(format!("Verification task failed: {}", e)))?
            .map_err(AuthError::from)
    }
}

#[async_trait]
impl<UR, RR, H, T> AuthServicePort for AuthService<UR, RR, H, T>
where
    UR: UserRepository,
    RR: RevokedTokenRepository,
    H: CredentialHasher,
    T: TokenIssuer,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<User, AuthError> {
        let SignUpCommand {
            username,
            password,
            email,
        } = command;

        if self.users.find_by_username(&username).await?.is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        if let Some(email) = &email {
            if self.users.find_by_email(email).await?.is_some() {
                return Err(AuthError::EmailTaken(email.to_string()));
            }
        }

        let password_hash = self.hash_password(password).await?;

        // The store re-checks uniqueness; a concurrent sign-up that slipped
        // past the lookups above fails here with the same errors.
        let user = self
            .users
            .insert(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User signed up");

        Ok(user)
    }

    async fn authenticate(&self, credentials: Credentials) -> Result<User, AuthError> {
        let Credentials { username, password } = credentials;

        let user = match Username::new(username) {
            Ok(username) => self.users.find_by_username(&username).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            let _ = self
                .verify_password(password, self.timing_hash.clone())
                .await;
            return Err(AuthError::InvalidCredentials);
        };

        match self
            .verify_password(password, user.password_hash.clone())
            .await
        {
            Ok(true) if user.is_active => Ok(user),
            Ok(true) => {
                tracing::warn!(username = %user.username, "Login attempt on inactive account");
                Err(AuthError::InvalidCredentials)
            }
            Ok(false) => Err(AuthError::InvalidCredentials),
            Err(AuthError::Password(e)) => {
                tracing::error!(
                    username = %user.username,
                    error = %e,
                    "Stored password hash could not be read"
                );
                Err(AuthError::InvalidCredentials)
            }
            Err(e) => Err(e),
        }
    }

    async fn login(&self, credentials: Credentials) -> Result<TokenPair, AuthError> {
        let user = self.authenticate(credentials).await?;
        let pair = self.create_token_pair(user.username.as_str())?;

        tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(pair)
    }

    fn create_token_pair(&self, subject: &str) -> Result<TokenPair, AuthError> {
        let access_token = self
            .tokens
            .issue(subject, TokenKind::Access, self.settings.access_ttl)?;
        let refresh_token = self
            .tokens
            .issue(subject, TokenKind::Refresh, self.settings.refresh_ttl)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.tokens.decode_refresh_token(refresh_token)?;

        let username =
            Username::new(claims.sub.clone()).map_err(|_| JwtError::InvalidRefreshToken)?;
        match self.users.find_by_username(&username).await? {
            Some(user) if user.is_active => {}
            Some(_) => {
                tracing::warn!(username = %username, "Refresh attempt on inactive account");
                return Err(JwtError::InvalidRefreshToken.into());
            }
            None => return Err(JwtError::InvalidRefreshToken.into()),
        }

        // Mint before spending the presented token, so a signing failure
        // leaves it usable.
        let pair = self.create_token_pair(username.as_str())?;

        if self.settings.revoke_rotated_refresh_tokens {
            let jti = claims.jti.as_deref().ok_or(JwtError::InvalidRefreshToken)?;
            let expires_at = claims.expires_at().ok_or(JwtError::InvalidRefreshToken)?;

            if !self.revoked_tokens.revoke(jti, expires_at).await? {
                tracing::warn!(
                    subject = %claims.sub,
                    jti = %jti,
                    "Rotated refresh token presented again"
                );
                return Err(AuthError::RefreshTokenReused);
            }
        }

        Ok(pair)
    }

    async fn resolve_identity(&self, access_token: &str) -> Result<User, AuthError> {
        let claims = self.tokens.decode_access_token(access_token)?;
        let username = Username::new(claims.sub).map_err(|_| JwtError::InvalidToken)?;

        match self.users.find_by_username(&username).await? {
            Some(user) if user.is_active => Ok(user),
            _ => Err(JwtError::InvalidToken.into()),
        }
    }
}
