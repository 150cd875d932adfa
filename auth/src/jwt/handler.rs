use std::str::FromStr;

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Serialize;
use serde_json::json;
use serde_json::Value;
use uuid::Uuid;

use super::claims::Claims;
use super::claims::TokenKind;
use super::errors::JwtError;

/// Issues and verifies typed, time-bounded JWTs signed with a shared secret.
///
/// Secret and algorithm come from configuration and are validated once, at
/// construction. Only HMAC algorithms are accepted since both sides share
/// the same key.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
}

impl JwtHandler {
    /// Create a handler for a secret and a named algorithm (`HS256`, `HS384`
    /// or `HS512`).
    ///
    /// # Errors
    /// * `InvalidParameters` - Empty secret, unknown or non-HMAC algorithm
    pub fn new(secret: &[u8], algorithm: &str) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidParameters(
                "signing secret is empty".to_string(),
            ));
        }

        let algorithm = Algorithm::from_str(algorithm).map_err(|_| {
            JwtError::InvalidParameters(format!("unsupported algorithm: {}", algorithm))
        })?;

        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(JwtError::InvalidParameters(format!(
                "{:?} is not a shared-secret algorithm",
                algorithm
            )));
        }

        let mut validation = Validation::new(algorithm);
        // Expiry is compared against the wall clock as is.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
        })
    }

    /// Sign `claims` as a token of the given kind.
    ///
    /// The claims set is the caller's mapping plus `iat = now`,
    /// `exp = now + ttl`, `token_type` and a random `jti` unless the caller
    /// provided one. Two tokens minted within the same second therefore
    /// still differ. A non-positive `ttl` yields a token that is already
    /// expired; lifetimes are validated where they are configured.
    ///
    /// # Errors
    /// * `InvalidParameters` - `claims` is not a JSON object with a string `sub`,
    ///   or `now + ttl` is not a representable timestamp
    /// * `EncodingFailed` - Signing failed
    pub fn create_token<T: Serialize>(
        &self,
        claims: &T,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let mut payload = match serde_json::to_value(claims) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(JwtError::InvalidParameters(format!(
                    "claims must be a mapping, got {}",
                    other
                )))
            }
            Err(e) => return Err(JwtError::InvalidParameters(e.to_string())),
        };

        if !matches!(payload.get("sub"), Some(Value::String(_))) {
            return Err(JwtError::InvalidParameters(
                "claims must carry a string 'sub'".to_string(),
            ));
        }

        let issued_at = Utc::now();
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::InvalidParameters(format!("token lifetime out of range: {}", ttl))
        })?;

        payload.insert("iat".to_string(), json!(issued_at.timestamp()));
        payload.insert("exp".to_string(), json!(expires_at.timestamp()));
        payload.insert("token_type".to_string(), json!(kind));
        payload
            .entry("jti")
            .or_insert_with(|| json!(Uuid::new_v4().to_string()));

        encode(&Header::new(self.algorithm), &payload, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Sign a token carrying only `sub` plus the registered claims.
    pub fn issue(&self, subject: &str, kind: TokenKind, ttl: Duration) -> Result<String, JwtError> {
        self.create_token(&json!({ "sub": subject }), kind, ttl)
    }

    /// Verify an access token.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` has passed
    /// * `InvalidToken` - Bad signature, malformed token or claims
    /// * `WrongTokenKind` - Token is valid but not an access token
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.verify(token).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            _ => JwtError::InvalidToken,
        })?;

        Self::expect_kind(claims, TokenKind::Access)
    }

    /// Verify a refresh token.
    ///
    /// # Errors
    /// * `RefreshTokenExpired` - `exp` has passed
    /// * `InvalidRefreshToken` - Bad signature, malformed token or claims
    /// * `WrongTokenKind` - Token is valid but not a refresh token
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.verify(token).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::RefreshTokenExpired,
            _ => JwtError::InvalidRefreshToken,
        })?;

        Self::expect_kind(claims, TokenKind::Refresh)
    }

    fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &self.validation).map(|data| data.claims)
    }

    fn expect_kind(claims: Claims, expected: TokenKind) -> Result<Claims, JwtError> {
        if claims.token_type == expected {
            Ok(claims)
        } else {
            Err(JwtError::WrongTokenKind)
        }
    }
}
