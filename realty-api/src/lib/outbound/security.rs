use auth::Claims;
use auth::JwtError;
use auth::JwtHandler;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenKind;
use chrono::Duration;

use crate::domain::auth::ports::CredentialHasher;
use crate::domain::auth::ports::TokenIssuer;

impl CredentialHasher for PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        PasswordHasher::hash(self, password)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        PasswordHasher::verify(self, password, hash)
    }
}

impl TokenIssuer for JwtHandler {
    fn issue(&self, subject: &str, kind: TokenKind, ttl: Duration) -> Result<String, JwtError> {
        JwtHandler::issue(self, subject, kind, ttl)
    }

    fn decode_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        JwtHandler::decode_access_token(self, token)
    }

    fn decode_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        JwtHandler::decode_refresh_token(self, token)
    }
}
