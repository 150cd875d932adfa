use std::fmt;

use auth::JwtError;
use chrono::Duration;

use crate::config::JwtConfig;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PlainPassword;
use crate::domain::user::models::Username;

/// Username and plaintext password for a single authentication attempt.
///
/// The username is kept raw: an unparseable name must fail exactly like an
/// unknown one.
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Command to register a new user with validated fields
#[derive(Debug)]
pub struct SignUpCommand {
    pub username: Username,
    pub password: PlainPassword,
    pub email: Option<EmailAddress>,
}

impl SignUpCommand {
    pub fn new(username: Username, password: PlainPassword, email: Option<EmailAddress>) -> Self {
        Self {
            username,
            password,
            email,
        }
    }
}

/// Access and refresh token minted together for one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Lifetimes and rotation policy for issued tokens.
#[derive(Debug, Clone, Copy)]
pub struct TokenSettings {
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub revoke_rotated_refresh_tokens: bool,
}

impl TryFrom<&JwtConfig> for TokenSettings {
    type Error = JwtError;

    /// # Errors
    /// * `InvalidParameters` - A lifetime is zero, negative or out of range
    fn try_from(config: &JwtConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            access_ttl: lifetime(
                "access_token_expire_minutes",
                config.access_token_expire_minutes,
            )?,
            refresh_ttl: lifetime(
                "refresh_token_expire_minutes",
                config.refresh_token_expire_minutes,
            )?,
            revoke_rotated_refresh_tokens: config.revoke_rotated_refresh_tokens,
        })
    }
}

fn lifetime(name: &str, minutes: i64) -> Result<Duration, JwtError> {
    if minutes <= 0 {
        return Err(JwtError::InvalidParameters(format!(
            "{} must be positive, got {}",
            name, minutes
        )));
    }

    Duration::try_minutes(minutes).ok_or_else(|| {
        JwtError::InvalidParameters(format!("{} is out of range: {}", name, minutes))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_is_redacted() {
        let credentials = Credentials::new("elliot".to_string(), "1234567890".to_string());
        let rendered = format!("{:?}", credentials);

        assert!(rendered.contains("elliot"));
        assert!(!rendered.contains("1234567890"));
    }

    #[test]
    fn test_token_settings_from_config() {
        let config = JwtConfig {
            secret_key: "secret".to_string(),
            algorithm: "HS256".to_string(),
            access_token_expire_minutes: 15,
            refresh_token_expire_minutes: 720,
            revoke_rotated_refresh_tokens: false,
        };

        let settings = TokenSettings::try_from(&config).unwrap();
        assert_eq!(settings.access_ttl, Duration::minutes(15));
        assert_eq!(settings.refresh_ttl, Duration::hours(12));
        assert!(!settings.revoke_rotated_refresh_tokens);
    }

    #[test]
    fn test_token_settings_reject_unusable_lifetimes() {
        let config = |access: i64, refresh: i64| JwtConfig {
            secret_key: "secret".to_string(),
            algorithm: "HS256".to_string(),
            access_token_expire_minutes: access,
            refresh_token_expire_minutes: refresh,
            revoke_rotated_refresh_tokens: true,
        };

        for (access, refresh) in [(0, 720), (15, -1), (-15, 720), (15, i64::MAX)] {
            assert!(
                matches!(
                    TokenSettings::try_from(&config(access, refresh)),
                    Err(JwtError::InvalidParameters(_))
                ),
                "access={} refresh={}",
                access,
                refresh
            );
        }
    }
}
