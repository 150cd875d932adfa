//! Authentication utilities library
//!
//! Provides the credential and token primitives the API builds on:
//! - Password hashing (Argon2id)
//! - Typed access/refresh JWT issuance and verification
//!
//! Services define their own ports around these types and keep storage,
//! users and policy (rotation, revocation) on their side.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Access and Refresh Tokens
//! ```
//! use auth::{JwtError, JwtHandler, TokenKind};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", "HS256").unwrap();
//! let access = handler.issue("elliot", TokenKind::Access, Duration::minutes(15)).unwrap();
//! let refresh = handler.issue("elliot", TokenKind::Refresh, Duration::hours(12)).unwrap();
//!
//! assert_eq!(handler.decode_access_token(&access).unwrap().sub, "elliot");
//! assert_eq!(handler.decode_refresh_token(&refresh).unwrap().sub, "elliot");
//! assert_eq!(handler.decode_access_token(&refresh), Err(JwtError::WrongTokenKind));
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordHasher;
