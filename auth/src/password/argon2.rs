use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Salted, deliberately expensive password hashing (Argon2id).
///
/// Hashing the same plaintext twice yields two different PHC strings because
/// every call draws a fresh salt, so hashes are checked with [`verify`],
/// never compared for equality.
///
/// [`verify`]: PasswordHasher::verify
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with the Argon2 default cost parameters.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Create a hasher with explicit cost parameters.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes
    /// * `parallelism` - Degree of parallelism (lanes)
    ///
    /// # Errors
    /// * `InvalidParameters` - Parameters are outside the ranges Argon2 accepts
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// PHC string (algorithm, parameters, salt and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored PHC string.
    ///
    /// The cost parameters embedded in `hash` are used, so hashes produced
    /// under older settings keep verifying after the configuration changes.
    ///
    /// # Returns
    /// `Ok(true)` on match, `Ok(false)` on mismatch
    ///
    /// # Errors
    /// * `VerificationFailed` - `hash` is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::with_params(1024, 1, 1).expect("valid argon2 params")
    }

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hasher = cheap_hasher();

        for password in ["1234567890", "los-angeles"] {
            let hash = hasher.hash(password).expect("Failed to hash password");
            assert!(hasher.verify(password, &hash).expect("Failed to verify"));
        }
    }

    #[test]
    fn test_verify_rejects_other_password() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("1234567890").expect("Failed to hash password");

        assert!(!hasher
            .verify("0987654321", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = cheap_hasher();
        let first = hasher.hash("1234567890").unwrap();
        let second = hasher.hash("1234567890").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
    }

    #[test]
    fn test_verify_uses_params_embedded_in_hash() {
        let hash = cheap_hasher().hash("1234567890").unwrap();
        let stronger = PasswordHasher::with_params(2048, 2, 1).unwrap();

        assert!(stronger.verify("1234567890", &hash).unwrap());
    }

    #[test]
    fn test_verify_malformed_hash() {
        let result = cheap_hasher().verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
    }

    #[test]
    fn test_invalid_params() {
        let result = PasswordHasher::with_params(0, 0, 0);
        assert!(matches!(result, Err(PasswordError::InvalidParameters(_))));
    }
}
