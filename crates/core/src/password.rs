// Password hashing using Argon2id
// Decision: Use Argon2id as it's the recommended algorithm for password hashing
// Decision: Cost parameters are configurable; verification reads them back from the stored hash

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::{AuthError, Result};

/// Plaintext used to build the decoy hash for unknown-email logins
const DECOY_PASSWORD: &str = "gatekeep-decoy-password";

/// Argon2 cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashingParams {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Derives and checks one-way password hashes
#[derive(Clone)]
pub struct CredentialManager {
    argon2: Argon2<'static>,
    decoy_hash: String,
}

impl std::fmt::Debug for CredentialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialManager").finish_non_exhaustive()
    }
}

impl CredentialManager {
    /// Build a manager with the given cost parameters.
    ///
    /// Fails with [`AuthError::Hashing`] when Argon2 rejects the parameters.
    pub fn new(params: HashingParams) -> Result<Self> {
        let params = Params::new(
            params.memory_kib,
            params.iterations,
            params.parallelism,
            None,
        )
        .map_err(|e| AuthError::hashing(format!("invalid argon2 parameters: {}", e)))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let decoy_hash = hash_with(&argon2, DECOY_PASSWORD)?;

        Ok(Self { argon2, decoy_hash })
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// The result is a PHC string (`$argon2id$v=19$m=...`) that embeds the salt
    /// and cost, so it can be verified later without extra state.
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        hash_with(&self.argon2, plaintext)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// A mismatch and a malformed stored hash both yield
    /// [`AuthError::InvalidCredentials`].
    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<()> {
        let parsed = PasswordHash::new(stored_hash).map_err(|e| {
            tracing::warn!(error = %e, "Stored password hash is malformed");
            AuthError::InvalidCredentials
        })?;

        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .map_err(|_| AuthError::InvalidCredentials)
    }

    /// Boolean form of [`CredentialManager::verify`]
    pub fn matches(&self, plaintext: &str, stored_hash: &str) -> bool {
        self.verify(plaintext, stored_hash).is_ok()
    }

    /// Burn one verification against a fixed hash.
    ///
    /// Used when the email is unknown so that login latency matches the
    /// wrong-password path. Always returns [`AuthError::InvalidCredentials`].
    pub fn verify_decoy(&self, plaintext: &str) -> Result<()> {
        let _ = self.verify(plaintext, &self.decoy_hash);
        Err(AuthError::InvalidCredentials)
    }
}

fn hash_with(argon2: &Argon2<'_>, plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = argon2
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| AuthError::hashing(format!("failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}
