use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::credential::Credential;
use super::errors::PasswordError;

/// Memory cost in KiB.
const MEMORY_COST_KIB: u32 = 19_456;
/// Number of passes over memory.
const TIME_COST: u32 = 2;
/// Degree of parallelism.
const PARALLELISM: u32 = 1;

/// Salted, adaptive password hashing (Argon2id with a fixed work factor).
///
/// Stateless and cheap to copy; every call builds its own Argon2 context, so a
/// single hasher can be used from many threads at once. Both operations are
/// deliberately slow and should be run off the async executor.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialHasher;

impl CredentialHasher {
    /// Create a new credential hasher.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password into a storable credential.
    ///
    /// A fresh random salt is drawn for every call, so hashing the same
    /// password twice yields two different credentials.
    ///
    /// # Errors
    /// * `HashingFailed` - Entropy source or hashing backend failed
    pub fn hash(&self, password: &str) -> Result<Credential, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Self::argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| Credential::from_stored(hash.to_string()))
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored credential.
    ///
    /// Parameters and salt are read from the credential itself and the final
    /// digest comparison is constant-time. A wrong password is `Ok(false)`,
    /// never an error.
    ///
    /// # Errors
    /// * `MalformedCredential` - Stored value is not a parseable PHC string
    pub fn verify(&self, password: &str, credential: &Credential) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(credential.as_str())
            .map_err(|e| PasswordError::MalformedCredential(e.to_string()))?;

        match Self::argon2()?.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedCredential(e.to_string())),
        }
    }

    fn argon2() -> Result<Argon2<'static>, PasswordError> {
        let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}
