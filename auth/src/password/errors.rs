use thiserror::Error;

/// Error type for credential operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored credential is malformed: {0}")]
    MalformedCredential(String),
}
