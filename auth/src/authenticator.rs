use crate::jwt::IdentityClaims;
use crate::jwt::TokenError;
use crate::jwt::TokenService;
use crate::password::Credential;
use crate::password::CredentialHasher;
use crate::password::PasswordError;

/// Authentication coordinator combining credential verification and token issuance.
///
/// Holds the only copy of the token service; share it behind an `Arc`.
pub struct Authenticator {
    credential_hasher: CredentialHasher,
    token_service: TokenService,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator around a configured token service.
    pub fn new(token_service: TokenService) -> Self {
        Self {
            credential_hasher: CredentialHasher::new(),
            token_service,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<Credential, PasswordError> {
        self.credential_hasher.hash(password)
    }

    /// Verify credentials and issue a token for the subject.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `credential` - Stored credential
    /// * `subject_id` - Account identifier placed in the token
    /// * `subject_name` - Username placed in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored credential could not be checked
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        credential: &Credential,
        subject_id: i64,
        subject_name: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.credential_hasher.verify(password, credential)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_service.issue(subject_id, subject_name)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification.
    ///
    /// Used right after registration, where the password has just been set.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(&self, subject_id: i64, subject_name: &str) -> Result<String, TokenError> {
        self.token_service.issue(subject_id, subject_name)
    }

    /// Validate a bearer token and return its identity claims.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, tampered with or expired
    pub fn validate_token(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        self.token_service.validate(token)
    }
}
