//! Authentication core for the account service.
//!
//! Provides framework-free building blocks:
//! - Credential hashing (Argon2id with a fixed work factor)
//! - Signed, time-limited bearer tokens (HS256 JWS)
//! - Authentication coordination
//!
//! Nothing in this crate performs I/O or holds mutable state, so every type
//! can be shared across threads once constructed.
//!
//! # Examples
//!
//! ## Credential Hashing
//! ```
//! use auth::CredentialHasher;
//!
//! let hasher = CredentialHasher::new();
//! let credential = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &credential).unwrap());
//! assert!(!hasher.verify("other_password", &credential).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenService;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!");
//! let token = tokens.issue(42, "alice").unwrap();
//! let claims = tokens.validate(&token).unwrap();
//! assert_eq!(claims.subject_id, 42);
//! assert_eq!(claims.subject_name, "alice");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenService};
//!
//! let auth = Authenticator::new(TokenService::new(b"secret_key_at_least_32_bytes_long!"));
//!
//! // Register: hash password
//! let credential = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &credential, 42, "alice").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.subject_name, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::IdentityClaims;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::Credential;
pub use password::CredentialHasher;
pub use password::PasswordError;
