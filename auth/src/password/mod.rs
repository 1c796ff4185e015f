pub mod argon2;
pub mod credential;
pub mod errors;

pub use self::argon2::CredentialHasher;
pub use credential::Credential;
pub use errors::PasswordError;
