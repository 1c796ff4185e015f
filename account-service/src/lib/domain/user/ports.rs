use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::profile::ProfilePatch;

/// Port for account domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first token.
    ///
    /// # Arguments
    /// * `command` - Validated registration command
    ///
    /// # Returns
    /// Created user and a bearer token for it
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Credential` - Password hashing failed
    /// * `Token` - Token issuance failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, UserError>;

    /// Verify a username and password and issue a token.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such user or password mismatch
    /// * `Credential` - Stored credential could not be checked
    /// * `Token` - Token issuance failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError>;

    /// Retrieve the profile of an authenticated user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_profile(&self, id: &UserId) -> Result<User, UserError>;

    /// Apply a validated profile patch and return the resulting profile.
    ///
    /// An empty patch writes nothing and returns the stored profile.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(&self, id: &UserId, patch: ProfilePatch) -> Result<User, UserError>;

    /// Check that the backing store is reachable.
    ///
    /// # Errors
    /// * `DatabaseError` - Store did not answer
    async fn check_storage(&self) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage and assign its identifier.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Merge the present fields of a patch into the stored profile.
    ///
    /// Fields absent from the patch must not be written.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(&self, id: &UserId, patch: &ProfilePatch) -> Result<User, UserError>;

    /// Record the time of a successful login.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn record_login(&self, id: &UserId, at: DateTime<Utc>) -> Result<(), UserError>;

    /// Round-trip to the store.
    ///
    /// # Errors
    /// * `DatabaseError` - Store did not answer
    async fn ping(&self) -> Result<(), UserError>;
}
