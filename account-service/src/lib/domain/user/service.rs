use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;
use tokio::task::JoinError;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::profile::ProfilePatch;

/// Domain service implementation for account operations.
///
/// Password hashing and verification are CPU-bound and run on the blocking
/// thread pool so they never stall the async workers serving other requests.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Credential hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

fn blocking_task_failed(err: JoinError) -> UserError {
    UserError::Unknown(format!("Blocking task failed: {}", err))
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let credential =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.as_str()))
                .await
                .map_err(blocking_task_failed)??;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                email: command.email,
                credential,
                preferred_accent: command.preferred_accent,
                study_level: command.study_level,
                created_at: Utc::now(),
            })
            .await?;

        let token = self
            .authenticator
            .issue_token(user.id.0, user.username.as_str())?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(AuthSession { user, token })
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError> {
        let LoginCommand { username, password } = command;
        let authenticator = Arc::clone(&self.authenticator);

        let Some(mut user) = self.repository.find_by_username(&username).await? else {
            // Spend the same hashing cost as a real verification.
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await
                .map_err(blocking_task_failed)??;
            tracing::debug!(username = %username, "Login for unknown username");
            return Err(UserError::InvalidCredentials);
        };

        let credential = user.credential.clone();
        let subject_id = user.id.0;
        let subject_name = user.username.as_str().to_string();
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &credential, subject_id, &subject_name)
        })
        .await
        .map_err(blocking_task_failed)?
        .map_err(UserError::from)?;

        let now = Utc::now();
        match self.repository.record_login(&user.id, now).await {
            Ok(()) => user.last_login = Some(now),
            Err(e) => tracing::warn!(user_id = %user.id, error = %e, "Failed to record last login"),
        }

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthSession {
            user,
            token: result.access_token,
        })
    }

    async fn get_profile(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_profile(&self, id: &UserId, patch: ProfilePatch) -> Result<User, UserError> {
        if patch.is_empty() {
            return self.get_profile(id).await;
        }

        let user = self.repository.update_profile(id, &patch).await?;
        tracing::info!(
            user_id = %user.id,
            preferred_accent = %user.preferred_accent,
            study_level = %user.study_level,
            "Profile updated"
        );

        Ok(user)
    }

    async fn check_storage(&self) -> Result<(), UserError> {
        self.repository.ping().await
    }
}
