use std::fmt;

use async_trait::async_trait;
use auth::Credential;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::profile::Accent;
use crate::domain::user::profile::Enumerated;
use crate::domain::user::profile::ProfilePatch;
use crate::domain::user::profile::StudyLevel;

const USER_COLUMNS: &str = "id, username, email, password_hash, preferred_accent, study_level, \
                            created_at, updated_at, last_login";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    preferred_accent: String,
    study_level: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let id = r.id;
        let corrupt = |e: &dyn fmt::Display| {
            UserError::DatabaseError(format!("Invalid stored user {}: {}", id, e))
        };

        Ok(User {
            id: UserId(id),
            username: Username::new(r.username).map_err(|e| corrupt(&e))?,
            email: EmailAddress::new(r.email).map_err(|e| corrupt(&e))?,
            credential: Credential::from_stored(r.password_hash),
            preferred_accent: Accent::parse(&r.preferred_accent).map_err(|e| corrupt(&e))?,
            study_level: StudyLevel::parse(&r.study_level).map_err(|e| corrupt(&e))?,
            created_at: r.created_at,
            updated_at: r.updated_at,
            last_login: r.last_login,
        })
    }
}

fn unique_violation(e: &sqlx::Error, user: &NewUser) -> Option<UserError> {
    let db_err = e.as_database_error()?;
    if !db_err.is_unique_violation() {
        return None;
    }
    match db_err.constraint() {
        Some("users_username_key") => Some(UserError::UsernameAlreadyExists(
            user.username.as_str().to_string(),
        )),
        Some("users_email_key") => Some(UserError::EmailAlreadyExists(
            user.email.as_str().to_string(),
        )),
        _ => None,
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, preferred_accent, study_level, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.credential.as_str())
        .bind(user.preferred_accent.as_str())
        .bind(user.study_level.as_str())
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            unique_violation(&e, &user).unwrap_or_else(|| UserError::DatabaseError(e.to_string()))
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn update_profile(&self, id: &UserId, patch: &ProfilePatch) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET preferred_accent = COALESCE($2, preferred_accent),
                study_level = COALESCE($3, study_level),
                updated_at = $4
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id.0)
        .bind(patch.preferred_accent.map(|accent| accent.as_str()))
        .bind(patch.study_level.map(|level| level.as_str()))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.ok_or_else(|| UserError::NotFound(id.to_string()))?
            .try_into()
    }

    async fn record_login(&self, id: &UserId, at: DateTime<Utc>) -> Result<(), UserError> {
        let result = sqlx::query("UPDATE users SET last_login = $2 WHERE id = $1")
            .bind(id.0)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), UserError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| UserError::DatabaseError(e.to_string()))
    }
}
