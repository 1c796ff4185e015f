use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::profile::ProfilePatch;

/// Process-local user store with the same uniqueness and merge rules as the
/// PostgreSQL adapter. Identifiers start at 1 and are never reused.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    users: BTreeMap<UserId, User>,
    last_id: i64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        if state.users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        state.last_id += 1;
        let user = user.into_user(UserId(state.last_id));
        state.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.state.read().await.users.get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .state
            .read()
            .await
            .users
            .values()
            .find(|u| &u.username == username)
            .cloned())
    }

    async fn update_profile(&self, id: &UserId, patch: &ProfilePatch) -> Result<User, UserError> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        if patch.apply_to(user) {
            user.updated_at = Utc::now();
        }

        Ok(user.clone())
    }

    async fn record_login(&self, id: &UserId, at: DateTime<Utc>) -> Result<(), UserError> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        user.last_login = Some(at);
        Ok(())
    }

    async fn ping(&self) -> Result<(), UserError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use auth::Credential;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::profile::Accent;
    use crate::domain::user::profile::StudyLevel;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            credential: Credential::from_stored("$argon2id$test_hash"),
            preferred_accent: Accent::Us,
            study_level: StudyLevel::Beginner,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repository = InMemoryUserRepository::new();

        let first = repository
            .create(new_user("alice", "alice@example.com"))
            .await
            .unwrap();
        let second = repository
            .create(new_user("bob", "bob@example.com"))
            .await
            .unwrap();

        assert_eq!(first.id, UserId(1));
        assert_eq!(second.id, UserId(2));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates() {
        let repository = InMemoryUserRepository::new();
        repository
            .create(new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        assert!(matches!(
            repository
                .create(new_user("alice", "other@example.com"))
                .await,
            Err(UserError::UsernameAlreadyExists(_))
        ));
        assert!(matches!(
            repository
                .create(new_user("alice2", "alice@example.com"))
                .await,
            Err(UserError::EmailAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_update_profile_merges_present_fields() {
        let repository = InMemoryUserRepository::new();
        let user = repository
            .create(new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        let patch = ProfilePatch {
            preferred_accent: Some(Accent::Uk),
            study_level: None,
        };
        let updated = repository.update_profile(&user.id, &patch).await.unwrap();

        assert_eq!(updated.preferred_accent, Accent::Uk);
        assert_eq!(updated.study_level, StudyLevel::Beginner);
    }

    #[tokio::test]
    async fn test_update_profile_missing_user() {
        let repository = InMemoryUserRepository::new();

        let result = repository
            .update_profile(&UserId(42), &ProfilePatch::default())
            .await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_record_login() {
        let repository = InMemoryUserRepository::new();
        let user = repository
            .create(new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        let at = Utc::now();
        repository.record_login(&user.id, at).await.unwrap();

        let stored = repository.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.last_login, Some(at));
    }
}
