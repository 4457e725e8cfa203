use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserSummary;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store.
///
/// Enforces the same uniqueness rules as the `users` table, so a lost
/// check-then-insert race still surfaces as a conflict.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `follower` follows `followee`. Unknown ids are ignored.
    pub async fn follow(&self, follower: UserId, followee: UserId) {
        let mut users = self.users.write().await;
        if !users.contains_key(&follower) || !users.contains_key(&followee) {
            return;
        }

        if let Some(user) = users.get_mut(&follower) {
            if !user.following.contains(&followee) {
                user.following.push(followee);
            }
        }
        if let Some(user) = users.get_mut(&followee) {
            if !user.followers.contains(&follower) {
                user.followers.push(follower);
            }
        }
    }

    pub async fn remove(&self, id: &UserId) -> Option<User> {
        self.users.write().await.remove(id)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        users.insert(user.id, user.clone());
        tracing::debug!(user_id = %user.id, "User stored in memory");

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn find_summaries(&self, ids: &[UserId]) -> Result<Vec<UserSummary>, UserError> {
        let users = self.users.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| users.get(id))
            .map(UserSummary::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::DEFAULT_AVATAR;

    fn user(username: &str, email: &str) -> User {
        User {
            id: UserId::new(),
            fullname: "Test User".to_string(),
            username: Username::new(username).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$2b$04$hash".to_string(),
            gender: "male".to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
            followers: Vec::new(),
            following: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates() {
        let repository = InMemoryUserRepository::new();
        repository
            .create(user("jane", "jane@x.com"))
            .await
            .unwrap();

        let result = repository.create(user("jane", "other@x.com")).await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyExists(_))));

        let result = repository.create(user("other", "jane@x.com")).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_follow_updates_both_sides() {
        let repository = InMemoryUserRepository::new();
        let jane = repository
            .create(user("jane", "jane@x.com"))
            .await
            .unwrap();
        let bob = repository.create(user("bob", "bob@x.com")).await.unwrap();

        repository.follow(bob.id, jane.id).await;
        repository.follow(bob.id, jane.id).await;

        let jane = repository.find_by_id(&jane.id).await.unwrap().unwrap();
        assert_eq!(jane.followers, vec![bob.id]);

        let summaries = repository.find_summaries(&jane.followers).await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].following, vec![jane.id]);
    }

    #[tokio::test]
    async fn test_lookups() {
        let repository = InMemoryUserRepository::new();
        let jane = repository
            .create(user("jane", "jane@x.com"))
            .await
            .unwrap();

        let by_name = repository
            .find_by_username(&Username::new("JANE").unwrap())
            .await
            .unwrap();
        assert_eq!(by_name.map(|u| u.id), Some(jane.id));

        let by_email = repository.find_by_email("jane@x.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(jane.id));

        repository.remove(&jane.id).await;
        assert!(repository.find_by_id(&jane.id).await.unwrap().is_none());
    }
}
