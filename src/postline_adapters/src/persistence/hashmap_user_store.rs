use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use postline_core::{
    Email, NewUser, Password, ResetCode, User, UserId, UserStore, UserStoreError, Username,
};
use secrecy::Secret;
use tokio::sync::RwLock;

use super::password_hash::{compute_password_hash, verify_password_hash};

struct StoredUser {
    user: User,
    password_hash: Secret<String>,
}

#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<UserId, StoredUser>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn find(&self, predicate: impl Fn(&User) -> bool) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .values()
            .map(|stored| &stored.user)
            .find(|user| predicate(user))
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(user.password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let mut users = self.users.write().await;
        if users
            .values()
            .any(|stored| stored.user.email == user.email || stored.user.username == user.username)
        {
            return Err(UserStoreError::UserAlreadyExists);
        }

        let created = User {
            id: UserId::new(),
            name: user.name,
            email: user.email,
            username: user.username,
            reset_code: None,
            created_at: Utc::now(),
        };
        users.insert(
            created.id,
            StoredUser {
                user: created.clone(),
                password_hash,
            },
        );
        Ok(created)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .get(id)
            .map(|stored| stored.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.find(|user| &user.email == email).await
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserStoreError> {
        self.find(|user| &user.username == username).await
    }

    async fn authenticate_user(
        &self,
        id: &UserId,
        password: &Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = {
            let users = self.users.read().await;
            let stored = users.get(id).ok_or(UserStoreError::UserNotFound)?;
            stored.password_hash.clone()
        };

        verify_password_hash(password_hash, password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)
    }

    async fn set_reset_code(&self, id: &UserId, code: ResetCode) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        stored.user.reset_code = Some(code);
        Ok(())
    }

    async fn set_new_password(
        &self,
        id: &UserId,
        expected_code: &ResetCode,
        new_password: Password,
        next_code: ResetCode,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let mut users = self.users.write().await;
        let stored = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        if !stored.user.reset_code_matches(expected_code) {
            return Err(UserStoreError::ResetCodeMismatch);
        }
        stored.password_hash = password_hash;
        stored.user.reset_code = Some(next_code);
        Ok(())
    }
}
