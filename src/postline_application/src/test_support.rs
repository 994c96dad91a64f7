//! In-memory doubles of the store and email ports for use case tests.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use postline_core::{
    Comment, CommentEntry, CommentId, CommentStore, CommentStoreError, Email, EmailClient, Like,
    LikeStore, LikeStoreError, NewUser, Password, Post, PostChanges, PostId, PostStore,
    PostStoreError, ResetCode, User, UserId, UserStore, UserStoreError, Username,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::{RwLock, mpsc};

pub fn email(raw: &str) -> Email {
    Email::parse(raw).unwrap()
}

pub fn username(raw: &str) -> Username {
    Username::parse(raw).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::from(raw.to_owned())).unwrap()
}

pub fn new_user(name: &str, email_raw: &str, username_raw: &str, pw: &str) -> NewUser {
    NewUser::new(name, email(email_raw), username(username_raw), password(pw)).unwrap()
}

#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<UserId, (User, String)>>>,
}

impl MockUserStore {
    pub async fn insert(&self, user: NewUser) -> User {
        self.add_user(user).await.unwrap()
    }

    pub async fn reset_code_of(&self, id: &UserId) -> Option<ResetCode> {
        self.users.read().await.get(id).and_then(|(u, _)| u.reset_code)
    }

    pub async fn password_of(&self, id: &UserId) -> String {
        self.users.read().await[id].1.clone()
    }
}

#[async_trait::async_trait]
impl UserStore for MockUserStore {
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|(u, _)| u.email == user.email || u.username == user.username)
        {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let stored = User {
            id: UserId::new(),
            name: user.name,
            email: user.email,
            username: user.username,
            reset_code: None,
            created_at: Utc::now(),
        };
        let secret = user.password.as_ref().expose_secret().clone();
        users.insert(stored.id, (stored.clone(), secret));
        Ok(stored)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .get(id)
            .map(|(u, _)| u.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|(u, _)| &u.email == email)
            .map(|(u, _)| u.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|(u, _)| &u.username == username)
            .map(|(u, _)| u.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn authenticate_user(
        &self,
        id: &UserId,
        password: &Password,
    ) -> Result<(), UserStoreError> {
        let users = self.users.read().await;
        let (_, stored) = users.get(id).ok_or(UserStoreError::UserNotFound)?;
        if stored != password.as_ref().expose_secret() {
            return Err(UserStoreError::IncorrectPassword);
        }
        Ok(())
    }

    async fn set_reset_code(&self, id: &UserId, code: ResetCode) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let (user, _) = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        user.reset_code = Some(code);
        Ok(())
    }

    async fn set_new_password(
        &self,
        id: &UserId,
        expected_code: &ResetCode,
        new_password: Password,
        next_code: ResetCode,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let (user, stored) = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        if !user.reset_code_matches(expected_code) {
            return Err(UserStoreError::ResetCodeMismatch);
        }
        user.reset_code = Some(next_code);
        *stored = new_password.as_ref().expose_secret().clone();
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockPostStore {
    posts: Arc<RwLock<Vec<Post>>>,
}

#[async_trait::async_trait]
impl PostStore for MockPostStore {
    async fn add_post(&self, post: Post) -> Result<(), PostStoreError> {
        self.posts.write().await.push(post);
        Ok(())
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, PostStoreError> {
        let posts = self.posts.read().await;
        posts
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or(PostStoreError::PostNotFound)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, PostStoreError> {
        Ok(self.posts.read().await.clone())
    }

    async fn list_posts_by_owner(&self, owner: &UserId) -> Result<Vec<Post>, PostStoreError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().filter(|p| p.is_owned_by(owner)).cloned().collect())
    }

    async fn get_owned_post(&self, id: &PostId, owner: &UserId) -> Result<Post, PostStoreError> {
        let posts = self.posts.read().await;
        posts
            .iter()
            .find(|p| &p.id == id && p.is_owned_by(owner))
            .cloned()
            .ok_or(PostStoreError::PostNotFound)
    }

    async fn update_owned_post(
        &self,
        id: &PostId,
        owner: &UserId,
        changes: PostChanges,
    ) -> Result<Post, PostStoreError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| &p.id == id && p.is_owned_by(owner))
            .ok_or(PostStoreError::PostNotFound)?;
        post.apply(&changes);
        Ok(post.clone())
    }

    async fn delete_owned_post(&self, id: &PostId, owner: &UserId) -> Result<(), PostStoreError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| !(&p.id == id && p.is_owned_by(owner)));
        if posts.len() == before {
            return Err(PostStoreError::PostNotFound);
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockLikeStore {
    likes: Arc<RwLock<HashMap<PostId, Like>>>,
}

#[async_trait::async_trait]
impl LikeStore for MockLikeStore {
    async fn create_like(&self, post: &PostId) -> Result<(), LikeStoreError> {
        let mut likes = self.likes.write().await;
        likes.entry(*post).or_insert_with(|| Like::empty(*post));
        Ok(())
    }

    async fn get_like(&self, post: &PostId) -> Result<Like, LikeStoreError> {
        let likes = self.likes.read().await;
        likes.get(post).cloned().ok_or(LikeStoreError::LikeNotFound)
    }

    async fn remove_like(
        &self,
        post: &PostId,
        user: &UserId,
    ) -> Result<Option<Like>, LikeStoreError> {
        let mut likes = self.likes.write().await;
        Ok(likes
            .get_mut(post)
            .filter(|like| like.contains(user))
            .map(|like| {
                like.remove(user);
                like.clone()
            }))
    }

    async fn add_like(&self, post: &PostId, user: &UserId) -> Result<Like, LikeStoreError> {
        let mut likes = self.likes.write().await;
        let like = likes.entry(*post).or_insert_with(|| Like::empty(*post));
        like.insert(*user);
        Ok(like.clone())
    }

    async fn delete_like(&self, post: &PostId) -> Result<(), LikeStoreError> {
        self.likes.write().await.remove(post);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockCommentStore {
    comments: Arc<RwLock<HashMap<PostId, Comment>>>,
}

#[async_trait::async_trait]
impl CommentStore for MockCommentStore {
    async fn create_comment(&self, post: &PostId) -> Result<(), CommentStoreError> {
        let mut comments = self.comments.write().await;
        comments.entry(*post).or_insert_with(|| Comment::empty(*post));
        Ok(())
    }

    async fn get_comment(&self, post: &PostId) -> Result<Comment, CommentStoreError> {
        let comments = self.comments.read().await;
        comments
            .get(post)
            .cloned()
            .ok_or(CommentStoreError::CommentNotFound)
    }

    async fn push_entry(
        &self,
        post: &PostId,
        entry: CommentEntry,
    ) -> Result<Comment, CommentStoreError> {
        let mut comments = self.comments.write().await;
        let comment = comments
            .entry(*post)
            .or_insert_with(|| Comment::empty(*post));
        comment.push(entry);
        Ok(comment.clone())
    }

    async fn remove_entry(
        &self,
        post: &PostId,
        id: &CommentId,
        user: &UserId,
    ) -> Result<Comment, CommentStoreError> {
        let mut comments = self.comments.write().await;
        let comment = comments
            .get_mut(post)
            .ok_or(CommentStoreError::CommentNotFound)?;
        if !comment.remove_owned(id, user) {
            return Err(CommentStoreError::EntryNotFound);
        }
        Ok(comment.clone())
    }

    async fn update_entry_text(
        &self,
        post: &PostId,
        id: &CommentId,
        user: &UserId,
        text: &str,
    ) -> Result<Comment, CommentStoreError> {
        let mut comments = self.comments.write().await;
        let comment = comments
            .get_mut(post)
            .ok_or(CommentStoreError::CommentNotFound)?;
        if !comment.set_text_owned(id, user, text) {
            return Err(CommentStoreError::EntryNotFound);
        }
        Ok(comment.clone())
    }

    async fn delete_comment(&self, post: &PostId) -> Result<(), CommentStoreError> {
        self.comments.write().await.remove(post);
        Ok(())
    }
}

/// Email client that forwards every sent message to a channel.
#[derive(Clone)]
pub struct RecordingEmailClient {
    sender: mpsc::UnboundedSender<(String, String, String)>,
}

impl RecordingEmailClient {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(String, String, String)>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait::async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        self.sender
            .send((
                recipient.as_ref().to_owned(),
                subject.to_owned(),
                content.to_owned(),
            ))
            .map_err(|e| e.to_string())
    }
}

/// Email client whose every delivery fails.
#[derive(Clone, Default)]
pub struct FailingEmailClient;

#[async_trait::async_trait]
impl EmailClient for FailingEmailClient {
    async fn send_email(&self, _: &Email, _: &str, _: &str) -> Result<(), String> {
        Err("smtp unavailable".to_owned())
    }
}
