use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    comment::{Comment, CommentEntry},
    email::Email,
    ids::{CommentId, PostId, UserId},
    like::Like,
    password::Password,
    post::{Post, PostChanges},
    reset_code::ResetCode,
    user::{NewUser, User},
    username::Username,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Reset code does not match")]
    ResetCodeMismatch,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::IncorrectPassword, Self::IncorrectPassword)
                | (Self::ResetCodeMismatch, Self::ResetCodeMismatch)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Credential store. Email and username are each unique.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Hashes the password with a fresh salt and persists the user.
    /// Fails with `UserAlreadyExists` if the email or the username is taken.
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError>;
    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError>;
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserStoreError>;
    /// Verifies `password` against the stored hash of user `id`.
    async fn authenticate_user(&self, id: &UserId, password: &Password)
    -> Result<(), UserStoreError>;
    async fn set_reset_code(&self, id: &UserId, code: ResetCode) -> Result<(), UserStoreError>;
    /// Replaces the password hash and the reset code in one update, provided
    /// the stored code still equals `expected_code`. Otherwise nothing changes
    /// and the call fails with `ResetCodeMismatch`.
    async fn set_new_password(
        &self,
        id: &UserId,
        expected_code: &ResetCode,
        new_password: Password,
        next_code: ResetCode,
    ) -> Result<(), UserStoreError>;
}

// PostStore port trait and errors
#[derive(Debug, Error)]
pub enum PostStoreError {
    #[error("Post not found")]
    PostNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for PostStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::PostNotFound, Self::PostNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Post store. The `*_owned_*` operations match only posts whose owner is `owner`
/// and report `PostNotFound` otherwise, without telling the two cases apart.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn add_post(&self, post: Post) -> Result<(), PostStoreError>;
    async fn get_post(&self, id: &PostId) -> Result<Post, PostStoreError>;
    async fn list_posts(&self) -> Result<Vec<Post>, PostStoreError>;
    async fn list_posts_by_owner(&self, owner: &UserId) -> Result<Vec<Post>, PostStoreError>;
    async fn get_owned_post(&self, id: &PostId, owner: &UserId) -> Result<Post, PostStoreError>;
    async fn update_owned_post(
        &self,
        id: &PostId,
        owner: &UserId,
        changes: PostChanges,
    ) -> Result<Post, PostStoreError>;
    async fn delete_owned_post(&self, id: &PostId, owner: &UserId) -> Result<(), PostStoreError>;
}

// LikeStore port trait and errors
#[derive(Debug, Error)]
pub enum LikeStoreError {
    #[error("Like record not found")]
    LikeNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for LikeStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::LikeNotFound, Self::LikeNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Like records, one per post and keyed by the post id.
/// Every mutating operation is a single atomic update.
#[async_trait]
pub trait LikeStore: Send + Sync {
    /// Creates an empty record for `post` if none exists yet.
    async fn create_like(&self, post: &PostId) -> Result<(), LikeStoreError>;
    async fn get_like(&self, post: &PostId) -> Result<Like, LikeStoreError>;
    /// Removes the entry of `user`. Returns the updated record, or `None` if
    /// `user` had no entry (or the record does not exist).
    async fn remove_like(&self, post: &PostId, user: &UserId)
    -> Result<Option<Like>, LikeStoreError>;
    /// Adds an entry for `user`, creating the record if absent.
    async fn add_like(&self, post: &PostId, user: &UserId) -> Result<Like, LikeStoreError>;
    /// Deletes the record of `post`. Deleting a missing record is not an error.
    async fn delete_like(&self, post: &PostId) -> Result<(), LikeStoreError>;
}

// CommentStore port trait and errors
#[derive(Debug, Error)]
pub enum CommentStoreError {
    #[error("Comment record not found")]
    CommentNotFound,
    #[error("Comment entry not found")]
    EntryNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for CommentStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::CommentNotFound, Self::CommentNotFound)
                | (Self::EntryNotFound, Self::EntryNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Comment records, one per post and keyed by the post id.
/// Entry updates and removals only match entries written by `user`; anything
/// else is reported as `EntryNotFound`.
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Creates an empty record for `post` if none exists yet.
    async fn create_comment(&self, post: &PostId) -> Result<(), CommentStoreError>;
    async fn get_comment(&self, post: &PostId) -> Result<Comment, CommentStoreError>;
    /// Appends `entry`, creating the record if absent.
    async fn push_entry(
        &self,
        post: &PostId,
        entry: CommentEntry,
    ) -> Result<Comment, CommentStoreError>;
    async fn remove_entry(
        &self,
        post: &PostId,
        id: &CommentId,
        user: &UserId,
    ) -> Result<Comment, CommentStoreError>;
    async fn update_entry_text(
        &self,
        post: &PostId,
        id: &CommentId,
        user: &UserId,
        text: &str,
    ) -> Result<Comment, CommentStoreError>;
    /// Deletes the record of `post`. Deleting a missing record is not an error.
    async fn delete_comment(&self, post: &PostId) -> Result<(), CommentStoreError>;
}
