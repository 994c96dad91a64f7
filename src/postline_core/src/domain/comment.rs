use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::ids::{CommentId, PostId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentError {
    #[error("Comment must not be empty")]
    EmptyComment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentEntry {
    pub id: CommentId,
    pub user: UserId,
    #[serde(rename = "comment")]
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl CommentEntry {
    pub fn new(user: UserId, text: &str) -> Result<Self, CommentError> {
        Ok(Self {
            id: CommentId::new(),
            user,
            text: comment_text(text)?,
            created_at: Utc::now(),
        })
    }
}

/// Validates and trims comment text.
pub fn comment_text(text: &str) -> Result<String, CommentError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CommentError::EmptyComment);
    }
    Ok(text.to_owned())
}

/// The comment record of a post, entries kept in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub post: PostId,
    #[serde(rename = "comment")]
    pub entries: Vec<CommentEntry>,
}

impl Comment {
    pub fn empty(post: PostId) -> Self {
        Self {
            post,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: CommentEntry) {
        self.entries.push(entry);
    }

    /// Removes the entry `id` if `user` wrote it.
    pub fn remove_owned(&mut self, id: &CommentId, user: &UserId) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| !(&entry.id == id && &entry.user == user));
        self.entries.len() != before
    }

    /// Replaces the text of entry `id` if `user` wrote it.
    pub fn set_text_owned(&mut self, id: &CommentId, user: &UserId, text: &str) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|entry| &entry.id == id && &entry.user == user)
        {
            Some(entry) => {
                entry.text = text.to_owned();
                true
            }
            None => false,
        }
    }
}
