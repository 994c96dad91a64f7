use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::{
    comment::Comment,
    ids::{PostId, UserId},
    like::Like,
    username::Username,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostError {
    #[error("Please enter all fields")]
    MissingFields,
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub owner: UserId,
    pub title: String,
    pub category: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(
        owner: UserId,
        title: &str,
        category: &str,
        description: &str,
    ) -> Result<Self, PostError> {
        let (title, category, description) = (title.trim(), category.trim(), description.trim());
        if title.is_empty() || category.is_empty() || description.is_empty() {
            return Err(PostError::MissingFields);
        }

        let now = Utc::now();
        Ok(Self {
            id: PostId::new(),
            owner,
            title: title.to_owned(),
            category: category.to_owned(),
            description: description.to_owned(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }

    /// Applies the supplied fields and bumps `updated_at`.
    pub fn apply(&mut self, changes: &PostChanges) {
        if let Some(title) = &changes.title {
            self.title.clone_from(title);
        }
        if let Some(category) = &changes.category {
            self.category.clone_from(category);
        }
        if let Some(description) = &changes.description {
            self.description.clone_from(description);
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update of a post. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl PostChanges {
    pub fn new(
        title: Option<String>,
        category: Option<String>,
        description: Option<String>,
    ) -> Result<Self, PostError> {
        Ok(Self {
            title: non_blank(title, "title")?,
            category: non_blank(category, "category")?,
            description: non_blank(description, "description")?,
        })
    }
}

fn non_blank(value: Option<String>, field: &'static str) -> Result<Option<String>, PostError> {
    match value {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Err(PostError::EmptyField(field)),
        Some(value) => Ok(Some(value.trim().to_owned())),
    }
}

/// Public projection of a post owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerSummary {
    pub id: UserId,
    pub name: String,
    pub username: Username,
}

/// A post joined with its owner summary and its like and comment records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetails {
    pub id: PostId,
    pub user: Option<OwnerSummary>,
    pub title: String,
    pub category: String,
    pub description: String,
    pub likes: Option<Like>,
    pub comments: Option<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostDetails {
    pub fn new(
        post: Post,
        user: Option<OwnerSummary>,
        likes: Option<Like>,
        comments: Option<Comment>,
    ) -> Self {
        Self {
            id: post.id,
            user,
            title: post.title,
            category: post.category,
            description: post.description,
            likes,
            comments,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}
