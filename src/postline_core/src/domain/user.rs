use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{
    email::Email, ids::UserId, password::Password, post::OwnerSummary, reset_code::ResetCode,
    username::Username,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Username must not contain whitespace")]
    InvalidUsername,
}

/// Registration input. The password is hashed by the store when the user is added.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub username: Username,
    pub password: Password,
}

impl NewUser {
    pub fn new(
        name: &str,
        email: Email,
        username: Username,
        password: Password,
    ) -> Result<Self, UserError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UserError::MissingField("name"));
        }

        Ok(Self {
            name: name.to_owned(),
            email,
            username,
            password,
        })
    }
}

/// A stored user. The password hash stays inside the store and is never part of this record.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub username: Username,
    pub reset_code: Option<ResetCode>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn summary(&self) -> OwnerSummary {
        OwnerSummary {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
        }
    }

    /// First word of the display name, used to greet the user in emails.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    pub fn reset_code_matches(&self, candidate: &ResetCode) -> bool {
        self.reset_code.as_ref() == Some(candidate)
    }
}
