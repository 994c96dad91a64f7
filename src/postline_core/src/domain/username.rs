use serde::Serialize;

use super::user::UserError;

/// Public handle of a user, unique across the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn parse(raw: &str) -> Result<Self, UserError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserError::MissingField("username"));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(UserError::InvalidUsername);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl TryFrom<String> for Username {
    type Error = UserError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
