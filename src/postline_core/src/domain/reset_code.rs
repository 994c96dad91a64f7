use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MIN_CODE: u32 = 1000;
const MAX_CODE: u32 = 9999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResetCodeError {
    #[error("Confirmation code must be numeric")]
    NotNumeric,
}

/// One-time numeric code mailed to a user during the forgot-password flow.
///
/// Freshly generated codes are always four digits. Codes parsed from client
/// input may be any number, they simply will not match a stored code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResetCode(u32);

impl ResetCode {
    pub fn new() -> Self {
        Self(rand::rng().random_range(MIN_CODE..=MAX_CODE))
    }

    pub fn parse(raw: &str) -> Result<Self, ResetCodeError> {
        raw.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| ResetCodeError::NotNumeric)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for ResetCode {
    fn default() -> Self {
        Self::new()
    }
}

impl From<u32> for ResetCode {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ResetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
