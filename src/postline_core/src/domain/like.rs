use serde::Serialize;

use super::ids::{PostId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LikeEntry {
    pub user: UserId,
}

/// The like record of a post: the set of users that currently like it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Like {
    pub post: PostId,
    #[serde(rename = "like")]
    pub entries: Vec<LikeEntry>,
}

impl Like {
    pub fn empty(post: PostId) -> Self {
        Self {
            post,
            entries: Vec::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, user: &UserId) -> bool {
        self.entries.iter().any(|entry| &entry.user == user)
    }

    /// Adds `user` unless already present. Returns whether an entry was added.
    pub fn insert(&mut self, user: UserId) -> bool {
        if self.contains(&user) {
            return false;
        }
        self.entries.push(LikeEntry { user });
        true
    }

    /// Removes `user`. Returns whether an entry was removed.
    pub fn remove(&mut self, user: &UserId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.user != user);
        self.entries.len() != before
    }
}
