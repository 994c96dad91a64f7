use std::collections::HashMap;
use std::sync::Arc;

use postline_core::{Like, LikeStore, LikeStoreError, PostId, UserId};
use tokio::sync::RwLock;

/// Like records keyed by post id. Each operation runs under one write lock,
/// which makes the conditional updates atomic.
#[derive(Default, Clone)]
pub struct HashMapLikeStore {
    likes: Arc<RwLock<HashMap<PostId, Like>>>,
}

impl HashMapLikeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl LikeStore for HashMapLikeStore {
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
        let Some(like) = likes.get_mut(post) else {
            return Ok(None);
        };
        Ok(like.remove(user).then(|| like.clone()))
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
