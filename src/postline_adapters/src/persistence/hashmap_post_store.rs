use std::sync::Arc;

use postline_core::{Post, PostChanges, PostId, PostStore, PostStoreError, UserId};
use tokio::sync::RwLock;

/// Posts in insertion order.
#[derive(Default, Clone)]
pub struct HashMapPostStore {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl HashMapPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl PostStore for HashMapPostStore {
    async fn add_post(&self, post: Post) -> Result<(), PostStoreError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(PostStoreError::UnexpectedError(format!(
                "duplicate post id {}",
                post.id
            )));
        }
        posts.push(post);
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
        let index = posts
            .iter()
            .position(|p| &p.id == id && p.is_owned_by(owner))
            .ok_or(PostStoreError::PostNotFound)?;
        posts.remove(index);
        Ok(())
    }
}
