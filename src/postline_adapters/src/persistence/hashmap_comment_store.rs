use std::collections::HashMap;
use std::sync::Arc;

use postline_core::{
    Comment, CommentEntry, CommentId, CommentStore, CommentStoreError, PostId, UserId,
};
use tokio::sync::RwLock;

#[derive(Default, Clone)]
pub struct HashMapCommentStore {
    comments: Arc<RwLock<HashMap<PostId, Comment>>>,
}

impl HashMapCommentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CommentStore for HashMapCommentStore {
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
