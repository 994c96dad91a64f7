use postline_core::{
    CommentStore, CommentStoreError, LikeStore, LikeStoreError, PostId, PostStore, PostStoreError,
    UserId,
};

/// Error types for delete post use case
#[derive(Debug, thiserror::Error)]
pub enum DeletePostError {
    #[error("Post not found or not owned by the caller")]
    NotFoundOrForbidden,
    #[error("Post store error: {0}")]
    PostStoreError(PostStoreError),
    #[error("Like store error: {0}")]
    LikeStoreError(#[from] LikeStoreError),
    #[error("Comment store error: {0}")]
    CommentStoreError(#[from] CommentStoreError),
}

impl From<PostStoreError> for DeletePostError {
    fn from(error: PostStoreError) -> Self {
        match error {
            PostStoreError::PostNotFound => DeletePostError::NotFoundOrForbidden,
            e => DeletePostError::PostStoreError(e),
        }
    }
}

/// Delete post use case - removes a post owned by the caller together with its
/// like and comment records.
pub struct DeletePostUseCase<P, L, C>
where
    P: PostStore,
    L: LikeStore,
    C: CommentStore,
{
    post_store: P,
    like_store: L,
    comment_store: C,
}

impl<P, L, C> DeletePostUseCase<P, L, C>
where
    P: PostStore,
    L: LikeStore,
    C: CommentStore,
{
    pub fn new(post_store: P, like_store: L, comment_store: C) -> Self {
        Self {
            post_store,
            like_store,
            comment_store,
        }
    }

    /// The companions are only touched once the post itself is gone, so a
    /// rejected delete leaves everything in place.
    #[tracing::instrument(name = "DeletePostUseCase::execute", skip(self))]
    pub async fn execute(&self, id: PostId, owner: UserId) -> Result<(), DeletePostError> {
        self.post_store.delete_owned_post(&id, &owner).await?;
        self.like_store.delete_like(&id).await?;
        self.comment_store.delete_comment(&id).await?;
        Ok(())
    }
}
