use postline_core::{Comment, CommentId, CommentStore, CommentStoreError, PostId, UserId};

/// Error types for delete comment use case
#[derive(Debug, thiserror::Error)]
pub enum DeleteCommentError {
    #[error("Post not found")]
    PostNotFound,
    #[error("Comment not found or not written by the caller")]
    NotFoundOrForbidden,
    #[error("Comment store error: {0}")]
    CommentStoreError(CommentStoreError),
}

impl From<CommentStoreError> for DeleteCommentError {
    fn from(error: CommentStoreError) -> Self {
        match error {
            CommentStoreError::CommentNotFound => DeleteCommentError::PostNotFound,
            CommentStoreError::EntryNotFound => DeleteCommentError::NotFoundOrForbidden,
            e => DeleteCommentError::CommentStoreError(e),
        }
    }
}

/// Delete comment use case - removes an entry written by the caller
pub struct DeleteCommentUseCase<C>
where
    C: CommentStore,
{
    comment_store: C,
}

impl<C> DeleteCommentUseCase<C>
where
    C: CommentStore,
{
    pub fn new(comment_store: C) -> Self {
        Self { comment_store }
    }

    #[tracing::instrument(name = "DeleteCommentUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        post: PostId,
        id: CommentId,
        user: UserId,
    ) -> Result<Comment, DeleteCommentError> {
        Ok(self.comment_store.remove_entry(&post, &id, &user).await?)
    }
}
