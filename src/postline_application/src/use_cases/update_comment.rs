use postline_core::{Comment, CommentId, CommentStore, CommentStoreError, PostId, UserId};

/// Error types for update comment use case
#[derive(Debug, thiserror::Error)]
pub enum UpdateCommentError {
    #[error("Post not found")]
    PostNotFound,
    #[error("Comment not found or not written by the caller")]
    NotFoundOrForbidden,
    #[error("Comment store error: {0}")]
    CommentStoreError(CommentStoreError),
}

impl From<CommentStoreError> for UpdateCommentError {
    fn from(error: CommentStoreError) -> Self {
        match error {
            CommentStoreError::CommentNotFound => UpdateCommentError::PostNotFound,
            CommentStoreError::EntryNotFound => UpdateCommentError::NotFoundOrForbidden,
            e => UpdateCommentError::CommentStoreError(e),
        }
    }
}

/// Update comment use case - rewrites the text of an entry written by the caller
pub struct UpdateCommentUseCase<C>
where
    C: CommentStore,
{
    comment_store: C,
}

impl<C> UpdateCommentUseCase<C>
where
    C: CommentStore,
{
    pub fn new(comment_store: C) -> Self {
        Self { comment_store }
    }

    #[tracing::instrument(name = "UpdateCommentUseCase::execute", skip(self, text))]
    pub async fn execute(
        &self,
        post: PostId,
        id: CommentId,
        user: UserId,
        text: &str,
    ) -> Result<Comment, UpdateCommentError> {
        Ok(self
            .comment_store
            .update_entry_text(&post, &id, &user, text)
            .await?)
    }
}
