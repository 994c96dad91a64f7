use postline_core::{Comment, CommentEntry, CommentStore, CommentStoreError, PostId};

/// Error types for add comment use case
#[derive(Debug, thiserror::Error)]
pub enum AddCommentError {
    #[error("Post not found")]
    PostNotFound,
    #[error("Comment store error: {0}")]
    CommentStoreError(CommentStoreError),
}

impl From<CommentStoreError> for AddCommentError {
    fn from(error: CommentStoreError) -> Self {
        match error {
            CommentStoreError::CommentNotFound => AddCommentError::PostNotFound,
            e => AddCommentError::CommentStoreError(e),
        }
    }
}

/// Add comment use case - appends an entry to the comment record of a post
pub struct AddCommentUseCase<C>
where
    C: CommentStore,
{
    comment_store: C,
}

impl<C> AddCommentUseCase<C>
where
    C: CommentStore,
{
    pub fn new(comment_store: C) -> Self {
        Self { comment_store }
    }

    /// # Returns
    /// The whole comment record after the append
    #[tracing::instrument(name = "AddCommentUseCase::execute", skip(self, entry), fields(comment_id = %entry.id))]
    pub async fn execute(
        &self,
        post: PostId,
        entry: CommentEntry,
    ) -> Result<Comment, AddCommentError> {
        self.comment_store.get_comment(&post).await?;
        Ok(self.comment_store.push_entry(&post, entry).await?)
    }
}
