use postline_core::{
    CommentStore, CommentStoreError, LikeStore, LikeStoreError, PostChanges, PostDetails, PostId,
    PostStore, PostStoreError, UserId, UserStore, UserStoreError,
};

use super::post_details::load_post_details;

/// Error types for update post use case
#[derive(Debug, thiserror::Error)]
pub enum UpdatePostError {
    #[error("Post not found or not owned by the caller")]
    NotFoundOrForbidden,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Post store error: {0}")]
    PostStoreError(PostStoreError),
    #[error("Like store error: {0}")]
    LikeStoreError(#[from] LikeStoreError),
    #[error("Comment store error: {0}")]
    CommentStoreError(#[from] CommentStoreError),
}

impl From<PostStoreError> for UpdatePostError {
    fn from(error: PostStoreError) -> Self {
        match error {
            PostStoreError::PostNotFound => UpdatePostError::NotFoundOrForbidden,
            e => UpdatePostError::PostStoreError(e),
        }
    }
}

/// Update post use case - applies the supplied fields to a post owned by the caller
pub struct UpdatePostUseCase<U, P, L, C>
where
    U: UserStore,
    P: PostStore,
    L: LikeStore,
    C: CommentStore,
{
    user_store: U,
    post_store: P,
    like_store: L,
    comment_store: C,
}

impl<U, P, L, C> UpdatePostUseCase<U, P, L, C>
where
    U: UserStore,
    P: PostStore,
    L: LikeStore,
    C: CommentStore,
{
    pub fn new(user_store: U, post_store: P, like_store: L, comment_store: C) -> Self {
        Self {
            user_store,
            post_store,
            like_store,
            comment_store,
        }
    }

    /// A post that does not exist and a post owned by someone else are
    /// reported the same way.
    #[tracing::instrument(name = "UpdatePostUseCase::execute", skip(self, changes))]
    pub async fn execute(
        &self,
        id: PostId,
        owner: UserId,
        changes: PostChanges,
    ) -> Result<PostDetails, UpdatePostError> {
        let post = self
            .post_store
            .update_owned_post(&id, &owner, changes)
            .await?;

        load_post_details(&self.user_store, &self.like_store, &self.comment_store, post).await
    }
}
