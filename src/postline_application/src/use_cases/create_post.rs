use postline_core::{
    CommentStore, CommentStoreError, LikeStore, LikeStoreError, Post, PostDetails, PostStore,
    PostStoreError, UserStore, UserStoreError,
};

use super::post_details::load_post_details;

/// Error types for create post use case
#[derive(Debug, thiserror::Error)]
pub enum CreatePostError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Post store error: {0}")]
    PostStoreError(#[from] PostStoreError),
    #[error("Like store error: {0}")]
    LikeStoreError(#[from] LikeStoreError),
    #[error("Comment store error: {0}")]
    CommentStoreError(#[from] CommentStoreError),
}

/// Create post use case - stores the post, then its empty like and comment records.
///
/// The steps are not one transaction. Companion records are keyed by the post
/// id and created only if absent, so repeating the creation steps is harmless.
pub struct CreatePostUseCase<U, P, L, C>
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

impl<U, P, L, C> CreatePostUseCase<U, P, L, C>
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

    #[tracing::instrument(name = "CreatePostUseCase::execute", skip_all, fields(post_id = %post.id))]
    pub async fn execute(&self, post: Post) -> Result<PostDetails, CreatePostError> {
        let post_id = post.id;

        self.post_store.add_post(post.clone()).await?;
        self.like_store.create_like(&post_id).await?;
        self.comment_store.create_comment(&post_id).await?;

        load_post_details(&self.user_store, &self.like_store, &self.comment_store, post).await
    }
}
