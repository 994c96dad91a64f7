use postline_core::{
    CommentStore, CommentStoreError, LikeStore, LikeStoreError, Post, PostDetails, PostId,
    PostStore, PostStoreError, UserId, UserStore, UserStoreError,
};

use super::post_details::load_post_details;

/// Error types for the post read use cases
#[derive(Debug, thiserror::Error)]
pub enum ViewPostsError {
    #[error("Post not found")]
    PostNotFound,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Post store error: {0}")]
    PostStoreError(PostStoreError),
    #[error("Like store error: {0}")]
    LikeStoreError(#[from] LikeStoreError),
    #[error("Comment store error: {0}")]
    CommentStoreError(#[from] CommentStoreError),
}

impl From<PostStoreError> for ViewPostsError {
    fn from(error: PostStoreError) -> Self {
        match error {
            PostStoreError::PostNotFound => ViewPostsError::PostNotFound,
            e => ViewPostsError::PostStoreError(e),
        }
    }
}

/// Read-side post use cases. Every post is returned joined with its owner,
/// likes and comments.
pub struct ViewPostsUseCase<U, P, L, C>
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

impl<U, P, L, C> ViewPostsUseCase<U, P, L, C>
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

    #[tracing::instrument(name = "ViewPostsUseCase::list_all", skip_all)]
    pub async fn list_all(&self) -> Result<Vec<PostDetails>, ViewPostsError> {
        let posts = self.post_store.list_posts().await?;
        self.join_all(posts).await
    }

    /// Any authenticated user may view any post.
    #[tracing::instrument(name = "ViewPostsUseCase::get_by_id", skip(self))]
    pub async fn get_by_id(&self, id: PostId) -> Result<PostDetails, ViewPostsError> {
        let post = self.post_store.get_post(&id).await?;
        self.join(post).await
    }

    #[tracing::instrument(name = "ViewPostsUseCase::list_mine", skip(self))]
    pub async fn list_mine(&self, owner: UserId) -> Result<Vec<PostDetails>, ViewPostsError> {
        let posts = self.post_store.list_posts_by_owner(&owner).await?;
        self.join_all(posts).await
    }

    #[tracing::instrument(name = "ViewPostsUseCase::get_mine", skip(self))]
    pub async fn get_mine(
        &self,
        id: PostId,
        owner: UserId,
    ) -> Result<PostDetails, ViewPostsError> {
        let post = self.post_store.get_owned_post(&id, &owner).await?;
        self.join(post).await
    }

    async fn join(&self, post: Post) -> Result<PostDetails, ViewPostsError> {
        load_post_details(&self.user_store, &self.like_store, &self.comment_store, post).await
    }

    async fn join_all(&self, posts: Vec<Post>) -> Result<Vec<PostDetails>, ViewPostsError> {
        let mut details = Vec::with_capacity(posts.len());
        for post in posts {
            details.push(self.join(post).await?);
        }
        Ok(details)
    }
}
