//! Joins a post with its owner summary and its like and comment records.

use postline_core::{
    CommentStore, CommentStoreError, LikeStore, LikeStoreError, Post, PostDetails, UserStore,
    UserStoreError,
};

/// Builds the joined view of `post`.
///
/// A missing owner or a missing like/comment record shows up as `None` in the
/// view rather than failing the request.
pub async fn load_post_details<U, L, C, E>(
    user_store: &U,
    like_store: &L,
    comment_store: &C,
    post: Post,
) -> Result<PostDetails, E>
where
    U: UserStore,
    L: LikeStore,
    C: CommentStore,
    E: From<UserStoreError> + From<LikeStoreError> + From<CommentStoreError>,
{
    let owner = match user_store.get_user(&post.owner).await {
        Ok(user) => Some(user.summary()),
        Err(UserStoreError::UserNotFound) => None,
        Err(e) => return Err(e.into()),
    };

    let likes = match like_store.get_like(&post.id).await {
        Ok(like) => Some(like),
        Err(LikeStoreError::LikeNotFound) => None,
        Err(e) => return Err(e.into()),
    };

    let comments = match comment_store.get_comment(&post.id).await {
        Ok(comment) => Some(comment),
        Err(CommentStoreError::CommentNotFound) => None,
        Err(e) => return Err(e.into()),
    };

    Ok(PostDetails::new(post, owner, likes, comments))
}
