use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use postline_application::{
    CreatePostUseCase, DeletePostUseCase, UpdatePostUseCase, ViewPostsUseCase,
};
use postline_core::{CommentStore, LikeStore, Post, PostChanges, PostId, PostStore, UserStore};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::extract::ApiJson;
use crate::auth::AuthenticatedUser;

/// Every store a post route may need to assemble the joined post view.
#[derive(Clone)]
pub struct PostState<U, P, L, C> {
    pub user_store: U,
    pub post_store: P,
    pub like_store: L,
    pub comment_store: C,
}

impl<U, P, L, C> PostState<U, P, L, C>
where
    U: UserStore + Clone,
    P: PostStore + Clone,
    L: LikeStore + Clone,
    C: CommentStore + Clone,
{
    pub fn new(user_store: U, post_store: P, like_store: L, comment_store: C) -> Self {
        Self {
            user_store,
            post_store,
            like_store,
            comment_store,
        }
    }

    fn view(&self) -> ViewPostsUseCase<U, P, L, C> {
        ViewPostsUseCase::new(
            self.user_store.clone(),
            self.post_store.clone(),
            self.like_store.clone(),
            self.comment_store.clone(),
        )
    }
}

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletePostResponse {
    pub success: bool,
}

#[tracing::instrument(name = "Create post", skip_all)]
pub async fn create_post<U, P, L, C>(
    State(state): State<PostState<U, P, L, C>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    P: PostStore + Clone + 'static,
    L: LikeStore + Clone + 'static,
    C: CommentStore + Clone + 'static,
{
    let post = Post::new(
        user.id,
        request.title.as_deref().unwrap_or_default(),
        request.category.as_deref().unwrap_or_default(),
        request.description.as_deref().unwrap_or_default(),
    )?;

    let details = CreatePostUseCase::new(
        state.user_store,
        state.post_store,
        state.like_store,
        state.comment_store,
    )
    .execute(post)
    .await?;

    Ok((StatusCode::CREATED, Json(details)))
}

#[tracing::instrument(name = "List all posts", skip_all)]
pub async fn list_all_posts<U, P, L, C>(
    State(state): State<PostState<U, P, L, C>>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    P: PostStore + Clone + 'static,
    L: LikeStore + Clone + 'static,
    C: CommentStore + Clone + 'static,
{
    Ok(Json(state.view().list_all().await?))
}

#[tracing::instrument(name = "Get post by id", skip_all)]
pub async fn get_post<U, P, L, C>(
    State(state): State<PostState<U, P, L, C>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    P: PostStore + Clone + 'static,
    L: LikeStore + Clone + 'static,
    C: CommentStore + Clone + 'static,
{
    let id = PostId::parse(&id)?;
    Ok(Json(state.view().get_by_id(id).await?))
}

#[tracing::instrument(name = "List my posts", skip_all)]
pub async fn list_my_posts<U, P, L, C>(
    State(state): State<PostState<U, P, L, C>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    P: PostStore + Clone + 'static,
    L: LikeStore + Clone + 'static,
    C: CommentStore + Clone + 'static,
{
    Ok(Json(state.view().list_mine(user.id).await?))
}

#[tracing::instrument(name = "Get my post", skip_all)]
pub async fn get_my_post<U, P, L, C>(
    State(state): State<PostState<U, P, L, C>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    P: PostStore + Clone + 'static,
    L: LikeStore + Clone + 'static,
    C: CommentStore + Clone + 'static,
{
    let id = PostId::parse(&id)?;
    Ok(Json(state.view().get_mine(id, user.id).await?))
}

#[tracing::instrument(name = "Update my post", skip_all)]
pub async fn update_my_post<U, P, L, C>(
    State(state): State<PostState<U, P, L, C>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdatePostRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    P: PostStore + Clone + 'static,
    L: LikeStore + Clone + 'static,
    C: CommentStore + Clone + 'static,
{
    let id = PostId::parse(&id)?;
    let changes = PostChanges::new(request.title, request.category, request.description)?;

    let details = UpdatePostUseCase::new(
        state.user_store,
        state.post_store,
        state.like_store,
        state.comment_store,
    )
    .execute(id, user.id, changes)
    .await?;

    Ok(Json(details))
}

#[tracing::instrument(name = "Delete my post", skip_all)]
pub async fn delete_my_post<U, P, L, C>(
    State(state): State<PostState<U, P, L, C>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    P: PostStore + Clone + 'static,
    L: LikeStore + Clone + 'static,
    C: CommentStore + Clone + 'static,
{
    let id = PostId::parse(&id)?;

    DeletePostUseCase::new(state.post_store, state.like_store, state.comment_store)
        .execute(id, user.id)
        .await?;

    Ok(Json(DeletePostResponse { success: true }))
}
