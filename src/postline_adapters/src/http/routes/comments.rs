use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use postline_application::{AddCommentUseCase, DeleteCommentUseCase, UpdateCommentUseCase};
use postline_core::{Comment, CommentEntry, CommentId, CommentStore, PostId, comment_text};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::extract::{ApiJson, present};
use crate::auth::AuthenticatedUser;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    pub post_id: Option<String>,
    pub comment: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    pub post_id: Option<String>,
    pub comment_id: Option<String>,
    pub comment: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentRequest {
    pub post_id: Option<String>,
    pub comment_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentResponse {
    pub success: String,
    pub all_comments_on_this_post: Comment,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteCommentResponse {
    pub success: String,
}

#[tracing::instrument(name = "Add comment", skip_all)]
pub async fn add_comment<C>(
    State(comment_store): State<C>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<AddCommentRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    C: CommentStore + Clone + 'static,
{
    let (Some(post_id), Some(text)) = (present(request.post_id), present(request.comment)) else {
        return Err(ApiError::InvalidInput(
            "Please enter post ID and comment".to_owned(),
        ));
    };
    let post_id = PostId::parse(&post_id)?;
    let entry = CommentEntry::new(user.id, &text)?;

    let comment = AddCommentUseCase::new(comment_store)
        .execute(post_id, entry)
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

#[tracing::instrument(name = "Update comment", skip_all)]
pub async fn update_comment<C>(
    State(comment_store): State<C>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<UpdateCommentRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    C: CommentStore + Clone + 'static,
{
    let (Some(post_id), Some(comment_id), Some(text)) = (
        present(request.post_id),
        present(request.comment_id),
        present(request.comment),
    ) else {
        return Err(ApiError::InvalidInput(
            "Please enter post ID, comment ID and comment".to_owned(),
        ));
    };
    let post_id = PostId::parse(&post_id)?;
    let comment_id = CommentId::parse(&comment_id)?;
    let text = comment_text(&text)?;

    let comment = UpdateCommentUseCase::new(comment_store)
        .execute(post_id, comment_id, user.id, &text)
        .await?;

    Ok(Json(UpdateCommentResponse {
        success: "Comment updated".to_owned(),
        all_comments_on_this_post: comment,
    }))
}

#[tracing::instrument(name = "Delete comment", skip_all)]
pub async fn delete_comment<C>(
    State(comment_store): State<C>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<DeleteCommentRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    C: CommentStore + Clone + 'static,
{
    let (Some(post_id), Some(comment_id)) =
        (present(request.post_id), present(request.comment_id))
    else {
        return Err(ApiError::InvalidInput(
            "Please enter post ID and comment ID".to_owned(),
        ));
    };
    let post_id = PostId::parse(&post_id)?;
    let comment_id = CommentId::parse(&comment_id)?;

    DeleteCommentUseCase::new(comment_store)
        .execute(post_id, comment_id, user.id)
        .await?;

    Ok(Json(DeleteCommentResponse {
        success: "Comment deleted".to_owned(),
    }))
}
