use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use postline_application::{LikeToggle, ToggleLikeUseCase};
use postline_core::{LikeStore, PostId};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::extract::{ApiJson, present};
use crate::auth::AuthenticatedUser;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeRequest {
    pub post_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeResponse {
    pub message: String,
    pub like_count: usize,
}

#[tracing::instrument(name = "Toggle like", skip_all)]
pub async fn toggle_like<L>(
    State(like_store): State<L>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<ToggleLikeRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    L: LikeStore + Clone + 'static,
{
    let post_id = present(request.post_id)
        .ok_or_else(|| ApiError::InvalidInput("Please enter post ID".to_owned()))?;
    let post_id = PostId::parse(&post_id)?;

    let toggle = ToggleLikeUseCase::new(like_store)
        .execute(post_id, user.id)
        .await?;

    let (status, message) = match toggle {
        LikeToggle::Liked { .. } => (StatusCode::CREATED, "The post has been liked"),
        LikeToggle::Unliked { .. } => (StatusCode::OK, "The post has been unliked"),
    };

    Ok((
        status,
        Json(ToggleLikeResponse {
            message: message.to_owned(),
            like_count: toggle.count(),
        }),
    ))
}
