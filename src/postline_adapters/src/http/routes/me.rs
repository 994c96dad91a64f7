use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::auth::AuthenticatedUser;

#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub success: String,
    pub name: String,
    pub username: String,
}

/// Served straight from the identity the auth guard resolved.
#[tracing::instrument(name = "Me", skip_all)]
pub async fn me(Extension(user): Extension<AuthenticatedUser>) -> Json<MeResponse> {
    Json(MeResponse {
        success: "User details fetched".to_owned(),
        name: user.name,
        username: user.username.as_ref().to_owned(),
    })
}
