use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use postline_application::{
    AddCommentError, CreatePostError, DeleteCommentError, DeletePostError, ForgotPasswordError,
    LoginError, SetNewPasswordError, ToggleLikeError, UpdateCommentError, UpdatePostError,
    ViewPostsError,
};
use postline_core::{
    CommentError, CommentStoreError, IdError, LikeStoreError, PostError, PostStoreError,
    UserError, UserStoreError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_error::SpanTrace;

use crate::auth::TokenAuthError;

pub const POST_NOT_FOUND: &str = "Post not found";
pub const POST_UPDATE_REJECTED: &str = "Please make sure the details entered are correct.";
pub const POST_DELETE_REJECTED: &str = "It seems that the post has already been deleted.";
pub const COMMENT_REJECTED: &str = "Comment not found or it is not yours.";

/// JSON error body. `stack` is only filled in outside production.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// Diagnostic details of a failed request, stashed in the response
/// extensions for the error-stack layer.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub message: String,
    pub stack: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("It seems that user already exists. Please login instead!")]
    UserAlreadyExists,

    #[error("User does not exist. Please register first!")]
    UserNotFound,

    #[error("Invalid credentials!")]
    InvalidCredentials,

    #[error("Please check the entered email. It seems to be incorrect.")]
    UnknownEmail,

    #[error("Confirmation code entered is incorrect. Please request for another code.")]
    InvalidCode,

    #[error("Please login to access this!")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User not authorized")]
    Unauthorized,

    #[error("Please enter correct post ID")]
    PostNotFound,

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    NotFoundOrForbidden(&'static str),

    #[error("Internal Server Error")]
    UnexpectedError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_)
            | ApiError::UserAlreadyExists
            | ApiError::InvalidCredentials
            | ApiError::UnknownEmail
            | ApiError::MissingToken
            | ApiError::InvalidToken
            | ApiError::PostNotFound
            | ApiError::NotFoundOrForbidden(_) => StatusCode::BAD_REQUEST,

            ApiError::InvalidCode | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,

            ApiError::UserNotFound | ApiError::NotFound(_) => StatusCode::NOT_FOUND,

            ApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::warn!(error = %self, status = status_code.as_u16(), "Request rejected");
        }

        let message = self.to_string();
        let report = ErrorReport {
            message: message.clone(),
            stack: format!("{self:?}\n{}", SpanTrace::capture()),
        };

        let body = Json(ErrorResponse {
            message,
            stack: None,
        });

        let mut response = (status_code, body).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<IdError> for ApiError {
    fn from(error: IdError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<PostError> for ApiError {
    fn from(error: PostError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<CommentError> for ApiError {
    fn from(error: CommentError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<TokenAuthError> for ApiError {
    fn from(error: TokenAuthError) -> Self {
        match error {
            TokenAuthError::MissingToken => ApiError::MissingToken,
            TokenAuthError::InvalidToken | TokenAuthError::TokenError(_) => ApiError::InvalidToken,
            TokenAuthError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => ApiError::UserAlreadyExists,
            UserStoreError::UserNotFound => ApiError::UserNotFound,
            UserStoreError::IncorrectPassword => ApiError::InvalidCredentials,
            UserStoreError::ResetCodeMismatch => ApiError::InvalidCode,
            UserStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<PostStoreError> for ApiError {
    fn from(error: PostStoreError) -> Self {
        match error {
            PostStoreError::PostNotFound => ApiError::NotFound(POST_NOT_FOUND),
            PostStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<LikeStoreError> for ApiError {
    fn from(error: LikeStoreError) -> Self {
        match error {
            LikeStoreError::LikeNotFound => ApiError::PostNotFound,
            LikeStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<CommentStoreError> for ApiError {
    fn from(error: CommentStoreError) -> Self {
        match error {
            CommentStoreError::CommentNotFound => ApiError::PostNotFound,
            CommentStoreError::EntryNotFound => ApiError::NotFoundOrForbidden(COMMENT_REJECTED),
            CommentStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ForgotPasswordError> for ApiError {
    fn from(error: ForgotPasswordError) -> Self {
        match error {
            ForgotPasswordError::UnknownEmail => ApiError::UnknownEmail,
            ForgotPasswordError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<SetNewPasswordError> for ApiError {
    fn from(error: SetNewPasswordError) -> Self {
        match error {
            SetNewPasswordError::UnknownEmail => ApiError::UnknownEmail,
            SetNewPasswordError::InvalidCode => ApiError::InvalidCode,
            SetNewPasswordError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<CreatePostError> for ApiError {
    fn from(error: CreatePostError) -> Self {
        match error {
            CreatePostError::UserStoreError(e) => ApiError::UnexpectedError(e.to_string()),
            CreatePostError::PostStoreError(e) => ApiError::UnexpectedError(e.to_string()),
            CreatePostError::LikeStoreError(e) => ApiError::UnexpectedError(e.to_string()),
            CreatePostError::CommentStoreError(e) => ApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<ViewPostsError> for ApiError {
    fn from(error: ViewPostsError) -> Self {
        match error {
            ViewPostsError::PostNotFound => ApiError::NotFound(POST_NOT_FOUND),
            ViewPostsError::UserStoreError(e) => e.into(),
            ViewPostsError::PostStoreError(e) => e.into(),
            ViewPostsError::LikeStoreError(e) => e.into(),
            ViewPostsError::CommentStoreError(e) => e.into(),
        }
    }
}

impl From<UpdatePostError> for ApiError {
    fn from(error: UpdatePostError) -> Self {
        match error {
            UpdatePostError::NotFoundOrForbidden => {
                ApiError::NotFoundOrForbidden(POST_UPDATE_REJECTED)
            }
            UpdatePostError::UserStoreError(e) => e.into(),
            UpdatePostError::PostStoreError(e) => e.into(),
            UpdatePostError::LikeStoreError(e) => e.into(),
            UpdatePostError::CommentStoreError(e) => e.into(),
        }
    }
}

impl From<DeletePostError> for ApiError {
    fn from(error: DeletePostError) -> Self {
        match error {
            DeletePostError::NotFoundOrForbidden => {
                ApiError::NotFoundOrForbidden(POST_DELETE_REJECTED)
            }
            DeletePostError::PostStoreError(e) => e.into(),
            DeletePostError::LikeStoreError(e) => e.into(),
            DeletePostError::CommentStoreError(e) => e.into(),
        }
    }
}

impl From<ToggleLikeError> for ApiError {
    fn from(error: ToggleLikeError) -> Self {
        match error {
            ToggleLikeError::PostNotFound => ApiError::PostNotFound,
            ToggleLikeError::LikeStoreError(e) => e.into(),
        }
    }
}

impl From<AddCommentError> for ApiError {
    fn from(error: AddCommentError) -> Self {
        match error {
            AddCommentError::PostNotFound => ApiError::PostNotFound,
            AddCommentError::CommentStoreError(e) => e.into(),
        }
    }
}

impl From<UpdateCommentError> for ApiError {
    fn from(error: UpdateCommentError) -> Self {
        match error {
            UpdateCommentError::PostNotFound => ApiError::PostNotFound,
            UpdateCommentError::NotFoundOrForbidden => {
                ApiError::NotFoundOrForbidden(COMMENT_REJECTED)
            }
            UpdateCommentError::CommentStoreError(e) => e.into(),
        }
    }
}

impl From<DeleteCommentError> for ApiError {
    fn from(error: DeleteCommentError) -> Self {
        match error {
            DeleteCommentError::PostNotFound => ApiError::PostNotFound,
            DeleteCommentError::NotFoundOrForbidden => {
                ApiError::NotFoundOrForbidden(COMMENT_REJECTED)
            }
            DeleteCommentError::CommentStoreError(e) => e.into(),
        }
    }
}
