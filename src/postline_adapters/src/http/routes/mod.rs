pub mod comments;
pub mod error;
pub mod extract;
pub mod forgot_password;
pub mod like;
pub mod login;
pub mod me;
pub mod posts;
pub mod register;
pub mod set_new_password;

pub use comments::{
    AddCommentRequest, DeleteCommentRequest, DeleteCommentResponse, UpdateCommentRequest,
    add_comment, delete_comment, update_comment,
};
pub use error::{ApiError, ErrorReport, ErrorResponse};
pub use extract::ApiJson;
pub use forgot_password::{
    ForgotPasswordRequest, PasswordResetState, SuccessResponse, forgot_password,
};
pub use like::{ToggleLikeRequest, ToggleLikeResponse, toggle_like};
pub use login::{LoginRequest, login};
pub use me::{MeResponse, me};
pub use posts::{
    CreatePostRequest, DeletePostResponse, PostState, UpdatePostRequest, create_post,
    delete_my_post, get_my_post, get_post, list_all_posts, list_my_posts, update_my_post,
};
pub use register::{AuthResponse, RegisterRequest, register};
pub use set_new_password::{CodeInput, SetNewPasswordRequest, set_new_password};
