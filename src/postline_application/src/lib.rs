pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use use_cases::{
    add_comment::{AddCommentError, AddCommentUseCase},
    create_post::{CreatePostError, CreatePostUseCase},
    delete_comment::{DeleteCommentError, DeleteCommentUseCase},
    delete_post::{DeletePostError, DeletePostUseCase},
    forgot_password::{ForgotPasswordError, ForgotPasswordUseCase, ResetCodeEmail},
    login::{LoginError, LoginIdentifier, LoginUseCase},
    register::RegisterUseCase,
    set_new_password::{SetNewPasswordError, SetNewPasswordUseCase},
    toggle_like::{LikeToggle, ToggleLikeError, ToggleLikeUseCase},
    update_comment::{UpdateCommentError, UpdateCommentUseCase},
    update_post::{UpdatePostError, UpdatePostUseCase},
    view_posts::{ViewPostsError, ViewPostsUseCase},
};
