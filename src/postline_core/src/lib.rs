pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    comment::{Comment, CommentEntry, CommentError, comment_text},
    email::Email,
    ids::{CommentId, IdError, PostId, UserId},
    like::{Like, LikeEntry},
    password::Password,
    post::{OwnerSummary, Post, PostChanges, PostDetails, PostError},
    reset_code::{ResetCode, ResetCodeError},
    user::{NewUser, User, UserError},
    username::Username,
};

pub use ports::{
    repositories::{
        CommentStore, CommentStoreError, LikeStore, LikeStoreError, PostStore, PostStoreError,
        UserStore, UserStoreError,
    },
    services::EmailClient,
};
