pub mod auth;
pub mod config;
pub mod email;
pub mod http;
pub mod persistence;

pub use auth::{AuthState, AuthenticatedUser, Claims, JwtAuthConfig, TokenAuthError, require_auth};
pub use config::{AppEnvironment, PostlineSetting};
pub use email::{MockEmailClient, SmtpEmailClient};
pub use http::routes::{ApiError, ErrorReport, ErrorResponse};
pub use persistence::{
    HashMapCommentStore, HashMapLikeStore, HashMapPostStore, HashMapUserStore,
    PostgresCommentStore, PostgresLikeStore, PostgresPostStore, PostgresUserStore,
};
