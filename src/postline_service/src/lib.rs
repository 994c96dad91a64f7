mod helpers;
mod postline_service;
mod tracing;

pub use helpers::{configure_postgresql, get_postgres_pool};
pub use postline_service::{LIVENESS_MESSAGE, PostlineService, shutdown_signal};

// Re-export commonly used types
pub use postline_core::{CommentStore, EmailClient, LikeStore, PostStore, UserStore};
