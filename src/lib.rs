//! # Postline - Social Posting Backend Library
//!
//! This is a facade crate that re-exports all public APIs from the Postline components.
//! Use this crate to get access to users, posts, likes and comments in one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `Post`, `Like`, `Comment`, etc.
//! - **Repository traits**: `UserStore`, `PostStore`, `LikeStore`, `CommentStore`
//! - **Use cases**: `RegisterUseCase`, `CreatePostUseCase`, `ToggleLikeUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `HashMapPostStore`, `SmtpEmailClient`, etc.
//! - **Service**: `PostlineService` - The main entry point for the HTTP API

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use postline_core::*;
}

// Re-export most commonly used core types at the root level
pub use postline_core::{
    Comment, CommentEntry, CommentId, Email, Like, NewUser, Password, Post, PostChanges,
    PostDetails, PostId, ResetCode, User, UserError, UserId, Username,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use postline_core::{
        CommentStore, CommentStoreError, LikeStore, LikeStoreError, PostStore, PostStoreError,
        UserStore, UserStoreError,
    };
}

// Re-export repository traits at root level
pub use postline_core::{
    CommentStore, CommentStoreError, EmailClient, LikeStore, LikeStoreError, PostStore,
    PostStoreError, UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use postline_application::*;
}

// Re-export use cases at root level
pub use postline_application::{
    AddCommentUseCase, CreatePostUseCase, DeleteCommentUseCase, DeletePostUseCase,
    ForgotPasswordUseCase, LoginUseCase, RegisterUseCase, SetNewPasswordUseCase,
    ToggleLikeUseCase, UpdateCommentUseCase, UpdatePostUseCase, ViewPostsUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use postline_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use postline_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use postline_adapters::email::*;
    }

    /// JWT token service and auth guard
    pub mod auth {
        pub use postline_adapters::auth::*;
    }

    /// Configuration
    pub mod config {
        pub use postline_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use postline_adapters::{
    JwtAuthConfig, PostlineSetting,
    email::{MockEmailClient, SmtpEmailClient},
    persistence::{
        HashMapCommentStore, HashMapLikeStore, HashMapPostStore, HashMapUserStore,
        PostgresCommentStore, PostgresLikeStore, PostgresPostStore, PostgresUserStore,
    },
};

// ============================================================================
// Postline Service (Main Entry Point)
// ============================================================================

/// Main posting service
pub use postline_service::{
    PostlineService, configure_postgresql, get_postgres_pool, shutdown_signal,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
