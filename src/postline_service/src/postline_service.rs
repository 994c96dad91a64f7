use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use postline_adapters::{
    AuthState, ErrorReport, ErrorResponse, JwtAuthConfig, require_auth,
    http::routes::{
        PasswordResetState, PostState, add_comment, create_post, delete_comment, delete_my_post,
        forgot_password, get_my_post, get_post, list_all_posts, list_my_posts, login, me,
        register, set_new_password, toggle_like, update_comment, update_my_post,
    },
};
use postline_core::{CommentStore, EmailClient, LikeStore, PostStore, UserStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

pub const LIVENESS_MESSAGE: &str = "Running perfectly on Route 68!";

/// The posting API: user accounts under `/api/users`, posts, likes and
/// comments under `/api/posts`.
pub struct PostlineService {
    router: Router,
}

impl PostlineService {
    /// Create the service from its stores and email client.
    ///
    /// Every route only receives the state it needs. Protected routes sit
    /// behind the auth guard, which resolves the bearer token against the
    /// user store.
    pub fn new<U, P, L, C, E>(
        user_store: U,
        post_store: P,
        like_store: L,
        comment_store: C,
        email_client: E,
        jwt: JwtAuthConfig,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        P: PostStore + Clone + 'static,
        L: LikeStore + Clone + 'static,
        C: CommentStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
    {
        let auth_state = AuthState::new(user_store.clone(), jwt);
        let auth_guard = middleware::from_fn_with_state(auth_state.clone(), require_auth::<U>);

        let public_user_routes = Router::new()
            .route("/", post(register::<U>))
            .route("/login", post(login::<U>))
            .with_state(auth_state)
            .route("/forgot-password", post(forgot_password::<U, E>))
            .with_state(PasswordResetState::new(user_store.clone(), email_client))
            .route("/set-new-password", post(set_new_password::<U>))
            .with_state(user_store.clone());

        let protected_user_routes = Router::new()
            .route("/me", get(me))
            .route_layer(auth_guard.clone());

        let post_routes = Router::new()
            .route("/new", post(create_post::<U, P, L, C>))
            .route("/all", get(list_all_posts::<U, P, L, C>))
            .route("/all/{id}", get(get_post::<U, P, L, C>))
            .route("/me", get(list_my_posts::<U, P, L, C>))
            .route(
                "/me/{id}",
                get(get_my_post::<U, P, L, C>)
                    .put(update_my_post::<U, P, L, C>)
                    .delete(delete_my_post::<U, P, L, C>),
            )
            .with_state(PostState::new(
                user_store,
                post_store,
                like_store.clone(),
                comment_store.clone(),
            ))
            .route("/like", post(toggle_like::<L>))
            .with_state(like_store)
            .route(
                "/comment",
                post(add_comment::<C>)
                    .put(update_comment::<C>)
                    .delete(delete_comment::<C>),
            )
            .with_state(comment_store)
            .route_layer(auth_guard);

        let router = Router::new()
            .route("/", get(liveness))
            .nest(
                "/api/users",
                public_user_routes.merge(protected_user_routes),
            )
            .nest("/api/posts", post_routes);

        Self { router }
    }

    /// Re-render error bodies with their diagnostic stack. Meant for
    /// non-production deployments only.
    pub fn with_error_stack(mut self) -> Self {
        self.router = self.router.layer(middleware::map_response(expose_error_stack));
        self
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a router that can be mounted on another router.
    ///
    /// An empty `allowed_origins` accepts any origin.
    pub fn as_nested_router(mut self, allowed_origins: &[String]) -> Router {
        self.router = self.router.layer(cors_layer(allowed_origins));
        self.with_trace_layer().router
    }

    /// Serve the API on `listener` until `shutdown` resolves. In-flight
    /// requests are drained before this returns.
    pub async fn run_standalone<F>(
        self,
        listener: TcpListener,
        allowed_origins: &[String],
        shutdown: F,
    ) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Postline listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

async fn expose_error_stack(response: Response) -> Response {
    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    let body = Json(ErrorResponse {
        message: report.message,
        stack: Some(report.stack),
    });
    (response.status(), body).into_response()
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring malformed allowed origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Resolves on ctrl-c, or on SIGTERM where available.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
