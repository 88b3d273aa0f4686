pub mod auth;
pub mod credentials;
pub mod error;
pub mod i18n;
pub mod messages;
pub mod middleware;
pub mod pages;
pub mod session;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tracing::error;

pub use auth::{AppState, AppStateInner};
pub use error::ApiError;

/// Every route of the chat application. Tracing and other outer layers are
/// left to the caller.
pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/messages", get(messages::get_messages))
        .route("/send-message", post(messages::send_message))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    Router::new()
        .route("/", get(pages::index))
        .route("/login", get(pages::login_page).post(auth::login))
        .route("/register", get(pages::register_page).post(auth::register))
        .route("/chat", get(pages::chat_page))
        .route("/check-auth", get(auth::check_auth))
        .route("/logout", post(auth::logout))
        .merge(protected_routes)
        .with_state(state)
}

/// Run blocking store work off the async runtime.
pub(crate) async fn run_blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> parlor_db::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(e.to_string())
        })?
        .map_err(ApiError::from)
}
