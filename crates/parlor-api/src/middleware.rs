use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::i18n::Text;
use crate::session::Session;

/// Username of the authenticated caller, set by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

/// Reject anonymous callers of API routes with `{success: false}`.
pub async fn require_auth(
    State(state): State<AppState>,
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Session::Authenticated(username) = session else {
        return Err(ApiError::Unauthorized(state.locale.text(Text::Unauthorized)));
    };

    req.extensions_mut().insert(CurrentUser(username));
    Ok(next.run(req).await)
}
