use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use parlor_db::Database;
use parlor_types::api::{ActionResponse, AuthStatus};

use crate::credentials::{BodyFormat, CredentialsBody};
use crate::error::ApiError;
use crate::i18n::{Locale, Text};
use crate::pages::{self, Page};
use crate::run_blocking;
use crate::session::{Session, SessionConfig};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub session: SessionConfig,
    pub locale: Locale,
}

/// POST /register: create an account. Does not log in.
pub async fn register(
    State(state): State<AppState>,
    body: CredentialsBody,
) -> Result<Response, ApiError> {
    let CredentialsBody {
        credentials,
        format,
    } = body;

    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        return Ok(reject(format, Page::Register, state.locale.text(Text::MissingCredentials)));
    }

    let db = state.clone();
    let username = credentials.username.clone();
    let created = run_blocking(move || {
        db.db
            .register_user(&credentials.username, &credentials.password)
    })
    .await?;

    if !created {
        info!(username = %username, "Registration refused: username taken");
        return Ok(reject(format, Page::Register, state.locale.text(Text::UsernameTaken)));
    }

    info!(username = %username, "User registered");
    Ok(match format {
        BodyFormat::Json => Json(ActionResponse::ok()).into_response(),
        BodyFormat::Form => Redirect::to("/login").into_response(),
    })
}

/// POST /login: verify credentials and start a session.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: CredentialsBody,
) -> Result<Response, ApiError> {
    let CredentialsBody {
        credentials,
        format,
    } = body;

    let db = state.clone();
    let username = credentials.username.clone();
    let valid = run_blocking(move || {
        db.db
            .verify_login(&credentials.username, &credentials.password)
    })
    .await?;

    if !valid {
        info!(username = %username, "Login failed");
        return Ok(reject(format, Page::Login, state.locale.text(Text::InvalidCredentials)));
    }

    let token = state
        .session
        .issue(&username)
        .map_err(|e| ApiError::Internal(format!("failed to sign session token: {e}")))?;
    let jar = jar.add(state.session.cookie(token));

    info!(username = %username, "Login succeeded");
    Ok(match format {
        BodyFormat::Json => (jar, Json(ActionResponse::ok())).into_response(),
        BodyFormat::Form => (jar, Redirect::to("/chat")).into_response(),
    })
}

/// POST /logout: always succeeds, whatever the current state.
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> (CookieJar, Json<ActionResponse>) {
    if let Some(username) = session.username() {
        info!(username, "Logged out");
    }

    (state.session.clear(jar), Json(ActionResponse::ok()))
}

/// GET /check-auth
pub async fn check_auth(session: Session) -> Json<AuthStatus> {
    Json(AuthStatus {
        authenticated: session.username().is_some(),
        username: session.username().map(str::to_string),
    })
}

/// Failure reply in the shape the caller asked for.
fn reject(format: BodyFormat, page: Page, message: &'static str) -> Response {
    match format {
        BodyFormat::Json => ApiError::Validation(message).into_response(),
        BodyFormat::Form => pages::render(page, Some(message)).into_response(),
    }
}
