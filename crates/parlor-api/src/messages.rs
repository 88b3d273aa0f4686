use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::debug;

use parlor_types::api::{MessageView, MessagesResponse, SendMessageRequest, SendMessageResponse};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::i18n::Text;
use crate::middleware::CurrentUser;
use crate::run_blocking;

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    /// Unix seconds. Absent or unparsable means 0.
    pub since: Option<String>,
}

impl MessageQuery {
    pub fn since(&self) -> i64 {
        self.since
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }
}

/// GET /messages?since=N: every message newer than `since`, oldest first.
pub async fn get_messages(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
    Extension(_user): Extension<CurrentUser>,
) -> Result<Json<MessagesResponse>, ApiError> {
    let db = state.clone();
    let since = query.since();
    let records = run_blocking(move || db.db.get_messages(since)).await?;

    let messages = records
        .into_iter()
        .map(|m| MessageView {
            id: m.id,
            username: m.username,
            text: m.text,
            timestamp: m.timestamp,
        })
        .collect();

    Ok(Json(MessagesResponse {
        success: true,
        messages,
    }))
}

/// POST /send-message: post as the session's user.
pub async fn send_message(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    if req.text.trim().is_empty() {
        return Err(ApiError::Validation(state.locale.text(Text::EmptyMessage)));
    }

    let db = state.clone();
    let CurrentUser(username) = user;
    let message = run_blocking(move || db.db.add_message(&username, &req.text)).await?;

    debug!(id = message.id, username = %message.username, "Message stored");
    Ok(Json(SendMessageResponse {
        success: true,
        message_id: message.id,
    }))
}
