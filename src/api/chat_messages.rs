use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::error::{invalid, parse_body, ApiError};
use super::wellness_scores::{ensure_body_user_matches, ensure_user_exists};
use super::AppState;
use crate::models::{validate_chat_role, ChatMessage, CreateChatMessage};

pub fn chat_message_routes() -> Router<AppState> {
    Router::new().route(
        "/users/:user_id/chat-messages",
        get(get_chat_messages).post(create_chat_message),
    )
}

#[derive(Debug, Deserialize)]
pub struct ChatMessagesQuery {
    /// Return only the N most recent messages (still in ascending order).
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageBody {
    pub user_id: Option<i32>,
    pub role: String,
    pub content: String,
}

pub async fn get_chat_messages(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Query(query): Query<ChatMessagesQuery>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    Ok(Json(
        state.store.get_chat_messages(user_id, query.limit).await?,
    ))
}

pub async fn create_chat_message(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<ChatMessage>), ApiError> {
    let body: ChatMessageBody = parse_body(body)?;
    ensure_body_user_matches(body.user_id, user_id)?;
    ensure_user_exists(&state, user_id).await?;
    validate_chat_role(&body.role).map_err(invalid)?;

    let message = state
        .store
        .create_chat_message(CreateChatMessage {
            user_id,
            role: body.role,
            content: body.content,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}
