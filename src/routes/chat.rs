//! Chat routes: sessions, history and tutoring turns.

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::error::{ApiError, CurrentUser};
use crate::models::chat::{
    ChatHistory, ChatReply, ChatSession, CreateSessionRequest, NewChatMessage,
    DEFAULT_SESSION_TITLE, EMPTY_RESPONSE_FALLBACK,
};
use crate::services::tutor::ChatTurn;
use crate::state::SharedState;
use crate::utils::error::AppError;

/// Chat routes; `/chat` accepts bodies up to `max_upload_bytes` so photos fit.
pub fn chat_routes(max_upload_bytes: usize) -> Router<SharedState> {
    Router::new()
        .route(
            "/chat",
            post(chat).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/chat/history", get(history))
        .route("/chat/sessions/:session_id", delete(delete_session))
        .route("/api/chat/sessions", post(create_session))
}

async fn create_session(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    body: Option<Json<CreateSessionRequest>>,
) -> Result<Json<ChatSession>, ApiError> {
    let title = body
        .and_then(|Json(req)| req.title)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SESSION_TITLE.to_string());
    Ok(Json(state.db.create_chat_session(user.id, &title)?))
}

async fn history(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ChatHistory>, ApiError> {
    let sessions = state.db.list_chat_sessions(user.id)?;
    let messages = state.db.list_chat_messages(user.id)?;
    Ok(Json(ChatHistory::assemble(user.id, sessions, messages)))
}

async fn delete_session(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let deleted = state.db.delete_chat_session(user.id, &session_id)?;
    let status = if deleted { "success" } else { "failed" };
    Ok(Json(json!({ "status": status })))
}

/// Fields of the multipart chat form
#[derive(Debug, Default)]
struct ChatForm {
    message: Option<String>,
    image: Option<Vec<u8>>,
    session_id: Option<String>,
}

fn multipart_error(e: MultipartError) -> ApiError {
    ApiError::new(e.status(), e.body_text())
}

async fn read_chat_form(mut multipart: Multipart) -> Result<ChatForm, ApiError> {
    let mut form = ChatForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "message" => {
                form.message = Some(field.text().await.map_err(multipart_error)?)
            }
            "image" => {
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.image = Some(bytes.to_vec());
            }
            "session_id" => {
                let text = field.text().await.map_err(multipart_error)?;
                form.session_id = Some(text).filter(|s| !s.trim().is_empty());
            }
            _ => {}
        }
    }
    Ok(form)
}

async fn chat(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    multipart: Multipart,
) -> Result<Json<ChatReply>, ApiError> {
    let form = read_chat_form(multipart).await?;
    let message = form
        .message
        .ok_or_else(|| ApiError::unprocessable("Field required: message"))?;

    if let Some(session_id) = &form.session_id {
        if state.db.get_chat_session(user.id, session_id)?.is_none() {
            return Err(AppError::not_found("Chat session not found").into());
        }
    }

    let profile = state
        .db
        .get_learning_profile(user.id)?
        .and_then(|p| p.to_user_profile());

    let mut turn = ChatTurn::new(message.clone()).with_profile(profile);
    if let Some(image) = form.image {
        turn = turn.with_image(image);
    }

    let outcome = state
        .orchestrator
        .get_chat_response(turn)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let response = if outcome.response.is_empty() {
        EMPTY_RESPONSE_FALLBACK.to_string()
    } else {
        outcome.response
    };

    let record = NewChatMessage {
        user_id: user.id,
        session_id: form.session_id,
        content: message,
        response: response.clone(),
        planning_analysis: outcome.planning_output.unwrap_or_default(),
        final_analysis: outcome.final_analysis.unwrap_or_default(),
    };
    if let Err(e) = state.db.insert_chat_message(record) {
        tracing::warn!("[Chat] Failed to store turn for user {}: {}", user.id, e);
    }

    Ok(Json(ChatReply { response }))
}
