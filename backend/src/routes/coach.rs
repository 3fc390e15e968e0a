//! Coach chat API routes

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use nutriscan_shared::validation::MAX_CHAT_MESSAGE_CHARS;
use nutriscan_shared::{ConversationResponse, SendMessageRequest};

pub fn coach_routes() -> Router<AppState> {
    Router::new().route("/messages", get(list_messages).post(send_message))
}

/// GET /api/v1/coach/messages
async fn list_messages(State(state): State<AppState>) -> Json<ConversationResponse> {
    let conversation = state.conversation.lock().await;
    Json(ConversationResponse {
        messages: conversation.messages().to_vec(),
        reply: None,
    })
}

/// POST /api/v1/coach/messages
///
/// Blank text is ignored: the transcript comes back unchanged with no reply.
async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> ApiResult<Json<ConversationResponse>> {
    if req.text.chars().count() > MAX_CHAT_MESSAGE_CHARS {
        return Err(ApiError::Validation(format!(
            "Message too long (max {} characters)",
            MAX_CHAT_MESSAGE_CHARS
        )));
    }

    if req.text.trim().is_empty() {
        return Ok(list_messages(State(state)).await);
    }

    // Question and answer are appended together so concurrent sends never
    // interleave and a dropped request leaves no unanswered line.
    let reply = state.coach.ask(&req.text).await;

    let mut conversation = state.conversation.lock().await;
    conversation.record_exchange(&req.text, &reply);

    Ok(Json(ConversationResponse {
        messages: conversation.messages().to_vec(),
        reply: Some(reply),
    }))
}
