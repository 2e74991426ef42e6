use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::chat::{ChatMessage, ChatSummary};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    /// `None` when the submitted text was blank and nothing was appended.
    pub message: Option<ChatMessage>,
}

/// GET /api/v1/chat/messages
pub async fn handle_list_messages(State(state): State<AppState>) -> Json<Vec<ChatMessage>> {
    Json(state.chat.messages().await)
}

/// POST /api/v1/chat/messages
pub async fn handle_submit_message(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    let message = state.chat.submit(&req.text).await?;
    Ok(Json(SubmitResponse { message }))
}

/// GET /api/v1/chat/summaries
pub async fn handle_list_summaries(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChatSummary>>, AppError> {
    Ok(Json(state.chat.summaries().list_summaries().await?))
}
