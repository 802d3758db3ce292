use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::infrastructure::AppState;
use crate::modules::chat::SendMessageCommand;

/// POST /chat 请求体
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// POST /chat 响应体
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub language_detected: String,
}

/// POST /chat
///
/// 外部服务失败由流程内部降级处理，这里总是返回 200
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let response = state
        .chat_module
        .send_message(SendMessageCommand::new(request.message))
        .await;

    Json(ChatResponse {
        reply: response.reply,
        language_detected: response.language_detected.to_string(),
    })
}
