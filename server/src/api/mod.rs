// HTTP API - axum 路由
//
// GET  /      健康检查
// POST /chat  处理一条聊天消息

pub mod chat;
pub mod health;

#[cfg(test)]
mod testing;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::infrastructure::AppState;

pub use chat::{ChatRequest, ChatResponse};
pub use health::HealthResponse;

/// 构建应用路由
///
/// 跨域策略完全放开：任意来源、方法和请求头
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health::health))
        .route("/chat", post(chat::chat))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
