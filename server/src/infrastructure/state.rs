use std::sync::Arc;

use crate::modules::ChatModule;

/// 应用全局状态
///
/// 由 axum 在每个请求处理器之间共享，克隆只复制引用计数
#[derive(Clone)]
pub struct AppState {
    /// Chat 模块（持有仓储与外部服务端口）
    pub chat_module: Arc<ChatModule>,
}

impl AppState {
    pub fn new(chat_module: ChatModule) -> Self {
        Self {
            chat_module: Arc::new(chat_module),
        }
    }
}
