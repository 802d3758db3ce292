// Chat Module - 聊天模块
//
// 实现六边形架构（Hexagonal Architecture）：
// - domain: 领域层，包含实体、值对象和领域服务
// - ports: 端口层，定义与外部世界的抽象接口
// - infrastructure: 基础设施层，实现端口的具体适配器
// - application: 应用层，实现命令处理器

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// 重新导出常用类型
pub use application::{
    CommandHandler, PipelineSettings, SendMessageCommand, SendMessageHandler, SendMessageResponse,
};

pub use domain::{ChatExchange, ExchangeId, LanguageCode, LanguagePair, PromptBuilder};

pub use infrastructure::{
    GoogleTranslateAdapter, GoogleTranslateConfig, InMemoryExchangeRepository,
    OpenAICompatibleAdapter, SqliteExchangeRepository,
};

pub use ports::{
    CompletionRequest, CompletionResponse, ExchangeRepository, LLMError, LLMPort,
    LLMProviderConfig, LanguageError, LanguagePort, RepositoryError,
};

use std::sync::Arc;

use crate::shared::{AppError, AppResult};

/// Chat 模块容器
///
/// 进程启动时构建一次，持有到进程结束，管理模块内的依赖注入
pub struct ChatModule {
    llm_port: Arc<dyn LLMPort>,
    language_port: Arc<dyn LanguagePort>,
    send_message_handler: SendMessageHandler,
}

impl ChatModule {
    /// 使用自定义端口创建 ChatModule
    pub fn new(
        exchange_repository: Arc<dyn ExchangeRepository>,
        llm_port: Arc<dyn LLMPort>,
        language_port: Arc<dyn LanguagePort>,
        settings: PipelineSettings,
    ) -> Self {
        let send_message_handler = SendMessageHandler::new(
            exchange_repository,
            llm_port.clone(),
            language_port.clone(),
            settings,
        );

        Self {
            llm_port,
            language_port,
            send_message_handler,
        }
    }

    /// 创建带 SQLite 持久化和真实提供商的 ChatModule（生产环境）
    ///
    /// # Arguments
    /// * `database_url` - sqlx SQLite URL
    /// * `llm_config` - 补全提供商配置
    /// * `language_config` - 语言服务配置
    /// * `settings` - 处理流程配置
    ///
    /// # Errors
    /// 数据库无法打开或 HTTP 客户端无法创建时返回错误
    pub async fn new_with_persistence(
        database_url: &str,
        llm_config: LLMProviderConfig,
        language_config: GoogleTranslateConfig,
        settings: PipelineSettings,
    ) -> AppResult<Self> {
        let exchange_repository: Arc<dyn ExchangeRepository> = Arc::new(
            SqliteExchangeRepository::connect(database_url)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?,
        );
        let llm_port: Arc<dyn LLMPort> = Arc::new(
            OpenAICompatibleAdapter::new(llm_config)
                .map_err(|e| AppError::LLMError(e.to_string()))?,
        );
        let language_port: Arc<dyn LanguagePort> = Arc::new(
            GoogleTranslateAdapter::new(language_config)
                .map_err(|e| AppError::LanguageError(e.to_string()))?,
        );

        Ok(Self::new(
            exchange_repository,
            llm_port,
            language_port,
            settings,
        ))
    }

    // Command handlers

    /// 处理一条聊天消息
    pub async fn send_message(&self, command: SendMessageCommand) -> SendMessageResponse {
        self.send_message_handler.handle(command).await
    }

    // Accessors

    pub fn llm_port(&self) -> &Arc<dyn LLMPort> {
        &self.llm_port
    }

    pub fn language_port(&self) -> &Arc<dyn LanguagePort> {
        &self.language_port
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_chat_module_with_persistence() {
        let settings = PipelineSettings {
            fallback_reply: "offline".to_string(),
            completion_timeout: std::time::Duration::from_secs(1),
            ..Default::default()
        };
        // 指向不可达地址：检测与补全都会失败，流程仍然完成
        let module = ChatModule::new_with_persistence(
            "sqlite::memory:",
            LLMProviderConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                api_key: "test-key".to_string(),
                timeout_secs: 1,
                ..Default::default()
            },
            GoogleTranslateConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                timeout_secs: 1,
            },
            settings,
        )
        .await
        .unwrap();

        assert_eq!(module.llm_port().provider_id(), "openrouter");
        assert_eq!(module.language_port().provider_id(), "google");

        let response = module.send_message(SendMessageCommand::new("Hello")).await;

        assert_eq!(response.reply, "offline");
        assert_eq!(response.language_detected.code(), "en");
        assert!(response.exchange_id.is_some());
    }
}
