use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use super::super::CommandHandler;
use crate::modules::chat::domain::{
    ChatExchange, ExchangeId, LanguageCode, LanguagePair, PromptBuilder,
};
use crate::modules::chat::ports::{
    CompletionRequest, ExchangeRepository, FinishReason, LLMChatMessage, LLMError, LLMPort,
    LanguagePort,
};

/// 发送消息命令
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    /// 用户原始消息
    pub message: String,
}

impl SendMessageCommand {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 发送消息响应
#[derive(Debug, Clone)]
pub struct SendMessageResponse {
    /// 返回给用户的回复
    pub reply: String,
    /// 检测到的语言
    pub language_detected: LanguageCode,
    /// 持久化后的记录 ID（存储失败时为空）
    pub exchange_id: Option<ExchangeId>,
    /// 补全是否失败并使用了兜底回复
    pub used_fallback: bool,
}

pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant knowledgeable about Tanzanian media laws, press freedom, and survey insights.";

pub const DEFAULT_FALLBACK_REPLY: &str =
    "Sorry, the assistant is unavailable right now. Please try again in a moment.";

/// 处理流程配置
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// 模型 ID
    pub model: String,
    /// 系统提示词
    pub system_prompt: String,
    /// 补全失败时返回的兜底回复
    pub fallback_reply: String,
    /// 本地语言 / 中转语言
    pub languages: LanguagePair,
    /// 检测失败时使用的语言
    pub default_language: LanguageCode,
    /// 补全请求的最长等待时间
    pub completion_timeout: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
            languages: LanguagePair::default(),
            default_language: LanguageCode::default(),
            completion_timeout: Duration::from_secs(40),
        }
    }
}

/// 发送消息命令处理器
///
/// 单次请求的完整流程：检测语言 → 入站翻译 → 补全 → 回译 → 持久化。
/// 所有外部调用的失败都在这里统一回退，调用方总能拿到回复。
pub struct SendMessageHandler {
    exchange_repository: Arc<dyn ExchangeRepository>,
    llm_port: Arc<dyn LLMPort>,
    language_port: Arc<dyn LanguagePort>,
    prompt_builder: PromptBuilder,
    settings: PipelineSettings,
}

impl SendMessageHandler {
    pub fn new(
        exchange_repository: Arc<dyn ExchangeRepository>,
        llm_port: Arc<dyn LLMPort>,
        language_port: Arc<dyn LanguagePort>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            exchange_repository,
            llm_port,
            language_port,
            prompt_builder: PromptBuilder::new(settings.system_prompt.clone()),
            settings,
        }
    }

    /// 检测语言，失败时回退到默认语言
    async fn detect_language(&self, text: &str) -> LanguageCode {
        match self.language_port.detect(text).await {
            Ok(code) if !code.is_empty() => code,
            Ok(_) => self.settings.default_language.clone(),
            Err(e) => {
                warn!(
                    "Language detection failed, using {}: {}",
                    self.settings.default_language, e
                );
                self.settings.default_language.clone()
            }
        }
    }

    /// 入站翻译（本地语言 → 中转语言），失败时透传原文
    async fn translate_inbound(&self, text: &str) -> String {
        let pair = &self.settings.languages;
        match self
            .language_port
            .translate(text, pair.local(), pair.pivot())
            .await
        {
            Ok(translated) => translated,
            Err(e) => {
                warn!("Inbound translation failed, passing original text: {}", e);
                text.to_string()
            }
        }
    }

    /// 出站回译（中转语言 → 本地语言），失败时保留中转语言回复
    async fn translate_outbound(&self, reply: String) -> String {
        let pair = &self.settings.languages;
        match self
            .language_port
            .translate(&reply, pair.pivot(), pair.local())
            .await
        {
            Ok(translated) => translated,
            Err(e) => {
                warn!("Reply translation failed, returning untranslated reply: {}", e);
                reply
            }
        }
    }

    /// 调用补全服务，超时受配置约束
    async fn complete(&self, text: &str) -> Result<String, LLMError> {
        let messages: Vec<LLMChatMessage> = self
            .prompt_builder
            .build(text)
            .into_iter()
            .map(LLMChatMessage::from)
            .collect();
        let request = CompletionRequest::new(messages, self.settings.model.clone());

        let timeout = self.settings.completion_timeout;
        match tokio::time::timeout(timeout, self.llm_port.complete(request)).await {
            Ok(result) => result.map(|response| {
                debug!(
                    finish_reason = ?response.finish_reason,
                    total_tokens = response.usage.map(|u| u.total_tokens),
                    "Completion received"
                );
                if response.finish_reason == FinishReason::Length {
                    warn!("Completion was truncated at the token limit");
                }
                response.content
            }),
            Err(_) => Err(LLMError::Timeout(timeout.as_secs())),
        }
    }

    /// 持久化对话记录，失败只记录日志
    async fn persist(&self, exchange: &ChatExchange) -> Option<ExchangeId> {
        match self.exchange_repository.append(exchange).await {
            Ok(id) => Some(id),
            Err(e) => {
                error!("Failed to persist chat exchange: {}", e);
                None
            }
        }
    }

    /// 执行完整流程
    #[instrument(skip(self, command), fields(message_len = command.message.len()))]
    pub async fn process(&self, command: SendMessageCommand) -> SendMessageResponse {
        let text = command.message.trim();

        let language = self.detect_language(text).await;
        let translate = self.settings.languages.requires_translation(&language);
        debug!("Detected language {} (translate: {})", language, translate);

        let prompt_text = if translate {
            self.translate_inbound(text).await
        } else {
            text.to_string()
        };

        let (reply, used_fallback) = match self.complete(&prompt_text).await {
            Ok(content) => (content, false),
            Err(e) => {
                warn!(
                    "Completion via {} failed, using fallback reply: {}",
                    self.llm_port.provider_id(),
                    e
                );
                (self.settings.fallback_reply.clone(), true)
            }
        };

        // 兜底回复同样回译为用户的语言
        let reply = if translate {
            self.translate_outbound(reply).await
        } else {
            reply
        };

        let exchange = ChatExchange::new(command.message.as_str(), reply.as_str(), language.clone());
        let exchange_id = self.persist(&exchange).await;

        info!(
            language = %language,
            used_fallback,
            persisted = exchange_id.is_some(),
            "Chat message processed"
        );

        SendMessageResponse {
            reply,
            language_detected: language,
            exchange_id,
            used_fallback,
        }
    }
}

#[async_trait]
impl CommandHandler<SendMessageCommand, SendMessageResponse> for SendMessageHandler {
    async fn handle(&self, command: SendMessageCommand) -> SendMessageResponse {
        self.process(command).await
    }
}
