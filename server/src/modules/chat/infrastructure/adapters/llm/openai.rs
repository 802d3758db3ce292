// OpenAI 兼容适配器
//
// 适用于 OpenAI、OpenRouter 等兼容 /chat/completions 接口的提供商

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::modules::chat::ports::{
    CompletionRequest, CompletionResponse, FinishReason, LLMError, LLMPort, LLMProviderConfig,
    TokenUsage,
};

/// OpenAI 兼容适配器
pub struct OpenAICompatibleAdapter {
    client: Client,
    config: LLMProviderConfig,
}

impl OpenAICompatibleAdapter {
    /// 创建新的适配器实例
    pub fn new(config: LLMProviderConfig) -> Result<Self, LLMError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LLMError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取 API URL
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// 转换为 OpenAI 请求格式
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let model = if request.model.is_empty() {
            self.config.default_model.clone()
        } else {
            request.model.clone()
        };

        OpenAIRequest {
            model,
            messages: request
                .messages
                .iter()
                .map(|m| OpenAIMessage {
                    role: m.role.clone(),
                    content: Some(m.content.clone()),
                })
                .collect(),
        }
    }

    /// 把 reqwest 错误映射为 LLMError
    fn map_transport_error(&self, err: reqwest::Error) -> LLMError {
        if err.is_timeout() {
            LLMError::Timeout(self.config.timeout_secs)
        } else {
            LLMError::NetworkError(err.to_string())
        }
    }

    /// 把非 2xx 状态映射为 LLMError
    fn map_status_error(status: StatusCode, body: String) -> LLMError {
        match status {
            StatusCode::TOO_MANY_REQUESTS => LLMError::RateLimitError,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                LLMError::AuthenticationError(body)
            }
            _ => LLMError::ApiError {
                code: status.as_str().to_string(),
                message: body,
            },
        }
    }

    /// 解析响应体
    fn parse_response(response: OpenAIResponse) -> Result<CompletionResponse, LLMError> {
        if let Some(err) = response.error {
            return Err(LLMError::ApiError {
                code: err
                    .code
                    .map(|c| c.to_string().trim_matches('"').to_string())
                    .unwrap_or_else(|| "provider_error".to_string()),
                message: err.message,
            });
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::InvalidResponse("No choices in response".to_string()))?;

        let content = choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| LLMError::InvalidResponse("Empty message content".to_string()))?;

        Ok(CompletionResponse {
            content,
            finish_reason: FinishReason::from_openai(choice.finish_reason.as_deref()),
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }
}

#[async_trait]
impl LLMPort for OpenAICompatibleAdapter {
    fn provider_id(&self) -> &str {
        &self.config.id
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LLMError> {
        let openai_request = self.to_openai_request(&request);

        debug!(
            "Sending request to {}: model={}",
            self.config.id, openai_request.model
        );

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("{} API error: {} - {}", self.config.id, status, error_text);
            return Err(Self::map_status_error(status, error_text));
        }

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| LLMError::InvalidResponse(e.to_string()))?;

        Self::parse_response(openai_response)
    }
}

// OpenAI API 类型定义

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
    /// OpenRouter 在部分错误场景下返回 200 + error 对象
    error: Option<OpenAIErrorBody>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorBody {
    message: String,
    code: Option<serde_json::Value>,
}
