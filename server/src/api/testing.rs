// 路由测试用的固定端口实现

use async_trait::async_trait;
use axum::response::Response;
use http_body_util::BodyExt;
use std::sync::Arc;

use crate::infrastructure::AppState;
use crate::modules::chat::ports::{
    CompletionRequest, CompletionResponse, FinishReason, LLMError, LLMPort, LanguageError,
    LanguagePort,
};
use crate::modules::chat::{InMemoryExchangeRepository, LanguageCode, PipelineSettings};
use crate::modules::ChatModule;

struct CannedLLM(Option<String>);

#[async_trait]
impl LLMPort for CannedLLM {
    fn provider_id(&self) -> &str {
        "canned"
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LLMError> {
        match &self.0 {
            Some(content) => Ok(CompletionResponse {
                content: content.clone(),
                finish_reason: FinishReason::Stop,
                usage: None,
            }),
            None => Err(LLMError::NetworkError("connection refused".to_string())),
        }
    }
}

struct EnglishOnly;

#[async_trait]
impl LanguagePort for EnglishOnly {
    fn provider_id(&self) -> &str {
        "english-only"
    }

    async fn detect(&self, _text: &str) -> Result<LanguageCode, LanguageError> {
        Ok(LanguageCode::new("en"))
    }

    async fn translate(
        &self,
        text: &str,
        _source: &LanguageCode,
        _target: &LanguageCode,
    ) -> Result<String, LanguageError> {
        Ok(text.to_string())
    }
}

fn build(llm: CannedLLM, fallback: &str) -> (AppState, Arc<InMemoryExchangeRepository>) {
    let repo = Arc::new(InMemoryExchangeRepository::new());
    let settings = PipelineSettings {
        fallback_reply: fallback.to_string(),
        ..Default::default()
    };
    let module = ChatModule::new(repo.clone(), Arc::new(llm), Arc::new(EnglishOnly), settings);

    (AppState::new(module), repo)
}

pub fn test_state(reply: &str) -> (AppState, Arc<InMemoryExchangeRepository>) {
    build(CannedLLM(Some(reply.to_string())), "fallback")
}

pub fn test_state_with_failing_llm(fallback: &str) -> (AppState, Arc<InMemoryExchangeRepository>) {
    build(CannedLLM(None), fallback)
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
