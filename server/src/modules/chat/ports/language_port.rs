use async_trait::async_trait;
use thiserror::Error;

use crate::modules::chat::domain::LanguageCode;

/// 语言服务错误类型
#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Provider error: {status} - {message}")]
    ProviderError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty input")]
    EmptyInput,
}

/// 语言服务端口
///
/// 语言检测与双向翻译。适配器只返回结果，回退策略由应用层统一决定。
#[async_trait]
pub trait LanguagePort: Send + Sync {
    /// 获取提供商 ID
    fn provider_id(&self) -> &str;

    /// 检测文本语言
    async fn detect(&self, text: &str) -> Result<LanguageCode, LanguageError>;

    /// 把文本从 `source` 翻译为 `target`
    async fn translate(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<String, LanguageError>;
}
