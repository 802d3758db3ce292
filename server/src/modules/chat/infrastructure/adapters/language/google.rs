// Google Translate 适配器
//
// 使用 translate.googleapis.com 的 gtx 客户端接口：
// - 翻译：拼接 [0][*][0] 各段译文
// - 检测：sl=auto 时响应的 [2] 为识别出的源语言

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::modules::chat::domain::LanguageCode;
use crate::modules::chat::ports::{LanguageError, LanguagePort};

/// Google 语言服务配置
#[derive(Debug, Clone)]
pub struct GoogleTranslateConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GoogleTranslateConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.googleapis.com".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Google Translate 语言服务适配器
pub struct GoogleTranslateAdapter {
    client: Client,
    config: GoogleTranslateConfig,
}

impl GoogleTranslateAdapter {
    pub fn new(config: GoogleTranslateConfig) -> Result<Self, LanguageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LanguageError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn api_url(&self) -> String {
        format!(
            "{}/translate_a/single",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// 调用 gtx 接口并返回原始 JSON
    async fn query(&self, text: &str, source: &str, target: &str) -> Result<Value, LanguageError> {
        let response = self
            .client
            .get(self.api_url())
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| LanguageError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Google Translate error: {} - {}", status, body);
            return Err(LanguageError::ProviderError {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| LanguageError::InvalidResponse(e.to_string()))
    }

    /// 提取拼接后的译文
    fn parse_translation(json: &Value) -> Result<String, LanguageError> {
        let segments = json.get(0).and_then(|v| v.as_array()).ok_or_else(|| {
            LanguageError::InvalidResponse("missing segment array at index 0".to_string())
        })?;

        let translation: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(|v| v.as_str()))
            .collect();

        if translation.is_empty() {
            return Err(LanguageError::InvalidResponse(
                "empty translation".to_string(),
            ));
        }

        Ok(translation)
    }

    /// 提取识别出的源语言
    fn parse_detected(json: &Value) -> Result<LanguageCode, LanguageError> {
        json.get(2)
            .and_then(|v| v.as_str())
            .map(LanguageCode::new)
            .filter(|code| !code.is_empty())
            .ok_or_else(|| {
                LanguageError::InvalidResponse("missing detected language at index 2".to_string())
            })
    }
}

#[async_trait]
impl LanguagePort for GoogleTranslateAdapter {
    fn provider_id(&self) -> &str {
        "google"
    }

    async fn detect(&self, text: &str) -> Result<LanguageCode, LanguageError> {
        if text.trim().is_empty() {
            return Err(LanguageError::EmptyInput);
        }

        let json = self.query(text, "auto", "en").await?;
        let code = Self::parse_detected(&json)?;
        debug!("Detected language: {}", code);
        Ok(code)
    }

    async fn translate(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<String, LanguageError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }
        if source == target {
            return Ok(text.to_string());
        }

        let json = self.query(text, source.code(), target.code()).await?;
        let translation = Self::parse_translation(&json)?;
        debug!("Translated {} -> {}: {} chars", source, target, translation.len());
        Ok(translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    async fn spawn_provider(router: Router) -> GoogleTranslateAdapter {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        GoogleTranslateAdapter::new(GoogleTranslateConfig {
            base_url: format!("http://{}", addr),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_parse_multi_segment_translation() {
        let json = json!([[["Hello. ", "Habari. ", null, null], ["How are you?", "Hujambo?", null, null]], null, "sw"]);

        let translation = GoogleTranslateAdapter::parse_translation(&json).unwrap();
        assert_eq!(translation, "Hello. How are you?");
    }

    #[test]
    fn test_parse_detected_language() {
        let json = json!([[["Hello", "Habari", null, null]], null, "SW"]);

        let code = GoogleTranslateAdapter::parse_detected(&json).unwrap();
        assert_eq!(code.code(), "sw");
    }

    #[test]
    fn test_parse_malformed_response() {
        let json = json!({"unexpected": true});

        assert!(GoogleTranslateAdapter::parse_translation(&json).is_err());
        assert!(GoogleTranslateAdapter::parse_detected(&json).is_err());
    }

    #[tokio::test]
    async fn test_detect_and_translate_against_local_provider() {
        let router = Router::new().route(
            "/translate_a/single",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let q = params.get("q").cloned().unwrap_or_default();
                let translated = format!("{}:{}", params["tl"], q);
                Json(json!([[[translated, q, null, null]], null, "sw"]))
            }),
        );
        let adapter = spawn_provider(router).await;

        let code = adapter.detect("Habari yako").await.unwrap();
        assert_eq!(code.code(), "sw");

        let text = adapter
            .translate("Habari yako", &LanguageCode::new("sw"), &LanguageCode::new("en"))
            .await
            .unwrap();
        assert_eq!(text, "en:Habari yako");
    }

    #[tokio::test]
    async fn test_provider_error_is_reported() {
        let router = Router::new().route(
            "/translate_a/single",
            get(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let adapter = spawn_provider(router).await;

        let result = adapter
            .translate("Habari", &LanguageCode::new("sw"), &LanguageCode::new("en"))
            .await;
        assert!(matches!(
            result,
            Err(LanguageError::ProviderError { status: 429, .. })
        ));
    }

    #[tokio::test]
    async fn test_short_circuits_without_network() {
        let adapter = GoogleTranslateAdapter::new(GoogleTranslateConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        })
        .unwrap();

        assert!(matches!(
            adapter.detect("   ").await,
            Err(LanguageError::EmptyInput)
        ));

        let same = adapter
            .translate("Hello", &LanguageCode::new("en"), &LanguageCode::new("en"))
            .await
            .unwrap();
        assert_eq!(same, "Hello");
    }
}
