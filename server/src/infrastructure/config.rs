use std::time::Duration;

use crate::modules::chat::application::{
    DEFAULT_FALLBACK_REPLY, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT,
};
use crate::modules::chat::{
    GoogleTranslateConfig, LLMProviderConfig, LanguageCode, LanguagePair, PipelineSettings,
};
use crate::shared::{AppError, AppResult};

/// 应用配置
///
/// 进程启动时从环境变量（以及 .env 文件）读取一次。
/// 提供商凭据缺失时启动失败，其余项都有默认值。
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 监听地址
    pub bind_address: String,
    /// SQLite URL
    pub database_url: String,
    /// 补全提供商
    pub provider: LLMProviderConfig,
    /// 语言服务
    pub language: GoogleTranslateConfig,
    /// 处理流程
    pub pipeline: PipelineSettings,
}

impl AppConfig {
    /// 从进程环境读取配置
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| {
                AppError::ConfigError(format!("Missing required environment variable {}", key))
            })
        };
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let api_key = required("OPENROUTER_API_KEY")?;
        let base_url = required("OPENROUTER_BASE_URL")?;
        let model = or("HAMASA_MODEL", DEFAULT_MODEL);
        let timeout_secs = parse_or(get("HAMASA_COMPLETION_TIMEOUT_SECS"), "HAMASA_COMPLETION_TIMEOUT_SECS", 40)?;
        let translate_timeout_secs = parse_or(get("HAMASA_TRANSLATE_TIMEOUT_SECS"), "HAMASA_TRANSLATE_TIMEOUT_SECS", 10)?;

        let languages = LanguagePair::new(
            or("HAMASA_LOCAL_LANGUAGE", "sw"),
            or("HAMASA_PIVOT_LANGUAGE", "en"),
        );

        Ok(Self {
            bind_address: or("HAMASA_BIND", "0.0.0.0:8000"),
            database_url: or("HAMASA_DATABASE_URL", "sqlite://chat_history.db"),
            provider: LLMProviderConfig {
                id: "openrouter".to_string(),
                base_url,
                api_key,
                default_model: model.clone(),
                timeout_secs,
            },
            language: GoogleTranslateConfig {
                base_url: or("HAMASA_TRANSLATE_URL", "https://translate.googleapis.com"),
                timeout_secs: translate_timeout_secs,
            },
            pipeline: PipelineSettings {
                model,
                system_prompt: or("HAMASA_SYSTEM_PROMPT", DEFAULT_SYSTEM_PROMPT),
                fallback_reply: or("HAMASA_FALLBACK_REPLY", DEFAULT_FALLBACK_REPLY),
                languages,
                default_language: LanguageCode::new(or("HAMASA_DEFAULT_LANGUAGE", "en")),
                completion_timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

fn parse_or(value: Option<String>, key: &str, default: u64) -> AppResult<u64> {
    match value {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(AppError::ConfigError(format!(
                "{} must be a positive integer, got '{}'",
                key, raw
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const CREDENTIALS: [(&str, &str); 2] = [
        ("OPENROUTER_API_KEY", "sk-test"),
        ("OPENROUTER_BASE_URL", "https://openrouter.ai/api/v1"),
    ];

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&CREDENTIALS)).unwrap();

        assert_eq!(config.provider.api_key, "sk-test");
        assert_eq!(config.provider.default_model, DEFAULT_MODEL);
        assert_eq!(config.pipeline.model, DEFAULT_MODEL);
        assert_eq!(config.pipeline.completion_timeout, Duration::from_secs(40));
        assert_eq!(config.pipeline.languages, LanguagePair::new("sw", "en"));
        assert_eq!(config.pipeline.default_language.code(), "en");
        assert_eq!(config.pipeline.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(config.pipeline.fallback_reply, DEFAULT_FALLBACK_REPLY);
        assert_eq!(config.database_url, "sqlite://chat_history.db");
        assert_eq!(config.language.timeout_secs, 10);
    }

    #[test]
    fn test_missing_credentials_fail_fast() {
        let result = AppConfig::from_lookup(lookup(&[("OPENROUTER_BASE_URL", "https://x")]));
        assert!(matches!(result, Err(AppError::ConfigError(msg)) if msg.contains("OPENROUTER_API_KEY")));

        let result = AppConfig::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "sk-test"),
            ("OPENROUTER_BASE_URL", "   "),
        ]));
        assert!(matches!(result, Err(AppError::ConfigError(msg)) if msg.contains("OPENROUTER_BASE_URL")));
    }

    #[test]
    fn test_overrides() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.extend([
            ("HAMASA_LOCAL_LANGUAGE", "YO"),
            ("HAMASA_PIVOT_LANGUAGE", "fr"),
            ("HAMASA_COMPLETION_TIMEOUT_SECS", "5"),
            ("HAMASA_FALLBACK_REPLY", "Try later."),
        ]);

        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(config.pipeline.languages.local().code(), "yo");
        assert_eq!(config.pipeline.languages.pivot().code(), "fr");
        assert_eq!(config.provider.timeout_secs, 5);
        assert_eq!(config.pipeline.fallback_reply, "Try later.");
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.push(("HAMASA_COMPLETION_TIMEOUT_SECS", "0"));

        assert!(AppConfig::from_lookup(lookup(&pairs)).is_err());
    }
}
