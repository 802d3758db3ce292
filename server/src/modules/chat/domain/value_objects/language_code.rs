use serde::{Deserialize, Serialize};
use std::fmt;

/// 语言代码
///
/// 值对象：短语言代码（如 "en"、"sw"），创建时统一去空白并转为小写
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_lowercase())
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for LanguageCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// 翻译语言对
///
/// 只有检测结果等于 `local` 时才会在 `local` 与 `pivot` 之间往返翻译，
/// 其他语言原样透传
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    local: LanguageCode,
    pivot: LanguageCode,
}

impl LanguagePair {
    pub fn new(local: impl Into<LanguageCode>, pivot: impl Into<LanguageCode>) -> Self {
        Self {
            local: local.into(),
            pivot: pivot.into(),
        }
    }

    pub fn local(&self) -> &LanguageCode {
        &self.local
    }

    pub fn pivot(&self) -> &LanguageCode {
        &self.pivot
    }

    /// 判断检测到的语言是否需要翻译
    pub fn requires_translation(&self, detected: &LanguageCode) -> bool {
        detected == &self.local && self.local != self.pivot
    }
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self::new("sw", "en")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code_normalized() {
        let code = LanguageCode::new("  SW ");
        assert_eq!(code.code(), "sw");
        assert_eq!(code, LanguageCode::from("sw"));
    }

    #[test]
    fn test_pair_only_local_requires_translation() {
        let pair = LanguagePair::default();

        assert!(pair.requires_translation(&LanguageCode::new("sw")));
        assert!(!pair.requires_translation(&LanguageCode::new("en")));
        assert!(!pair.requires_translation(&LanguageCode::new("fr")));
    }

    #[test]
    fn test_pair_with_identical_codes_never_translates() {
        let pair = LanguagePair::new("en", "en");
        assert!(!pair.requires_translation(&LanguageCode::new("en")));
    }
}
