use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::value_objects::{ExchangeId, LanguageCode};

/// 对话记录实体
///
/// 每次处理完的请求对应一条记录。写入后不可变，只提供只读访问。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatExchange {
    /// 存储层分配的 ID（未保存时为空）
    id: Option<ExchangeId>,
    /// 用户原始消息（未修改）
    user_message: String,
    /// 返回给用户的最终回复
    ai_reply: String,
    /// 检测到的语言
    language_detected: LanguageCode,
    /// 创建时间
    created_at: DateTime<Utc>,
}

impl ChatExchange {
    /// 创建新的对话记录（尚未持久化）
    pub fn new(
        user_message: impl Into<String>,
        ai_reply: impl Into<String>,
        language_detected: LanguageCode,
    ) -> Self {
        Self {
            id: None,
            user_message: user_message.into(),
            ai_reply: ai_reply.into(),
            language_detected,
            created_at: Utc::now(),
        }
    }

    /// 从存储中还原
    pub fn restore(
        id: ExchangeId,
        user_message: String,
        ai_reply: String,
        language_detected: LanguageCode,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            user_message,
            ai_reply,
            language_detected,
            created_at,
        }
    }

    /// 绑定存储层分配的 ID，返回新的实例
    pub fn with_id(mut self, id: ExchangeId) -> Self {
        self.id = Some(id);
        self
    }

    // Getters
    pub fn id(&self) -> Option<ExchangeId> {
        self.id
    }

    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    pub fn ai_reply(&self) -> &str {
        &self.ai_reply
    }

    pub fn language_detected(&self) -> &LanguageCode {
        &self.language_detected
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
