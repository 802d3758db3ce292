/// 提示词构建器
///
/// 领域服务：把系统提示词和用户文本组装成 LLM 请求消息。
/// 不保留多轮历史，每次请求都是独立的单轮对话。
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    /// 系统提示词
    system_prompt: String,
}

impl PromptBuilder {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
        }
    }

    /// 构建消息列表
    ///
    /// 系统提示词为空时省略 system 消息
    pub fn build(&self, user_text: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);

        if !self.system_prompt.trim().is_empty() {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: self.system_prompt.clone(),
            });
        }

        messages.push(ChatMessage {
            role: "user".to_string(),
            content: user_text.to_string(),
        });

        messages
    }
}

/// LLM 请求消息格式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_system_prompt() {
        let builder = PromptBuilder::new("You are a helpful assistant.");
        let messages = builder.build("Hello");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "Hello");
    }

    #[test]
    fn test_blank_system_prompt_is_omitted() {
        let builder = PromptBuilder::new("   ");
        let messages = builder.build("Hello");

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
    }
}
