use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::modules::chat::domain::{ChatExchange, ExchangeId};
use crate::modules::chat::ports::{ExchangeRepository, RepositoryError};

/// 内存对话记录仓储
///
/// 用于开发和测试，ID 从 1 开始单调递增
pub struct InMemoryExchangeRepository {
    exchanges: RwLock<Vec<ChatExchange>>,
}

impl InMemoryExchangeRepository {
    pub fn new() -> Self {
        Self {
            exchanges: RwLock::new(Vec::new()),
        }
    }

    /// 按写入顺序返回所有记录
    pub async fn all(&self) -> Vec<ChatExchange> {
        self.exchanges.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.exchanges.read().await.len()
    }
}

impl Default for InMemoryExchangeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExchangeRepository for InMemoryExchangeRepository {
    async fn append(&self, exchange: &ChatExchange) -> Result<ExchangeId, RepositoryError> {
        let mut exchanges = self.exchanges.write().await;
        let id = ExchangeId::new(exchanges.len() as i64 + 1);
        exchanges.push(exchange.clone().with_id(id));
        Ok(id)
    }
}
