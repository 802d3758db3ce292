use async_trait::async_trait;
use thiserror::Error;

use super::super::domain::{ChatExchange, ExchangeId};

/// 仓储错误类型
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        RepositoryError::DatabaseError(err.to_string())
    }
}

/// 对话记录仓储端口
///
/// 只追加：记录写入后不会被本系统更新或删除
#[async_trait]
pub trait ExchangeRepository: Send + Sync {
    /// 追加一条记录，返回分配的 ID
    async fn append(&self, exchange: &ChatExchange) -> Result<ExchangeId, RepositoryError>;
}
