// SQLite 对话记录仓储实现
//
// 使用 sqlx 连接池：每次写入从池中取出连接，查询结束即归还。
// 首次连接时自动创建数据库文件和 chats 表。

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::debug;

use crate::modules::chat::domain::{ChatExchange, ExchangeId, LanguageCode};
use crate::modules::chat::ports::{ExchangeRepository, RepositoryError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS chats (\
     id INTEGER PRIMARY KEY AUTOINCREMENT, \
     user_message TEXT NOT NULL, \
     ai_reply TEXT NOT NULL, \
     language_detected VARCHAR(10) NOT NULL, \
     created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP)";

/// 连接池配置
///
/// 内存数据库只存在于单个连接中：限制为一个连接，且连接永不回收
fn pool_options(url: &str) -> SqlitePoolOptions {
    if url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    }
}

/// 解析 created_at：应用写入 RFC 3339，表默认值 CURRENT_TIMESTAMP 为 "YYYY-MM-DD HH:MM:SS"（UTC）
fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            RepositoryError::SerializationError(format!("invalid created_at '{}': {}", raw, e))
        })
}

/// SQLite 对话记录仓储
#[derive(Clone, Debug)]
pub struct SqliteExchangeRepository {
    pool: SqlitePool,
}

impl SqliteExchangeRepository {
    /// 打开（或创建）数据库并确保表结构存在
    ///
    /// # Arguments
    /// * `url` - sqlx SQLite URL，如 `sqlite://chat_history.db` 或 `sqlite::memory:`
    pub async fn connect(url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = pool_options(url).connect_with(options).await?;

        sqlx::query(SCHEMA).execute(&pool).await?;
        debug!("SQLite schema ready at {}", url);

        Ok(Self { pool })
    }

    /// 最近的记录（最新在前）
    pub async fn recent(&self, limit: u32) -> Result<Vec<ChatExchange>, RepositoryError> {
        let rows: Vec<(i64, String, String, String, String)> = sqlx::query_as(
            "SELECT id, user_message, ai_reply, language_detected, created_at \
             FROM chats ORDER BY id DESC LIMIT ?1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(id, user_message, ai_reply, language, created_at)| {
                Ok(ChatExchange::restore(
                    ExchangeId::new(id),
                    user_message,
                    ai_reply,
                    LanguageCode::new(language),
                    parse_created_at(&created_at)?,
                ))
            })
            .collect()
    }

    /// 记录总数
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chats")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    /// 关闭连接池
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ExchangeRepository for SqliteExchangeRepository {
    async fn append(&self, exchange: &ChatExchange) -> Result<ExchangeId, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO chats (user_message, ai_reply, language_detected, created_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(exchange.user_message())
        .bind(exchange.ai_reply())
        .bind(exchange.language_detected().code())
        .bind(exchange.created_at().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(ExchangeId::new(result.last_insert_rowid()))
    }
}
