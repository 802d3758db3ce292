// Chat Application Layer - 应用层
// 命令处理器负责编排领域对象和端口

pub mod commands;

pub use commands::*;

use async_trait::async_trait;

/// 命令处理器 trait
///
/// 命令处理器负责执行有副作用的操作
#[async_trait]
pub trait CommandHandler<C, R>: Send + Sync
where
    C: Send + Sync,
{
    /// 执行命令
    async fn handle(&self, command: C) -> R;
}
