// Chat Infrastructure - Repositories
//
// 仓储实现：
// - InMemoryExchangeRepository: 内存仓储，用于开发和测试
// - SqliteExchangeRepository: SQLite 持久化仓储，用于生产环境

mod in_memory_exchange_repository;
mod sqlite_exchange_repository;

pub use in_memory_exchange_repository::*;
pub use sqlite_exchange_repository::*;
