// Chat Ports Layer
// 端口定义了模块与外部世界的接口

mod exchange_repository;
mod language_port;
mod llm_port;

pub use exchange_repository::*;
pub use language_port::*;
pub use llm_port::*;
