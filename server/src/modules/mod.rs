// Modules Layer - 业务模块
//
// 按照六边形架构组织的业务模块：
// - chat: 聊天模块，处理语言检测、翻译、补全和记录持久化

pub mod chat;

pub use chat::ChatModule;
