// Language Adapters
// 语言检测与翻译服务的适配器实现

mod google;

pub use google::*;
