// LLM Adapters
// LLM 提供商的适配器实现

mod openai;

pub use openai::*;
