// Chat Domain - Services
// 领域服务处理不属于任何实体的业务逻辑

mod prompt_builder;

pub use prompt_builder::*;
