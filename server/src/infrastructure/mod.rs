// Infrastructure - 进程级基础设施：配置与共享状态

pub mod config;
pub mod state;

pub use config::AppConfig;
pub use state::AppState;
