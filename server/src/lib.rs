pub mod api;
pub mod infrastructure;
pub mod modules;
pub mod shared;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use infrastructure::{AppConfig, AppState};
use modules::ChatModule;
use shared::{AppError, AppResult};

/// 启动 HTTP 服务，直到收到终止信号
pub async fn run() -> AppResult<()> {
    // 先加载 .env，日志过滤也可以写在其中
    let dotenv = dotenvy::dotenv();
    init_tracing();
    if let Some(e) = dotenv_failure(dotenv) {
        tracing::warn!("Failed to load .env: {}", e);
    }

    let config = AppConfig::from_env()?;

    tracing::info!("Hamasa starting...");
    tracing::info!(
        model = %config.pipeline.model,
        local = %config.pipeline.languages.local(),
        pivot = %config.pipeline.languages.pivot(),
        "Pipeline configured"
    );

    let chat_module = ChatModule::new_with_persistence(
        &config.database_url,
        config.provider.clone(),
        config.language.clone(),
        config.pipeline.clone(),
    )
    .await?;
    tracing::info!("Chat module initialized with {}", config.database_url);

    let listener = TcpListener::bind(&config.bind_address).await?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| AppError::ServerError(e.to_string()))?;
    tracing::info!("Listening on http://{}", local_addr);

    let app = api::router(AppState::new(chat_module));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::ServerError(e.to_string()))?;

    tracing::info!("Hamasa stopped");
    Ok(())
}

/// .env 不存在不算错误，格式错误等其他失败需要上报
fn dotenv_failure<T>(result: Result<T, dotenvy::Error>) -> Option<dotenvy::Error> {
    match result {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    }
}

/// 日志过滤：RUST_LOG 优先，其次 HAMASA_LOG，默认 info
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("HAMASA_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_dotenv_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let result = dotenvy::from_path(temp_dir.path().join(".env"));

        assert!(dotenv_failure(result).is_none());
    }

    #[test]
    fn test_malformed_dotenv_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        std::fs::write(&path, "this line has no equals sign\n").unwrap();

        let result = dotenvy::from_path(&path);

        assert!(dotenv_failure(result).is_some());
    }
}
