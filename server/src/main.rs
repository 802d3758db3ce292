#[tokio::main]
async fn main() {
    if let Err(e) = hamasa_lib::run().await {
        tracing::error!("Hamasa failed to start: {}", e);
        eprintln!("hamasa: {}", e);
        std::process::exit(1);
    }
}
