use mesa_server::{Config, Server, ServerState, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv + logging)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    mesa_server::init_logger_with_file(
        Some(&config.log_level),
        config.log_dir.as_deref(),
    );

    print_banner();
    tracing::info!("Mesa server starting...");

    // 2. Initialize server state (database, feed, coordinator)
    let state = ServerState::initialize(&config).await;

    // 3. Run the HTTP server until shutdown
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
