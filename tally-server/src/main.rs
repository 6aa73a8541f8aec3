use tally_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Set up environment (dotenv, logging)
    setup_environment();

    print_banner();

    tracing::info!("Tally server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize server state (data dir, event store)
    let state = ServerState::initialize(&config);

    // 4. Run the HTTP server (spawns background workers)
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
