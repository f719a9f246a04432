//! Rollkeeper - Binary Entry Point
//!
//! Serves the chat gateway bridge on stdio and the keep-alive endpoint on
//! `KEEPALIVE_ADDR`.

use std::sync::Arc;

use rollkeeper::api::http::create_router;
use rollkeeper::bot::BotState;
use rollkeeper::commands::CommandRouter;
use rollkeeper::config::BotConfig;
use rollkeeper::server::BridgeServer;
use rollkeeper::types::BotResult;

#[tokio::main]
async fn main() -> BotResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = BotConfig::from_env()?;
    let backend = config.build_backend()?;
    log::info!(
        "{} {} starting with {} backend",
        rollkeeper::NAME,
        rollkeeper::VERSION,
        backend.name()
    );

    let state = Arc::new(BotState::new(&config, backend));
    log::info!("instance id {}", state.instance_id());

    let listener = tokio::net::TcpListener::bind(config.keepalive_addr).await?;
    log::info!("keep-alive listening on {}", config.keepalive_addr);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, create_router()).await {
            log::error!("keep-alive server stopped: {}", e);
        }
    });

    let server = BridgeServer::new(CommandRouter::with_all_commands(state));
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    server.run(stdin, tokio::io::stdout()).await
}
