use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use slidecraft::ai::SlideGenerator;
use slidecraft::auth::token::TokenKeys;
use slidecraft::config::{Cli, Config};
use slidecraft::db;
use slidecraft::routes;
use slidecraft::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let data_dir = Config::data_dir(&cli);
    std::fs::create_dir_all(&data_dir)?;
    tracing::info!("Data directory: {}", data_dir.display());

    let config = Config::load(&cli)?;

    // Initialize database
    let pool = db::create_pool(config.db_path())?;
    db::run_migrations(&pool)?;

    // Token keys and AI providers
    let token_keys = TokenKeys::new(&config.token_secret(), config.auth.token_ttl_hours);
    let generator = SlideGenerator::from_config(&config.ai);

    let state = AppState {
        db: pool,
        config: config.clone(),
        generator: Arc::new(generator),
        token_keys: Arc::new(token_keys),
    };

    let app = routes::app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
