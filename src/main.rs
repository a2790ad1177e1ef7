use anyhow::Context;
use dotenvy::dotenv;
use registrar::logging::init_tracing;
use registrar::router::init_router;
use registrar::state::init_app_state;
use registrar_config::{LoggingConfig, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing(&LoggingConfig::from_env())?;

    let server_config = ServerConfig::from_env();
    let state = init_app_state(&server_config).await?;
    let app = init_router(state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, storage = ?server_config.storage, "Server running");
    info!("OpenAPI document available at /api-docs/openapi.json");

    axum::serve(listener, app).await?;

    Ok(())
}
