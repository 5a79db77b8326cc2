use anyhow::Result;
use pharmaops_server::{create_app, PharmaOpsServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let server = PharmaOpsServer::new().await?;
    let bind_addr = server.config.bind_addr.clone();
    let app = create_app(server);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(%bind_addr, "PharmaOps Engine listening");
    axum::serve(listener, app).await?;

    Ok(())
}
