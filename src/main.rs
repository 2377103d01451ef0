use accounts_core::{config::Config, server, telemetry};
use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Accounts Core Service");
    info!("HTTP server listening on {}", config.http_addr());

    server::run(config).await
}
