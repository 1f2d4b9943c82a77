//! Material Advisor - Main Entry Point

use api::{init_logging, run_server, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.logging)?;

    info!("=== Material Advisor v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Suggestion providers configured: {}",
        config.providers.len()
    );

    run_server(config).await?;

    Ok(())
}
