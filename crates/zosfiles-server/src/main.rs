//! zosfiles Server - Main entry point

use anyhow::Result;
use tracing::info;
use zosfiles_common::logging::{init_logging, LogConfig};

use zosfiles_server::{api, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment variables take precedence over the built-in defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("zosfiles-server")
        .filter_directives("zosfiles_server=debug,tower_http=debug,reqwest=info")
        .build()
        .merge_env()?;

    init_logging(&log_config)?;

    info!("Starting zosfiles server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    api::serve(config).await
}
