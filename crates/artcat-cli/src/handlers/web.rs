//! Web command handler.

use anyhow::Result;

use artcat_axum::{ServerConfig, start_server};

use crate::bootstrap::CliConfig;

/// Build the server configuration for `artcat web`.
pub fn server_config(
    config: CliConfig,
    port: u16,
    no_reconcile: bool,
    allow_origins: Vec<String>,
) -> ServerConfig {
    let mut server = ServerConfig {
        port,
        data_dir: config.data_dir,
        settings: config.settings,
        reconcile_on_start: !no_reconcile,
        ..ServerConfig::with_defaults()
    };
    server.settings.port = Some(port);
    if !allow_origins.is_empty() {
        server = server.with_allowed_origins(allow_origins);
    }
    server
}

/// Execute the web command. Runs until the server stops.
pub async fn execute(server: ServerConfig) -> Result<()> {
    start_server(server).await
}
