pub mod api;
pub mod core;
pub mod desk;
pub mod providers;

use anyhow::Result;
use tracing::{debug, info};

pub use crate::core::config;

/// Loads the config and serves until interrupted. `bind` overrides the
/// configured listen address.
pub async fn run_server(config_path: Option<&str>, bind: Option<&str>) -> Result<()> {
    info!("Trade server starting...");

    let mut config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    if let Some(bind) = bind {
        config.server.bind = bind.to_string();
    }
    debug!("Loaded config: {config:#?}");

    api::serve(&config).await
}
