//! # Redwire
//!
//! Headless driver: loads the world configuration, builds the world and
//! ticks it until interrupted.
//!
//! Usage: `redwire [CONFIG]` runs the world described by `CONFIG` (default
//! `redwire_config.json5`, created when missing). `redwire --dump-tiles`
//! prints the tile registry as JSON and exits.

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use redwire_core::WorldConfig;
use redwire_registry::TileRegistry;
use tokio::signal;

use crate::server::RedwireServer;

mod logger;
mod server;

const DEFAULT_CONFIG_PATH: &str = "redwire_config.json5";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let arg = env::args().nth(1);
    if arg.as_deref() == Some("--dump-tiles") {
        let json = TileRegistry::vanilla()
            .dump_json()
            .context("failed to serialise the tile registry")?;
        println!("{json}");
        return Ok(());
    }

    logger::init()?;

    let path = arg.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = WorldConfig::load_or_create(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let mut server = RedwireServer::new(&config);

    let cancel_token = server.cancel_token.clone();
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            log::warn!("Failed to listen for ctrl-c: {e}");
            return;
        }
        log::info!("Shutting down");
        cancel_token.cancel();
    });

    let ticks = server.run().await;
    log::info!(
        "Stopped after {ticks} ticks, {} block update(s) flushed, {} scheduled update(s) left",
        server.block_updates(),
        server.level().scheduled().len()
    );
    Ok(())
}
