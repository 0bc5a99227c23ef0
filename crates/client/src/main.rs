//! Math RPG terminal client.
//!
//! Composition root: reads configuration from the environment (and `.env`),
//! installs file logging, builds the [`runtime::Runtime`] and hands control to
//! the interactive loop.
//!
//! ```bash
//! PACE_SCALE=0.5 GAME_SESSION_ID=alice ENABLE_PERSISTENCE=1 cargo run -p math-rpg-client
//! EVENT_FORMAT=json cargo run -p math-rpg-client
//! ```

mod app;
mod config;
mod input;
mod logging;
mod presentation;

use anyhow::Result;
use tokio::sync::oneshot;

use runtime::{Runtime, RuntimeConfig};

use crate::config::{ClientConfig, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let runtime_config = RuntimeConfig::from_env();
    let _log_guard = logging::setup_logging(runtime_config.session_id.as_deref())?;
    let client_config = ClientConfig::from_env();

    tracing::info!("Starting Math RPG client");
    tracing::info!("Session slot: {}", runtime_config.slot());
    tracing::info!("Persistence: {}", runtime_config.enable_persistence);
    tracing::info!("Output format: {}", client_config.format);

    let (report_tx, report_rx) = oneshot::channel();
    let runtime = Runtime::builder()
        .config(runtime_config)
        .on_complete(move |report| {
            let _ = report_tx.send(report);
        })
        .build()
        .await?;
    tracing::info!("Runtime built, seed {}", runtime.game_seed());

    if client_config.format == OutputFormat::Text {
        println!("Welcome to Math RPG! Solve problems to strike your foes.");
        println!("{}\n", input::HELP);
    }

    app::run(runtime, client_config, report_rx).await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
