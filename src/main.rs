//! Firefighter Gear Inventory - draft submitter
//!
//! Replays a saved form draft through the form editors and submits it.
//!
//! Usage: `firegear-inventory <draft.json>`

use anyhow::Context;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use firegear_inventory::{config::AppConfig, draft::FormDraft, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("firegear_inventory={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Firegear Inventory v{}", env!("CARGO_PKG_VERSION"));

    let draft_path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("Usage: firegear-inventory <draft.json>")?;

    if !config.storage.backend.is_persistent() {
        tracing::warn!(
            "Storage backend is in-memory: the submitted inventory and photos are lost when this process exits. \
             Set storage.backend = \"http\" (or FIREGEAR__STORAGE__BACKEND=http) to write to the remote stores"
        );
    }

    let services = Services::from_config(&config);
    let state = AppState::new(config, services);

    let draft = FormDraft::load(&draft_path).await?;
    let form = state.open_form();
    form.edit(|session| draft.apply(session))?;

    let receipt = match form.submit().await {
        Ok(receipt) => receipt,
        Err(e) => {
            if let Some(message) = form.status().message() {
                eprintln!("{}", message);
            }
            return Err(e.into());
        }
    };

    if let Some(message) = form.status().message() {
        println!("{}", message);
    }

    // Let the form clear itself before exiting
    receipt.reset.await?;
    tracing::info!(document_id = %receipt.document_id, "Done");

    Ok(())
}
