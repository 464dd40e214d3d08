//! Wiring of settings into the concrete card service, probe and orchestrator.

use anyhow::Result;
use tracing::info;

use prestobar_core::{icon, render, HttpCardService, Orchestrator, TcpProbe};

use crate::config::Settings;

/// Run once and return the plugin output for the host
pub async fn run(settings: &Settings) -> Result<String> {
    let icon = icon::load_icon(settings.icon_path().as_deref());
    let run_config = settings.run_config(icon)?;

    let service = HttpCardService::new(&settings.service.base_url, settings.service.timeout());
    let probe = TcpProbe::new(
        settings.connectivity.hosts.clone(),
        settings.connectivity.timeout(),
    );

    let outcome = Orchestrator::new(service, probe, run_config).run().await;
    info!("Run finished: {}", outcome.terminal);

    Ok(render(&outcome.menu))
}
