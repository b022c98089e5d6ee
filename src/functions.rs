// Standard library
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

// 3rd party crates
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

// Project imports
use crate::apply::{apply, load_state, save_state, ApplyError, ApplySummary, ResourceConfig};
use crate::nios::{Wapi, WapiClient};
use crate::settings::types::ConfigManager;

/// Main application loop.
///
/// With an update interval of 0 a single pass is applied and its outcome
/// returned. Otherwise passes repeat every interval until a shutdown signal
/// arrives.
pub async fn run(
    config: Arc<ConfigManager>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), Box<dyn Error>> {
    let settings = config.get_settings().await;
    let update_interval: u64 = settings.update.interval;
    let client = WapiClient::new(&settings.nios)?;
    let resources: Vec<ResourceConfig> = settings.resources.clone();
    info!(
        host = %settings.nios.host,
        wapi_version = %settings.nios.wapi_version,
        resources = resources.len(),
        "Connecting to grid master"
    );

    // Drop the settings lock
    drop(settings);

    let state_path = config.get_state_path().await;
    debug!(path = ?state_path, "Using state file");

    if update_interval == 0 {
        let summary = apply_pass(&client, &resources, &state_path).await?;
        if summary.has_errors() {
            return Err(format!("{} resource(s) failed to apply", summary.failed).into());
        }
        return Ok(());
    }

    info!("Applying records every {} seconds", update_interval);

    loop {
        if let Err(e) = apply_pass(&client, &resources, &state_path).await {
            error!("Apply pass failed: {}", e);
        }

        tokio::select! {
            // Handle shutdown signal
            Ok(_) = shutdown_rx.recv() => {
                info!("Received shutdown signal, stopping");
                break;
            }

            // Wait for the update interval
            _ = tokio::time::sleep(Duration::from_secs(update_interval)) => {
                debug!("Starting apply pass");
            }
        }
    }

    Ok(())
}

/// Loads state, applies every resource and stores the new state.
async fn apply_pass<C: Wapi>(
    client: &C,
    resources: &[ResourceConfig],
    state_path: &Path,
) -> Result<ApplySummary, ApplyError> {
    let mut state = load_state(state_path).await?;
    let summary = apply(client, resources, &mut state).await;
    save_state(state_path, &state).await?;

    let message = "Apply pass finished";
    if summary.has_errors() {
        warn!(
            created = summary.created,
            imported = summary.imported,
            updated = summary.updated,
            replaced = summary.replaced,
            deleted = summary.deleted,
            unchanged = summary.unchanged,
            failed = summary.failed,
            "{}",
            message
        );
    } else {
        info!(
            changes = summary.changes(),
            created = summary.created,
            imported = summary.imported,
            updated = summary.updated,
            replaced = summary.replaced,
            deleted = summary.deleted,
            unchanged = summary.unchanged,
            "{}",
            message
        );
    }

    Ok(summary)
}
