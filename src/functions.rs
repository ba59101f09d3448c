// Standard library
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

// 3rd party crates
use tokio::sync::broadcast;
use tracing::{debug, error, info};

// Project imports
use crate::providers::lunarcrush::functions::process_symbols;
use crate::providers::lunarcrush::types::LunarCrush;
use crate::settings::types::ConfigManager;
use crate::utility::throttle::types::RequestThrottle;

/// Main application loop that refreshes analyses on an interval.
///
/// This function:
/// - Builds the request throttle once and hands it to every provider, so
///   all outbound calls share one coalescing and spacing domain
/// - Refreshes the analysis for every configured symbol each cycle
/// - Respects the configured update interval
/// - Implements graceful shutdown on signal
pub async fn run(
    config: Arc<ConfigManager>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), Box<dyn Error>> {
    let settings = config.settings.read().await;
    let update_interval: u64 = settings.update.interval;
    info!("🕰️ Refreshing analyses every {} seconds", update_interval);

    let throttle = RequestThrottle::new(settings.throttle.clone());
    let sweeper = throttle.spawn_sweeper();

    let lunarcrush = LunarCrush::new(settings.lunarcrush.clone(), throttle)?;

    // Drop the settings lock
    drop(settings);

    // Run the first refresh immediately
    refresh_cycle(&lunarcrush).await;

    loop {
        tokio::select! {
            // Handle shutdown signal
            Ok(_) = shutdown_rx.recv() => {
                info!("Received shutdown signal, waiting for in-progress requests...");
                // Allow a short time for in-progress requests to complete
                tokio::time::sleep(Duration::from_secs(5)).await;
                break;
            }

            // Wait for the update interval
            _ = tokio::time::sleep(Duration::from_secs(update_interval)) => {
                refresh_cycle(&lunarcrush).await;
            }
        }
    }

    sweeper.abort();
    info!("Shutdown complete.");
    Ok(())
}

/// Performs a single refresh cycle across all configured symbols.
async fn refresh_cycle(lunarcrush: &LunarCrush) {
    debug!("Starting analysis refresh cycle");

    if let Err(e) = process_symbols(lunarcrush).await {
        error!("Error refreshing analyses: {}", e);
    }

    let status = lunarcrush.throttle.status().await;
    debug!(
        pending = status.pending_requests.len(),
        endpoints = status.last_request_age_ms.len(),
        "Throttle status after cycle"
    );
}
