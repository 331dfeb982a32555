//! Background scheduler for the recurrence engine.
//!
//! Runs a fixed daily tick; daily is the finest frequency a rule supports,
//! so a finer cadence would never find extra work. The engine itself owns
//! no timers and is safe to re-invoke at any time.

use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

use crate::main_lib::AppState;

/// Run interval: 24 hours
const RUN_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Initial delay before the first run (let the server fully start)
const INITIAL_DELAY_SECS: u64 = 30;

/// Starts the background recurrence scheduler.
pub fn start_recurrence_scheduler(state: Arc<AppState>) {
    tokio::spawn(async move {
        info!("Recurrence scheduler started (24-hour interval)");

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        // First tick fires immediately, subsequent ticks are 24h apart
        let mut run_interval = interval(Duration::from_secs(RUN_INTERVAL_SECS));

        loop {
            run_interval.tick().await;
            run_scheduled_materialization(&state).await;
        }
    });
}

/// Runs one engine pass for today's date and logs the outcome.
async fn run_scheduled_materialization(state: &Arc<AppState>) {
    let as_of = chrono::Local::now().date_naive();
    info!("Running scheduled recurrence materialization for {}", as_of);

    match state.recurrence_service.process_due_recurrences(as_of).await {
        Ok(summary) => {
            info!(
                "Recurrence run for {} complete: {} materialized, {} failed",
                summary.as_of,
                summary.processed_count(),
                summary.failed_count()
            );
            for failure in &summary.failed {
                warn!(
                    "Recurrence rule {} failed and remains due: {}",
                    failure.rule_id, failure.error
                );
            }
        }
        Err(e) => {
            // Fatal for this run only; the next tick retries the whole pass.
            warn!("Scheduled recurrence run failed: {}", e);
        }
    }
}
