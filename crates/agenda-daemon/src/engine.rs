use agenda_core::config::TriggerConfig;
use agenda_store::OccurrenceStore;
use agenda_window::run_window_job;
use chrono::Local;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::schedule::next_weekly_run;

/// Drives the weekly maintenance runs.
///
/// Sleeps until the configured local weekday/time, fires the window job
/// with that day's local date, then reschedules. A failed run is logged
/// and dropped — the job is idempotent, so the next weekly run simply
/// picks up where the window was left short.
pub struct TriggerEngine {
    store: OccurrenceStore,
    trigger: TriggerConfig,
}

impl TriggerEngine {
    pub fn new(store: OccurrenceStore, trigger: TriggerConfig) -> Self {
        Self { store, trigger }
    }

    /// Main loop. Runs until `shutdown` broadcasts `true`.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            weekday = self.trigger.weekday,
            hour = self.trigger.hour,
            minute = self.trigger.minute,
            "trigger engine started"
        );

        loop {
            let now = Local::now();
            let Some(next) = next_weekly_run(
                self.trigger.weekday,
                self.trigger.hour,
                self.trigger.minute,
                now,
            ) else {
                // The target wall-clock time falls into a DST gap this
                // week; try again in an hour.
                warn!("next trigger time is unmappable; retrying in an hour");
                if wait_or_shutdown(std::time::Duration::from_secs(3600), &mut shutdown).await {
                    break;
                }
                continue;
            };

            let wait = (next - now).to_std().unwrap_or_default();
            info!(next = %next, "next maintenance run scheduled");
            if wait_or_shutdown(wait, &mut shutdown).await {
                break;
            }

            let today = Local::now().date_naive();
            match run_window_job(&self.store, today) {
                Ok(summary) => info!(
                    series = summary.series_seen,
                    created = summary.created,
                    failed = summary.failed,
                    "maintenance run finished"
                ),
                Err(e) => error!("maintenance run failed: {e}"),
            }
        }

        info!("trigger engine shut down");
    }
}

/// Sleep for `wait` unless shutdown arrives first. Returns `true` when
/// shutdown was signalled.
async fn wait_or_shutdown(wait: std::time::Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(wait) => false,
        _ = shutdown.changed() => *shutdown.borrow(),
    }
}
