use std::collections::BTreeSet;

use agenda_store::OccurrenceStore;
use tracing::debug;

use crate::error::Result;
use crate::DISCOVERY_SCAN_CAP;

/// Distinct series ids with at least one occurrence flagged recurring and
/// a non-empty series id.
///
/// Read-only. The scan is capped at [`DISCOVERY_SCAN_CAP`] rows, so a
/// store holding more qualifying occurrences yields a partial set on any
/// single run. An empty result is a normal outcome meaning the run has
/// nothing to do.
pub fn discover_series(store: &OccurrenceStore) -> Result<BTreeSet<String>> {
    let sample = store.recurring_sample(DISCOVERY_SCAN_CAP)?;
    let series: BTreeSet<String> = sample.into_iter().map(|o| o.series_id).collect();
    debug!(count = series.len(), "recurring series discovered");
    Ok(series)
}
