use agenda_store::OccurrenceStore;
use chrono::{Duration, NaiveDate, Utc};
use tracing::{debug, error, info, warn};

use crate::discover::discover_series;
use crate::error::Result;
use crate::generate::generated_fields;
use crate::{STEP_DAYS, TARGET_WINDOW};

/// What happened to a single series during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesOutcome {
    /// The series already had a full window; nothing was created.
    Full,
    /// `created` occurrences were written; `collided` cursor dates were
    /// skipped because an occurrence already existed there.
    Replenished { created: u32, collided: u32 },
    /// The series has no occurrences at all — nothing to clone from.
    NoTemplate,
    /// The template's date did not parse as `YYYY-MM-DD`.
    MalformedDate,
}

/// Totals for one job invocation, for the run log line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub series_seen: u32,
    pub created: u32,
    pub collided: u32,
    pub skipped_no_template: u32,
    pub skipped_malformed_date: u32,
    pub failed: u32,
}

/// Top up a single series to [`TARGET_WINDOW`] future occurrences.
///
/// Counts occurrences dated `today` or later; when short, clones the
/// series' latest occurrence forward in exact [`STEP_DAYS`]-day steps
/// (first candidate is template date + 7), re-checking existence
/// immediately before each insert so repeated runs never duplicate a
/// date.
///
/// The loop runs exactly `deficit` times: a cursor date that is already
/// occupied (only possible when an overlapping invocation wrote it first,
/// since the template is the series' maximum date) consumes an iteration
/// without creating. A run can therefore leave a series short of the
/// target; the next run picks up the shortfall.
pub fn replenish_series(
    store: &OccurrenceStore,
    series_id: &str,
    today: NaiveDate,
) -> Result<SeriesOutcome> {
    let have = store.future_occurrences(series_id, today)?.len() as u32;
    if have >= TARGET_WINDOW {
        debug!(series_id, have, "window already full");
        return Ok(SeriesOutcome::Full);
    }

    let Some(template) = store.latest_occurrence(series_id)? else {
        // A recurring series should always have at least one historical
        // occurrence; surfaced here, owned upstream.
        warn!(series_id, "recurring series has no occurrence to clone from");
        return Ok(SeriesOutcome::NoTemplate);
    };

    let Ok(mut cursor) = NaiveDate::parse_from_str(&template.date, "%Y-%m-%d") else {
        warn!(series_id, date = %template.date, "template date is not YYYY-MM-DD");
        return Ok(SeriesOutcome::MalformedDate);
    };

    let deficit = TARGET_WINDOW - have;
    let mut created = 0u32;
    let mut collided = 0u32;
    for _ in 0..deficit {
        cursor += Duration::days(STEP_DAYS);
        if store.occurrence_exists(series_id, cursor)? {
            debug!(series_id, date = %cursor, "occurrence already present, skipping");
            collided += 1;
            continue;
        }
        let fields = generated_fields(&template, cursor, TARGET_WINDOW, Utc::now());
        let id = store.create_occurrence(&fields)?;
        debug!(series_id, date = %cursor, occurrence_id = %id, "occurrence generated");
        created += 1;
    }

    Ok(SeriesOutcome::Replenished { created, collided })
}

/// One full invocation: discover recurring series, then replenish each
/// one independently and sequentially.
///
/// A failure inside one series is logged and counted but never stops the
/// remaining series. A discovery failure aborts the run; the next
/// scheduled invocation is the retry mechanism.
pub fn run_window_job(store: &OccurrenceStore, today: NaiveDate) -> Result<RunSummary> {
    let series = discover_series(store)?;
    let mut summary = RunSummary::default();
    if series.is_empty() {
        info!("no recurring series found; nothing to replenish");
        return Ok(summary);
    }

    for series_id in &series {
        summary.series_seen += 1;
        match replenish_series(store, series_id, today) {
            Ok(SeriesOutcome::Full) => {}
            Ok(SeriesOutcome::Replenished { created, collided }) => {
                summary.created += created;
                summary.collided += collided;
            }
            Ok(SeriesOutcome::NoTemplate) => summary.skipped_no_template += 1,
            Ok(SeriesOutcome::MalformedDate) => summary.skipped_malformed_date += 1,
            Err(e) => {
                error!(series_id = %series_id, "series replenishment failed: {e}");
                summary.failed += 1;
            }
        }
    }

    info!(
        series = summary.series_seen,
        created = summary.created,
        collided = summary.collided,
        skipped_no_template = summary.skipped_no_template,
        skipped_malformed_date = summary.skipped_malformed_date,
        failed = summary.failed,
        "window maintenance run complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use agenda_store::NewOccurrence;
    use rusqlite::Connection;

    use super::*;

    fn store() -> OccurrenceStore {
        OccurrenceStore::new(Connection::open_in_memory().unwrap()).unwrap()
    }

    fn seed(store: &OccurrenceStore, series_id: &str, date: &str) {
        store
            .create_occurrence(&NewOccurrence {
                series_id: series_id.to_string(),
                is_recurring: true,
                date: date.to_string(),
                window_size: 0,
                activity_plan_id: String::new(),
                activity_title: String::new(),
                activity_text: String::new(),
                note: String::new(),
                detail: serde_json::Map::new(),
                created_at: "2025-01-01T00:00:00+00:00".to_string(),
                updated_at: "2025-01-01T00:00:00+00:00".to_string(),
            })
            .unwrap();
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn full_window_needs_nothing() {
        let store = store();
        for d in ["2025-01-12", "2025-01-19", "2025-01-26", "2025-02-02", "2025-02-09"] {
            seed(&store, "y", d);
        }
        let outcome = replenish_series(&store, "y", day("2025-01-10")).unwrap();
        assert_eq!(outcome, SeriesOutcome::Full);
    }

    #[test]
    fn unknown_series_has_no_template() {
        let store = store();
        let outcome = replenish_series(&store, "ghost", day("2025-01-10")).unwrap();
        assert_eq!(outcome, SeriesOutcome::NoTemplate);
    }

    #[test]
    fn malformed_template_date_is_skipped() {
        let store = store();
        seed(&store, "z", "2025-13-40");
        let outcome = replenish_series(&store, "z", day("2025-01-10")).unwrap();
        assert_eq!(outcome, SeriesOutcome::MalformedDate);
        // Nothing was created; only the malformed row itself is there.
        let rows = store.future_occurrences("z", day("2025-01-01")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "2025-13-40");
    }

    #[test]
    fn cadence_runs_from_template_not_today() {
        let store = store();
        // The cursor advances from the latest occurrence, so a stale
        // series resumes its own weekly alignment rather than today's.
        seed(&store, "x", "2025-01-05");
        let today = day("2025-01-10");
        let outcome = replenish_series(&store, "x", today).unwrap();
        assert_eq!(outcome, SeriesOutcome::Replenished { created: 5, collided: 0 });
        let dates: Vec<String> = store
            .future_occurrences("x", today)
            .unwrap()
            .into_iter()
            .map(|o| o.date)
            .collect();
        assert_eq!(
            dates,
            ["2025-01-12", "2025-01-19", "2025-01-26", "2025-02-02", "2025-02-09"]
        );
    }

    #[test]
    fn deficit_counts_only_future_occurrences() {
        let store = store();
        // Three past rows and two future rows: have = 2, so exactly three
        // new dates are generated past the latest one.
        for d in ["2024-12-22", "2024-12-29", "2025-01-05", "2025-01-12", "2025-01-19"] {
            seed(&store, "x", d);
        }
        let today = day("2025-01-10");
        let outcome = replenish_series(&store, "x", today).unwrap();
        assert_eq!(outcome, SeriesOutcome::Replenished { created: 3, collided: 0 });
        assert_eq!(store.future_occurrences("x", today).unwrap().len(), 5);
    }

    #[test]
    fn template_may_be_a_future_occurrence() {
        let store = store();
        seed(&store, "x", "2025-01-15");
        seed(&store, "x", "2025-01-22");
        let today = day("2025-01-10");
        let outcome = replenish_series(&store, "x", today).unwrap();
        assert_eq!(outcome, SeriesOutcome::Replenished { created: 3, collided: 0 });
        let dates: Vec<String> = store
            .future_occurrences("x", today)
            .unwrap()
            .into_iter()
            .map(|o| o.date)
            .collect();
        assert_eq!(
            dates,
            ["2025-01-15", "2025-01-22", "2025-01-29", "2025-02-05", "2025-02-12"]
        );
    }

    #[test]
    fn bad_series_does_not_stop_the_run() {
        let store = store();
        seed(&store, "a-bad", "not-a-date");
        seed(&store, "b-good", "2025-01-05");
        let summary = run_window_job(&store, day("2025-01-10")).unwrap();
        assert_eq!(summary.series_seen, 2);
        assert_eq!(summary.skipped_malformed_date, 1);
        assert_eq!(summary.created, 5);
        assert_eq!(
            store.future_occurrences("b-good", day("2025-01-10")).unwrap().len(),
            5
        );
    }
}
