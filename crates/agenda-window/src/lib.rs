//! `agenda-window` — recurring-series window maintainer.
//!
//! # Overview
//!
//! Each run scans the occurrence store for series flagged recurring and
//! tops every one of them up to [`TARGET_WINDOW`] future occurrences,
//! cloning the series' latest occurrence forward in exact 7-day steps.
//! Runs hold no state between invocations — everything is recomputed from
//! the store — and an existence check immediately before every insert
//! keeps repeated runs from duplicating a date.
//!
//! # Per-series outcomes
//!
//! | Outcome          | Meaning                                            |
//! |------------------|----------------------------------------------------|
//! | `Full`           | Window already holds enough future occurrences     |
//! | `Replenished`    | Missing occurrences were generated                 |
//! | `NoTemplate`     | Series has no occurrence to clone from (anomaly)   |
//! | `MalformedDate`  | Template date is not `YYYY-MM-DD` (data defect)    |
//!
//! Series are independent: a failure in one is logged and counted, never
//! allowed to stop the remaining series. Only a discovery failure aborts
//! a run; the next scheduled run is the retry mechanism.

pub mod discover;
pub mod error;
pub mod generate;
pub mod replenish;

pub use discover::discover_series;
pub use error::{Result, WindowError};
pub use generate::generated_fields;
pub use replenish::{replenish_series, run_window_job, RunSummary, SeriesOutcome};

/// Number of future occurrences every recurring series is kept topped up to.
pub const TARGET_WINDOW: u32 = 5;

/// Generated occurrences advance in exact one-week steps, regardless of
/// month boundaries or leap years.
pub const STEP_DAYS: i64 = 7;

/// Upper bound on rows scanned by series discovery. When more rows
/// qualify, a run discovers only the sampled subset of series.
pub const DISCOVERY_SCAN_CAP: u32 = 500;
