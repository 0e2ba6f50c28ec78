use thiserror::Error;

/// Errors that can occur within the window-maintenance job.
///
/// Skip conditions (series with no occurrences, malformed template date)
/// are not errors; they are reported as
/// [`crate::replenish::SeriesOutcome`] variants and logged.
#[derive(Debug, Error)]
pub enum WindowError {
    /// Occurrence store read or write failed.
    #[error("Store error: {0}")]
    Store(#[from] agenda_store::StoreError),
}

pub type Result<T> = std::result::Result<T, WindowError>;
