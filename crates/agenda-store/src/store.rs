use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::debug;
use uuid::Uuid;

use crate::db::init_db;
use crate::error::Result;
use crate::types::{NewOccurrence, Occurrence};

const OCCURRENCE_COLUMNS: &str = "id, series_id, is_recurring, date, window_size, \
     activity_plan_id, activity_title, activity_text, note, detail, \
     created_at, updated_at";

/// Query and write access to the `occurrences` table.
///
/// Wraps an explicitly passed `Connection` (never ambient global state),
/// so the window job can be exercised against an in-memory database.
pub struct OccurrenceStore {
    conn: Connection,
}

impl OccurrenceStore {
    /// Wrap `conn`, initialising the schema if needed.
    pub fn new(conn: Connection) -> Result<Self> {
        init_db(&conn)?;
        Ok(Self { conn })
    }

    /// A bounded sample of occurrences flagged recurring with a non-empty
    /// series id.
    ///
    /// When more than `cap` rows qualify, only the first `cap` are
    /// returned and discovery sees a subset of series on that run.
    pub fn recurring_sample(&self, cap: u32) -> Result<Vec<Occurrence>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {OCCURRENCE_COLUMNS} FROM occurrences
             WHERE is_recurring = 1 AND series_id <> ''
             LIMIT ?1",
        ))?;
        let rows = stmt.query_map([cap], RawOccurrence::from_row)?;
        collect_occurrences(rows)
    }

    /// All occurrences of `series_id` dated `from` or later, ascending.
    pub fn future_occurrences(&self, series_id: &str, from: NaiveDate) -> Result<Vec<Occurrence>> {
        // TEXT comparison on zero-padded YYYY-MM-DD matches calendar order.
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {OCCURRENCE_COLUMNS} FROM occurrences
             WHERE series_id = ?1 AND date >= ?2
             ORDER BY date ASC",
        ))?;
        let rows = stmt.query_map(
            rusqlite::params![series_id, from.to_string()],
            RawOccurrence::from_row,
        )?;
        collect_occurrences(rows)
    }

    /// The most recent occurrence ever recorded for `series_id` — future
    /// or past — if any.
    pub fn latest_occurrence(&self, series_id: &str) -> Result<Option<Occurrence>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {OCCURRENCE_COLUMNS} FROM occurrences
             WHERE series_id = ?1
             ORDER BY date DESC
             LIMIT 1",
        ))?;
        let mut rows = stmt.query_map([series_id], RawOccurrence::from_row)?;
        match rows.next() {
            Some(raw) => Ok(Some(raw?.into_occurrence()?)),
            None => Ok(None),
        }
    }

    /// Whether `series_id` already has an occurrence on `date`.
    pub fn occurrence_exists(&self, series_id: &str, date: NaiveDate) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM occurrences WHERE series_id = ?1 AND date = ?2)",
            rusqlite::params![series_id, date.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Insert `new` with a freshly assigned UUID v4 and return the id.
    pub fn create_occurrence(&self, new: &NewOccurrence) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let detail = serde_json::to_string(&new.detail)?;
        self.conn.execute(
            "INSERT INTO occurrences
             (id, series_id, is_recurring, date, window_size,
              activity_plan_id, activity_title, activity_text, note, detail,
              created_at, updated_at)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12)",
            rusqlite::params![
                id,
                new.series_id,
                new.is_recurring,
                new.date,
                new.window_size,
                new.activity_plan_id,
                new.activity_title,
                new.activity_text,
                new.note,
                detail,
                new.created_at,
                new.updated_at,
            ],
        )?;
        debug!(occurrence_id = %id, series_id = %new.series_id, date = %new.date, "occurrence created");
        Ok(id)
    }
}

/// Row image with `detail` still as its JSON string; the serde step is
/// kept out of the rusqlite mapping closure so its errors surface as
/// [`crate::StoreError::Detail`] instead of being swallowed.
struct RawOccurrence {
    id: String,
    series_id: String,
    is_recurring: bool,
    date: String,
    window_size: u32,
    activity_plan_id: String,
    activity_title: String,
    activity_text: String,
    note: String,
    detail: String,
    created_at: String,
    updated_at: String,
}

impl RawOccurrence {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            series_id: row.get(1)?,
            is_recurring: row.get(2)?,
            date: row.get(3)?,
            window_size: row.get(4)?,
            activity_plan_id: row.get(5)?,
            activity_title: row.get(6)?,
            activity_text: row.get(7)?,
            note: row.get(8)?,
            detail: row.get(9)?,
            created_at: row.get(10)?,
            updated_at: row.get(11)?,
        })
    }

    fn into_occurrence(self) -> Result<Occurrence> {
        let detail = serde_json::from_str(&self.detail)?;
        Ok(Occurrence {
            id: self.id,
            series_id: self.series_id,
            is_recurring: self.is_recurring,
            date: self.date,
            window_size: self.window_size,
            activity_plan_id: self.activity_plan_id,
            activity_title: self.activity_title,
            activity_text: self.activity_text,
            note: self.note,
            detail,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn collect_occurrences<I>(rows: I) -> Result<Vec<Occurrence>>
where
    I: Iterator<Item = rusqlite::Result<RawOccurrence>>,
{
    let mut out = Vec::new();
    for raw in rows {
        out.push(raw?.into_occurrence()?);
    }
    Ok(out)
}
