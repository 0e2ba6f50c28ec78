use rusqlite::Connection;

use crate::error::Result;

/// Initialise the occurrence schema in `conn`. Safe to call on every
/// startup (idempotent).
///
/// There is deliberately no UNIQUE constraint on `(series_id, date)`: the
/// one-occurrence-per-date invariant belongs to the window maintainer,
/// which re-checks existence immediately before every insert.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS occurrences (
            id               TEXT    NOT NULL PRIMARY KEY,
            series_id        TEXT    NOT NULL DEFAULT '',
            is_recurring     INTEGER NOT NULL DEFAULT 0,
            date             TEXT    NOT NULL,   -- YYYY-MM-DD, local civil date
            window_size      INTEGER NOT NULL DEFAULT 0,
            activity_plan_id TEXT    NOT NULL DEFAULT '',
            activity_title   TEXT    NOT NULL DEFAULT '',
            activity_text    TEXT    NOT NULL DEFAULT '',
            note             TEXT    NOT NULL DEFAULT '',
            detail           TEXT    NOT NULL DEFAULT '{}', -- JSON domain fields
            created_at       TEXT    NOT NULL,
            updated_at       TEXT    NOT NULL
        ) STRICT;

        -- Range, latest and existence lookups all hit (series_id, date).
        CREATE INDEX IF NOT EXISTS idx_occurrences_series_date
            ON occurrences (series_id, date);

        -- Series discovery scans only recurring rows.
        CREATE INDEX IF NOT EXISTS idx_occurrences_recurring
            ON occurrences (is_recurring) WHERE is_recurring = 1;
        ",
    )?;
    Ok(())
}
