use serde::{Deserialize, Serialize};

/// A scheduled class instance as stored in the `occurrences` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Occurrence {
    /// UUID v4 string — primary key, assigned by the store on create.
    pub id: String,
    /// Recurring-series membership. Empty for one-off occurrences.
    pub series_id: String,
    /// Marks the series as actively recurring.
    pub is_recurring: bool,
    /// Calendar date, `YYYY-MM-DD`, local civil calendar. Kept as a string
    /// because that is the boundary format; parsing — and its failure
    /// mode — belongs to the window maintainer, not the store.
    pub date: String,
    /// Target window size in effect when this record was generated.
    /// Bookkeeping only.
    pub window_size: u32,
    /// Activity-plan reference. Cleared when an occurrence is generated.
    pub activity_plan_id: String,
    /// Cleared on generation.
    pub activity_title: String,
    /// Cleared on generation.
    pub activity_text: String,
    /// Free-text note. Cleared on generation.
    pub note: String,
    /// The remaining domain fields (subject, teacher, price, …) as a JSON
    /// object, copied verbatim when an occurrence is cloned.
    pub detail: serde_json::Map<String, serde_json::Value>,
    /// RFC 3339 UTC timestamp of record creation.
    pub created_at: String,
    /// RFC 3339 UTC timestamp of the last update.
    pub updated_at: String,
}

/// Write payload for a new occurrence.
///
/// Deliberately has no `id` field: the store assigns one on insert, so a
/// template's id can never leak into a generated record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOccurrence {
    pub series_id: String,
    pub is_recurring: bool,
    pub date: String,
    pub window_size: u32,
    pub activity_plan_id: String,
    pub activity_title: String,
    pub activity_text: String,
    pub note: String,
    pub detail: serde_json::Map<String, serde_json::Value>,
    pub created_at: String,
    pub updated_at: String,
}
