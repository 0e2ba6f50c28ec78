use agenda_store::{NewOccurrence, Occurrence};
use chrono::{DateTime, NaiveDate, Utc};

/// Build the write payload for one generated occurrence.
///
/// Pure clone-with-overrides, free of store access: the template's domain
/// fields travel verbatim in `detail`, the four content fields (activity
/// plan, title, text, note) are cleared, `date` is replaced with the new
/// cursor date and both timestamps are set to `now`. The payload carries
/// no id; the store assigns one on insert.
pub fn generated_fields(
    template: &Occurrence,
    date: NaiveDate,
    window_size: u32,
    now: DateTime<Utc>,
) -> NewOccurrence {
    let stamp = now.to_rfc3339();
    NewOccurrence {
        series_id: template.series_id.clone(),
        is_recurring: template.is_recurring,
        date: date.to_string(),
        window_size,
        activity_plan_id: String::new(),
        activity_title: String::new(),
        activity_text: String::new(),
        note: String::new(),
        detail: template.detail.clone(),
        created_at: stamp.clone(),
        updated_at: stamp,
    }
}
