use chrono::{DateTime, Datelike, Duration, Local, TimeZone};

/// Next local instant at `hour`:`minute` on ISO weekday `day`
/// (0 = Monday … 6 = Sunday), strictly after `from`.
///
/// Local time on purpose: occurrence dates are local civil-calendar
/// readings, so the run should fire relative to the school's clock.
/// Returns `None` only when the candidate wall-clock time cannot be
/// mapped (DST gap on the target instant).
pub fn next_weekly_run(
    day: u8,
    hour: u8,
    minute: u8,
    from: DateTime<Local>,
) -> Option<DateTime<Local>> {
    let today_dow = i64::from(from.weekday().num_days_from_monday());
    let target_dow = i64::from(day).clamp(0, 6);
    let days_ahead = target_dow - today_dow;

    // Negative means the target day already passed this week.
    let candidate_day = if days_ahead < 0 {
        from + Duration::days(7 + days_ahead)
    } else {
        from + Duration::days(days_ahead)
    };

    let candidate = Local
        .with_ymd_and_hms(
            candidate_day.year(),
            candidate_day.month(),
            candidate_day.day(),
            u32::from(hour),
            u32::from(minute),
            0,
        )
        .earliest()?;

    if candidate > from {
        Some(candidate)
    } else {
        // Only reachable when `from` sits on the target weekday past the
        // fire time: push a full week.
        Some(candidate + Duration::days(7))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Weekday};

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).earliest().unwrap()
    }

    #[test]
    fn fires_later_the_same_day() {
        // 2025-01-08 is a Wednesday (ISO weekday 2).
        let from = local(2025, 1, 8, 1, 0);
        let next = next_weekly_run(2, 3, 0, from).unwrap();
        assert_eq!(next, local(2025, 1, 8, 3, 0));
    }

    #[test]
    fn same_day_past_fire_time_pushes_a_week() {
        let from = local(2025, 1, 8, 4, 0);
        let next = next_weekly_run(2, 3, 0, from).unwrap();
        assert_eq!(next, local(2025, 1, 15, 3, 0));
    }

    #[test]
    fn target_earlier_in_the_week_lands_next_week() {
        // From Wednesday, a Monday trigger is five days out.
        let from = local(2025, 1, 8, 12, 0);
        let next = next_weekly_run(0, 3, 0, from).unwrap();
        assert_eq!(next, local(2025, 1, 13, 3, 0));
        assert_eq!(next.weekday(), Weekday::Mon);
    }

    #[test]
    fn result_is_strictly_after_from_and_on_target_weekday() {
        let from = local(2025, 3, 1, 23, 59);
        for day in 0..7u8 {
            let next = next_weekly_run(day, 3, 30, from).unwrap();
            assert!(next > from);
            assert_eq!(i64::from(next.weekday().num_days_from_monday()), i64::from(day));
            assert_eq!((next.hour(), next.minute()), (3, 30));
            assert!((next - from) <= Duration::days(7));
        }
    }
}
