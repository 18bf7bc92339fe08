use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Sprint day number for `now`, given the sprint's `start`.
///
/// Both instants are taken as local wall-clock times and compared by
/// calendar date. Returns 0 before the start date, 1 on the start date,
/// and one more for every midnight crossed after that.
pub fn day_number(now: NaiveDateTime, start: NaiveDateTime) -> u32 {
    let (today, first) = (now.date(), start.date());
    if today < first {
        return 0;
    }
    let elapsed = today.signed_duration_since(first).num_days();
    u32::try_from(elapsed + 1).unwrap_or(u32::MAX)
}

/// Sprint day for `now`, reading the stored UTC start in `now`'s time zone
pub fn current_day<Tz: TimeZone>(now: &DateTime<Tz>, start: DateTime<Utc>) -> u32 {
    let start = start.with_timezone(&now.timezone());
    day_number(now.naive_local(), start.naive_local())
}
