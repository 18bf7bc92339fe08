use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Time left until the assessments start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Remaining {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
    Begun,
}

/// UTC midnight of the assessment date
pub fn assessment_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Split the time from `now` to `target` into whole units.
/// Sub-second remainders are truncated.
pub fn countdown(now: DateTime<Utc>, target: DateTime<Utc>) -> Countdown {
    let distance = target.signed_duration_since(now).num_milliseconds();
    if distance < 0 {
        return Countdown::Begun;
    }
    let secs = distance / 1000;
    Countdown::Remaining {
        days: secs / 86_400,
        hours: (secs % 86_400) / 3_600,
        minutes: (secs % 3_600) / 60,
        seconds: secs % 60,
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Remaining {
                days,
                hours,
                minutes,
                seconds,
            } => write!(f, "{days}d {hours}h {minutes}m {seconds}s"),
            Countdown::Begun => write!(f, "Assessments have begun!"),
        }
    }
}
