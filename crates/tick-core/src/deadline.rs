//! Classification of task deadlines into short display buckets.

use std::fmt;

use crate::errors::ValidationError;

pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;

/// How far away a deadline is, at the granularity shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bucket {
    NoDeadline,
    Hours(i64),
    Days(i64),
    /// Deadlines at least a week out. Carries the day count, rendered with a `w` suffix.
    Weeks(i64),
}

/// Color hint attached to a bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Urgency {
    Neutral,
    Urgent,
    Warning,
    Safe,
}

impl Bucket {
    pub fn urgency(self) -> Urgency {
        match self {
            Self::NoDeadline => Urgency::Neutral,
            Self::Hours(_) => Urgency::Urgent,
            Self::Days(_) => Urgency::Warning,
            Self::Weeks(_) => Urgency::Safe,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDeadline => f.write_str("-"),
            Self::Hours(n) => write!(f, "{n}h"),
            Self::Days(n) => write!(f, "{n}d"),
            Self::Weeks(n) => write!(f, "{n}w"),
        }
    }
}

/// Classify `deadline` relative to `now` (both unix seconds).
///
/// Overdue deadlines have a negative day count and land in [`Bucket::Days`].
pub fn classify(deadline: i64, now: i64) -> Bucket {
    if deadline == 0 {
        return Bucket::NoDeadline;
    }

    let seconds_until = deadline - now;
    let days_until = seconds_until.div_euclid(SECONDS_PER_DAY);

    match days_until {
        d if d >= 7 => Bucket::Weeks(d),
        0..=1 => Bucket::Hours(seconds_until.div_euclid(SECONDS_PER_HOUR)),
        d => Bucket::Days(d),
    }
}

/// Deadline for a task saved at `now` with the given offsets.
///
/// A negative offset is not applied; if neither applies the result is `0`
/// (no deadline). Offsets that overflow a unix timestamp are rejected.
pub fn deadline_from_offsets(now: i64, days: i64, hours: i64) -> Result<i64, ValidationError> {
    if days < 0 && hours < 0 {
        return Ok(0);
    }

    let out_of_range = ValidationError::DeadlineOutOfRange { days, hours };
    let mut until = now;
    if days >= 0 {
        until = days
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|secs| until.checked_add(secs))
            .ok_or_else(|| out_of_range.clone())?;
    }
    if hours >= 0 {
        until = hours
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(|secs| until.checked_add(secs))
            .ok_or(out_of_range)?;
    }
    Ok(until)
}
