//! Renderings of the single instant captured per build.

use crate::error::Result;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// All timestamp strings of one payload, derived from the same instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamps {
    /// `YYYY-MM-DD HH:MM` in the instant's own offset.
    pub local: String,
    /// ISO-8601 in UTC with microseconds and a `Z` suffix.
    pub iso: String,
    /// Order reference, `REF` followed by the local date and time digits.
    pub order_ref: String,
}

impl Timestamps {
    pub fn at(instant: OffsetDateTime) -> Result<Self> {
        Ok(Self {
            local: instant.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))?,
            iso: instant.to_offset(UtcOffset::UTC).format(format_description!(
                "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
            ))?,
            order_ref: instant.format(format_description!(
                "REF[year][month][day][hour][minute][second]"
            ))?,
        })
    }
}

/// Current instant in the local offset, or UTC when the offset cannot be
/// determined (e.g. in multi-threaded processes on some platforms).
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
