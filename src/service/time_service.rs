use chrono::{DateTime, Datelike, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::{OffsetComponents, Tz};
use tracing::debug;

use crate::error::BookingError;
use crate::models::schedule::WeekdayOffsets;

/// Whether daylight-saving time is currently in effect in the target zone.
pub fn dst_active(tz: Tz, utc_now: DateTime<Utc>) -> bool {
    tz.offset_from_utc_datetime(&utc_now.naive_utc()).dst_offset() != Duration::zero()
}

/// Current wall-clock time in the target zone, as a naive local date-time:
/// UTC shifted by the zone's standard offset, plus the DST shift when
/// daylight-saving is active.
pub fn local_now(tz: Tz, utc_now: DateTime<Utc>) -> NaiveDateTime {
    let offset = tz.offset_from_utc_datetime(&utc_now.naive_utc());
    let standard = offset.base_utc_offset();
    let shift = if dst_active(tz, utc_now) {
        standard + offset.dst_offset()
    } else {
        standard
    };
    utc_now.naive_utc() + shift
}

/// Project the current local time forward to the slot to book: the weekday
/// rule picks how many days ahead, and the time-of-day is pinned to the
/// configured hour with minutes and seconds zeroed.
pub fn target_moment(
    local_now: NaiveDateTime,
    offsets: &WeekdayOffsets,
    target_hour: u32,
) -> Result<NaiveDateTime, BookingError> {
    let days_ahead = offsets.days_ahead(local_now.weekday());
    let target_date = local_now.date() + Duration::days(days_ahead);
    debug!("calculated target date: {}", target_date);
    target_date.and_hms_opt(target_hour, 0, 0).ok_or_else(|| {
        BookingError::Configuration(format!("invalid target hour: {}", target_hour))
    })
}
