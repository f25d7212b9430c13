//! Notification scheduling fields.
//!
//! Only the schedule is modelled. Nothing here fires or delivers anything.

use chrono::{Duration, NaiveDateTime};

/// Returns when a notification should fire for a record anchored at `anchor`.
///
/// `minutes_before` is meaningful only while `enabled` is true. Negative
/// values are not rejected and move the time past the anchor.
pub fn notification_time(
    anchor: NaiveDateTime,
    enabled: bool,
    minutes_before: Option<i32>,
) -> Option<NaiveDateTime> {
    if !enabled {
        return None;
    }
    let minutes = minutes_before?;
    anchor.checked_sub_signed(Duration::minutes(i64::from(minutes)))
}
