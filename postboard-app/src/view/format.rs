//! Display formatting helpers

use chrono::{DateTime, Local};

/// Format epoch seconds as local date and time
///
/// Values outside chrono's range fall back to the raw number.
pub fn format_timestamp(epoch_secs: i64) -> String {
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| epoch_secs.to_string())
}
