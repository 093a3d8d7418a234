//! Rendering of slot boundaries for people reading them in a local time zone.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Zone the upstream tariff is priced in.
pub const DISPLAY_TZ: Tz = chrono_tz::Europe::London;

/// Render `at` as `HH:MM` in `tz`.
///
/// A slot starting at `10:00Z` in June shows as `11:00` for `Europe/London`.
#[must_use]
pub fn format_time(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%H:%M").to_string()
}

/// Render `at` as `DD/MM HH:MM` in `tz`.
#[must_use]
pub fn format_date_time(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%d/%m %H:%M").to_string()
}
