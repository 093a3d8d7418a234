use agile_core::display::{DISPLAY_TZ, format_date_time, format_time};
use chrono::{TimeZone, Utc};

#[test]
fn summer_time_shifts_by_an_hour() {
    let at = Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap();
    assert_eq!(format_time(at, DISPLAY_TZ), "11:00");
    assert_eq!(format_date_time(at, DISPLAY_TZ), "15/06 11:00");
}

#[test]
fn winter_time_matches_utc() {
    let at = Utc.with_ymd_and_hms(2023, 12, 15, 10, 30, 0).unwrap();
    assert_eq!(format_time(at, DISPLAY_TZ), "10:30");
    assert_eq!(format_date_time(at, DISPLAY_TZ), "15/12 10:30");
}

#[test]
fn date_rolls_over_in_target_zone() {
    let at = Utc.with_ymd_and_hms(2024, 5, 27, 23, 30, 0).unwrap();
    assert_eq!(format_date_time(at, DISPLAY_TZ), "28/05 00:30");
    assert_eq!(format_time(at, chrono_tz::UTC), "23:30");
}
