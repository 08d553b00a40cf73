//! Wall-clock labels for the header clock
//!
//! Refreshed once a second by both front ends.

use chrono::{DateTime, Local, TimeZone};

/// `("Monday, Jan 1", "12:34:56")`
pub fn clock_labels<Tz: TimeZone>(now: &DateTime<Tz>) -> (String, String)
where
    Tz::Offset: std::fmt::Display,
{
    (
        now.format("%A, %b %-d").to_string(),
        now.format("%H:%M:%S").to_string(),
    )
}

/// Labels for the current local time
pub fn clock_now() -> (String, String) {
    clock_labels(&Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_clock_labels() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 9, 5, 3).unwrap();
        let (date, time) = clock_labels(&t);
        assert_eq!(date, "Monday, Jan 1");
        assert_eq!(time, "09:05:03");
    }
}
