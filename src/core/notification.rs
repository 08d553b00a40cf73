//! Weather notification records as received from the server
//!
//! The same shape arrives from the history endpoint and from the STOMP topic.
//! The `timeStamp` field is classified once, here, into [`Timestamp`].

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::trace;

use super::error::DashboardError;

/// Label shown wherever a timestamp could not be normalized
pub const INVALID_TIME_LABEL: &str = "Invalid Date/Time";

/// One weather update event
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub city: String,
    #[serde(default)]
    pub condition: Option<String>,
    /// `None` when the server sent null or omitted the field
    #[serde(default)]
    pub temperature_celsius: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(default)]
    pub time_stamp: Timestamp,
}

impl Notification {
    /// Decode a single notification from a JSON message body
    pub fn from_json(body: &str) -> Result<Self, DashboardError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Decode the history endpoint payload (array, newest first)
    pub fn list_from_json(body: &str) -> Result<Vec<Self>, DashboardError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Temperature with a missing reading shown as zero
    pub fn temperature_or_zero(&self) -> f64 {
        self.temperature_celsius.unwrap_or(0.0)
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Calendar fields of a server-side local date/time (month is 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFields {
    pub year: i32,
    pub month_value: u32,
    pub day_of_month: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// The three wire shapes of `timeStamp`, decided by structural inspection
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Timestamp {
    Text(String),
    EpochMillis(i64),
    Calendar(CalendarFields),
    /// Missing, null, or any other JSON shape
    #[default]
    Unrecognized,
}

impl Timestamp {
    /// Classify a raw JSON value
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Timestamp::Text(s.clone()),
            Value::Number(n) => match n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)) {
                Some(ms) => Timestamp::EpochMillis(ms),
                None => Timestamp::Unrecognized,
            },
            Value::Object(map) => {
                let field = |name: &str| map.get(name).and_then(Value::as_i64);
                let fields = (|| {
                    Some(CalendarFields {
                        year: i32::try_from(field("year")?).ok()?,
                        month_value: u32::try_from(field("monthValue")?).ok()?,
                        day_of_month: u32::try_from(field("dayOfMonth")?).ok()?,
                        hour: u32::try_from(field("hour")?).ok()?,
                        minute: u32::try_from(field("minute")?).ok()?,
                        second: u32::try_from(field("second")?).ok()?,
                    })
                })();
                fields.map_or(Timestamp::Unrecognized, Timestamp::Calendar)
            }
            _ => Timestamp::Unrecognized,
        }
    }

    /// Normalize to a local wall-clock point in time; `None` means invalid
    pub fn normalize(&self) -> Option<NaiveDateTime> {
        let normalized = match self {
            Timestamp::Text(text) => parse_text(text),
            Timestamp::EpochMillis(ms) => Local
                .timestamp_millis_opt(*ms)
                .single()
                .map(|dt| dt.naive_local()),
            Timestamp::Calendar(c) => {
                NaiveDate::from_ymd_opt(c.year, c.month_value, c.day_of_month)
                    .and_then(|d| d.and_hms_opt(c.hour, c.minute, c.second))
            }
            Timestamp::Unrecognized => None,
        };
        if normalized.is_none() {
            trace!(timestamp = ?self, "Timestamp did not normalize");
        }
        normalized
    }

    /// `HH:MM:SS` or the invalid sentinel
    pub fn time_label(&self) -> String {
        self.normalize()
            .map(|dt| format_time(&dt))
            .unwrap_or_else(|| INVALID_TIME_LABEL.to_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Timestamp::from_value(&value))
    }
}

fn parse_text(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    // Minute precision with a zone: "2024-03-05T14:30Z", "2024-03-05T14:30+01:00"
    let zoned = match text.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => text.to_string(),
    };
    if let Ok(dt) = DateTime::parse_from_str(&zoned, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    // Zone-less ISO text is local time
    if let Some(dt) = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt);
    }
    // A bare date is midnight UTC
    let midnight = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(&Local).naive_local())
}

/// 24-hour `HH:MM:SS`
pub fn format_time(dt: &NaiveDateTime) -> String {
    dt.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_calendar_timestamp_keeps_one_based_month() {
        let json = r#"{
            "city": "Athlone",
            "condition": "Clear",
            "temperatureCelsius": 14.2,
            "message": "Clear skies",
            "timeStamp": {"year": 2024, "monthValue": 3, "dayOfMonth": 5,
                          "hour": 14, "minute": 30, "second": 0,
                          "dayOfWeek": "TUESDAY", "nano": 0}
        }"#;
        let n = Notification::from_json(json).unwrap();
        let dt = n.time_stamp.normalize().unwrap();
        assert_eq!(
            dt,
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(14, 30, 0).unwrap()
        );
        assert_eq!(dt.month(), 3);
        assert_eq!(n.time_stamp.time_label(), "14:30:00");
    }

    #[test]
    fn test_iso_text_without_zone_is_local() {
        let ts = Timestamp::Text("2024-11-02T08:05:09".into());
        let dt = ts.normalize().unwrap();
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (8, 5, 9));
    }

    #[test]
    fn test_rfc3339_text_converts_to_local() {
        let ts = Timestamp::Text("2024-11-02T08:05:09Z".into());
        let expected = DateTime::parse_from_rfc3339("2024-11-02T08:05:09Z")
            .unwrap()
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(ts.normalize(), Some(expected));
    }

    #[test]
    fn test_short_iso_forms() {
        let utc_1430 = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        let zulu = Timestamp::Text("2024-03-05T14:30Z".into());
        assert_eq!(zulu.normalize(), Some(utc_1430.with_timezone(&Local).naive_local()));

        let offset = Timestamp::Text("2024-03-05T15:30+01:00".into());
        assert_eq!(offset.normalize(), Some(utc_1430.with_timezone(&Local).naive_local()));

        let midnight = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        let date_only = Timestamp::Text("2024-03-05".into());
        assert_eq!(date_only.normalize(), Some(midnight.with_timezone(&Local).naive_local()));
        assert_ne!(date_only.time_label(), INVALID_TIME_LABEL);

        assert_eq!(Timestamp::Text("2024-13-05".into()).normalize(), None);
    }

    #[test]
    fn test_epoch_millis() {
        let ms = 1_700_000_000_000;
        let n: Notification =
            serde_json::from_str(&format!(r#"{{"city":"Cork","timeStamp":{ms}}}"#)).unwrap();
        assert_eq!(n.time_stamp, Timestamp::EpochMillis(ms));
        let expected = Local.timestamp_millis_opt(ms).single().unwrap().naive_local();
        assert_eq!(n.time_stamp.normalize(), Some(expected));
    }

    #[test]
    fn test_unrecognized_shapes_render_sentinel() {
        for raw in [
            r#"{"city":"Cork"}"#,
            r#"{"city":"Cork","timeStamp":null}"#,
            r#"{"city":"Cork","timeStamp":[2024,3,5]}"#,
            r#"{"city":"Cork","timeStamp":{"year":2024}}"#,
            r#"{"city":"Cork","timeStamp":"yesterday-ish"}"#,
            r#"{"city":"Cork","timeStamp":{"year":2024,"monthValue":13,"dayOfMonth":1,"hour":0,"minute":0,"second":0}}"#,
        ] {
            let n = Notification::from_json(raw).unwrap();
            assert_eq!(n.time_stamp.normalize(), None, "{raw}");
            assert_eq!(n.time_stamp.time_label(), INVALID_TIME_LABEL);
        }
    }

    #[test]
    fn test_missing_fields_default() {
        let n = Notification::from_json(
            r#"{"city":"Galway","temperatureCelsius":null,"message":null}"#,
        )
        .unwrap();
        assert_eq!(n.condition, None);
        assert_eq!(n.temperature_celsius, None);
        assert_eq!(n.temperature_or_zero(), 0.0);
        assert_eq!(n.message, "");
    }

    #[test]
    fn test_history_list() {
        let list = Notification::list_from_json(
            r#"[{"city":"A","timeStamp":"2024-01-01T00:00:00"},{"city":"B"}]"#,
        )
        .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].city, "B");
    }

    #[test]
    fn test_malformed_body_is_error() {
        assert!(Notification::from_json("not json").is_err());
        assert!(Notification::from_json(r#"{"condition":"Rain"}"#).is_err());
    }
}
