//! Current-weather card

use super::feed::FeedEntry;
use super::notification::{Notification, Timestamp};
use super::presentation::{category_for, icon_for, Category, WeatherIcon};

/// Shown in every field while there is nothing to display
pub const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub city: String,
    pub condition: String,
    pub temperature: f64,
    pub icon: WeatherIcon,
    pub category: Category,
}

/// The single most recent reading for the active city selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentWeather {
    reading: Option<Reading>,
}

impl CurrentWeather {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, notification: &Notification) {
        let condition = notification.condition.as_deref();
        self.reading = Some(Reading {
            city: notification.city.clone(),
            condition: condition.unwrap_or_default().to_string(),
            temperature: notification.temperature_or_zero(),
            icon: icon_for(condition),
            category: category_for(condition),
        });
    }

    pub fn reset(&mut self) {
        self.reading = None;
    }

    pub fn reading(&self) -> Option<&Reading> {
        self.reading.as_ref()
    }

    pub fn city_label(&self) -> &str {
        self.reading.as_ref().map_or(PLACEHOLDER, |r| r.city.as_str())
    }

    pub fn condition_label(&self) -> &str {
        self.reading.as_ref().map_or(PLACEHOLDER, |r| r.condition.as_str())
    }

    /// `12.3°C`, or `--°C` when empty
    pub fn temperature_label(&self) -> String {
        match &self.reading {
            Some(r) => format!("{:.1}°C", r.temperature),
            None => format!("{PLACEHOLDER}°C"),
        }
    }

    pub fn icon(&self) -> WeatherIcon {
        self.reading.as_ref().map_or(WeatherIcon::Cloud, |r| r.icon)
    }

    /// Styling bucket of the card background
    pub fn category(&self) -> Category {
        self.reading.as_ref().map_or(Category::Default, |r| r.category)
    }
}

/// Rebuild a notification from a rendered entry.
///
/// The condition becomes the entry's category name and the temperature is
/// read back from the entry text; the timestamp is "now".
pub fn synthesize_from_entry(entry: &FeedEntry, now_millis: i64) -> Notification {
    Notification {
        city: entry.city.clone(),
        condition: Some(entry.category.as_str().to_string()),
        temperature_celsius: Some(extract_temperature(&entry.text).unwrap_or(0.0)),
        message: entry.text.clone(),
        time_stamp: Timestamp::EpochMillis(now_millis),
    }
}

/// First decimal number immediately followed by `°C`
pub fn extract_temperature(text: &str) -> Option<f64> {
    const MARKER: &str = "°C";
    let mut search_from = 0;
    while let Some(pos) = text[search_from..].find(MARKER) {
        let end = search_from + pos;
        let start = text[..end]
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
            .last()
            .map_or(end, |(i, _)| i);
        if start < end {
            let digits = &text[start..end];
            // A run such as "1.2.3" is taken from its longest parseable prefix
            let parsed = (1..=digits.len())
                .rev()
                .find_map(|n| digits[..n].parse::<f64>().ok());
            if parsed.is_some() {
                return parsed;
            }
        }
        search_from = end + MARKER.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_temperature() {
        assert_eq!(extract_temperature("Light rain, 12.3°C today"), Some(12.3));
        assert_eq!(extract_temperature("Cork: Clear 7°C"), Some(7.0));
        assert_eq!(extract_temperature("Cork: 3.5°C then 9.0°C"), Some(3.5));
        assert_eq!(extract_temperature("Cork: no reading"), None);
        assert_eq!(extract_temperature("°C first, then 4.0°C"), Some(4.0));
        assert_eq!(extract_temperature("Cork: -2.0°C"), Some(2.0));
    }

    #[test]
    fn test_update_and_labels() {
        let mut panel = CurrentWeather::new();
        assert_eq!(panel.temperature_label(), "--°C");
        assert_eq!(panel.city_label(), "--");
        assert_eq!(panel.condition_label(), "--");
        assert_eq!(panel.icon(), WeatherIcon::Cloud);

        panel.update(&Notification {
            city: "Cork".into(),
            condition: Some("Heavy Snow".into()),
            temperature_celsius: Some(-1.26),
            message: String::new(),
            time_stamp: Timestamp::Unrecognized,
        });
        assert_eq!(panel.temperature_label(), "-1.3°C");
        assert_eq!(panel.city_label(), "Cork");
        assert_eq!(panel.condition_label(), "Heavy Snow");
        assert_eq!(panel.icon(), WeatherIcon::Snow);
        assert_eq!(panel.category(), Category::Snow);

        panel.reset();
        assert_eq!(panel.reading(), None);
    }

    #[test]
    fn test_missing_temperature_shows_zero() {
        let mut panel = CurrentWeather::new();
        panel.update(&Notification {
            city: "Cork".into(),
            condition: None,
            temperature_celsius: None,
            message: String::new(),
            time_stamp: Timestamp::Unrecognized,
        });
        assert_eq!(panel.temperature_label(), "0.0°C");
    }
}
