//! Condition text → icon and styling category
//!
//! Both mappings are ordered substring rules over the lower-cased condition;
//! the first matching rule wins. The two orders differ on purpose and must
//! stay as listed.

use std::fmt;

/// Weather icon shown next to feed entries and on the current-weather card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Rain,
    Sun,
    Cloud,
    Snow,
    Bolt,
    Wind,
    Fog,
}

impl WeatherIcon {
    /// Stable identifier (used by the CLI log output and for styling hooks)
    pub fn id(self) -> &'static str {
        match self {
            WeatherIcon::Rain => "rain-icon",
            WeatherIcon::Sun => "sun-icon",
            WeatherIcon::Cloud => "cloud-icon",
            WeatherIcon::Snow => "snow-icon",
            WeatherIcon::Bolt => "bolt-icon",
            WeatherIcon::Wind => "wind-icon",
            WeatherIcon::Fog => "fog-icon",
        }
    }

    /// Glyph drawn by the egui front end
    pub fn glyph(self) -> &'static str {
        match self {
            WeatherIcon::Rain => "🌧",
            WeatherIcon::Sun => "☀",
            WeatherIcon::Cloud => "☁",
            WeatherIcon::Snow => "❄",
            WeatherIcon::Bolt => "⚡",
            WeatherIcon::Wind => "🌬",
            WeatherIcon::Fog => "🌫",
        }
    }
}

/// Coarse styling bucket derived from the condition text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Rain,
    Clear,
    Extreme,
    Snow,
    Wind,
    Default,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::Rain,
        Category::Clear,
        Category::Extreme,
        Category::Snow,
        Category::Wind,
        Category::Default,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Rain => "rain",
            Category::Clear => "clear",
            Category::Extreme => "extreme",
            Category::Snow => "snow",
            Category::Wind => "wind",
            Category::Default => "default",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Category::ALL.iter().copied().find(|c| c.as_str() == s)
    }

    /// Accent colour (RGB) for feed stripes and the weather card
    pub fn accent_rgb(self) -> (u8, u8, u8) {
        match self {
            Category::Rain => (52, 152, 219),
            Category::Clear => (241, 196, 15),
            Category::Extreme => (231, 76, 60),
            Category::Snow => (189, 195, 199),
            Category::Wind => (26, 188, 156),
            Category::Default => (149, 165, 166),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

const ICON_RULES: &[(&[&str], WeatherIcon)] = &[
    (&["rain", "shower"], WeatherIcon::Rain),
    (&["clear", "sun"], WeatherIcon::Sun),
    (&["cloud"], WeatherIcon::Cloud),
    (&["snow"], WeatherIcon::Snow),
    (&["thunder", "storm"], WeatherIcon::Bolt),
    (&["wind"], WeatherIcon::Wind),
    (&["fog", "mist"], WeatherIcon::Fog),
];

const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (&["rain", "shower"], Category::Rain),
    (&["clear", "sun"], Category::Clear),
    (&["storm", "extreme"], Category::Extreme),
    (&["snow"], Category::Snow),
    (&["wind"], Category::Wind),
];

fn first_match<T: Copy>(condition: Option<&str>, rules: &[(&[&str], T)], fallback: T) -> T {
    let Some(condition) = condition else {
        return fallback;
    };
    let lower = condition.to_lowercase();
    rules
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
        .map_or(fallback, |&(_, value)| value)
}

/// Icon for a condition; absent or unmatched conditions get the cloud
pub fn icon_for(condition: Option<&str>) -> WeatherIcon {
    first_match(condition, ICON_RULES, WeatherIcon::Cloud)
}

/// Styling category for a condition
pub fn category_for(condition: Option<&str>) -> Category {
    first_match(condition, CATEGORY_RULES, Category::Default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rain_wins_over_everything() {
        for c in [
            "Light Rain",
            "SHOWERS with sun",
            "Thunderstorm and rain",
            "snow showers",
            "windy, rain later",
            "Rain, fog and mist",
        ] {
            assert_eq!(icon_for(Some(c)), WeatherIcon::Rain, "{c}");
            assert_eq!(category_for(Some(c)), Category::Rain, "{c}");
        }
    }

    #[test]
    fn test_icon_priority_order() {
        assert_eq!(icon_for(Some("Sunny")), WeatherIcon::Sun);
        assert_eq!(icon_for(Some("Partly cloudy, sun later")), WeatherIcon::Sun);
        assert_eq!(icon_for(Some("Cloudy with snow")), WeatherIcon::Cloud);
        assert_eq!(icon_for(Some("Heavy Snow")), WeatherIcon::Snow);
        assert_eq!(icon_for(Some("Thunder")), WeatherIcon::Bolt);
        assert_eq!(icon_for(Some("Storm warning, windy")), WeatherIcon::Bolt);
        assert_eq!(icon_for(Some("Windy")), WeatherIcon::Wind);
        assert_eq!(icon_for(Some("Morning mist")), WeatherIcon::Fog);
        assert_eq!(icon_for(Some("Hail")), WeatherIcon::Cloud);
        assert_eq!(icon_for(None), WeatherIcon::Cloud);
    }

    #[test]
    fn test_category_priority_order() {
        assert_eq!(category_for(Some("Clear")), Category::Clear);
        assert_eq!(category_for(Some("Snowstorm")), Category::Extreme);
        assert_eq!(category_for(Some("Extreme heat")), Category::Extreme);
        assert_eq!(category_for(Some("Snow")), Category::Snow);
        assert_eq!(category_for(Some("Strong wind")), Category::Wind);
        // Thunder alone is not extreme, unlike the icon rules
        assert_eq!(category_for(Some("Thunder")), Category::Default);
        assert_eq!(category_for(Some("Cloudy")), Category::Default);
        assert_eq!(category_for(None), Category::Default);
    }

    #[test]
    fn test_category_parse_roundtrip() {
        for &c in Category::ALL {
            assert_eq!(Category::parse(c.as_str()), Some(c));
        }
        assert_eq!(Category::parse("all"), None);
    }
}
