//! Terminal front end: stdin commands and plain-text views
//!
//! The CLI is the native counterpart of the browser dashboard; each command
//! maps to one dashboard action and each view is a projection of its state.

use std::fmt::Write as _;

use crate::core::{CityFilter, ConditionFilter, Dashboard};
use crate::time::clock_now;

pub const HELP: &str = "\
commands:
  connect              open the messaging connection
  disconnect           close it (resets current weather and chart)
  city <name|all>      filter by city
  condition <name|all> filter by category: rain clear extreme snow wind default
  theme                toggle dark mode
  chart                toggle line/bar chart
  clear-chart          clear the chart
  clear                clear the notification list
  show                 print the dashboard
  help                 this text
  quit                 disconnect and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Connect,
    Disconnect,
    City(CityFilter),
    Condition(ConditionFilter),
    Theme,
    ToggleChart,
    ClearChart,
    ClearNotifications,
    Show,
    Help,
    Quit,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, arg) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, a)| (w, a.trim()));
        match (word, arg) {
            ("connect", "") => Ok(Self::Connect),
            ("disconnect", "") => Ok(Self::Disconnect),
            ("city", "") | ("condition", "") => Err(format!("`{word}` needs a value")),
            ("city", city) => Ok(Self::City(CityFilter::parse(city))),
            ("condition", value) => {
                let parsed = ConditionFilter::parse(value);
                if parsed.as_str() != value {
                    return Err(format!("unknown condition `{value}`"));
                }
                Ok(Self::Condition(parsed))
            }
            ("theme", "") => Ok(Self::Theme),
            ("chart", "") => Ok(Self::ToggleChart),
            ("clear-chart", "") => Ok(Self::ClearChart),
            ("clear", "") => Ok(Self::ClearNotifications),
            ("show", "") | ("", "") => Ok(Self::Show),
            ("help", "") => Ok(Self::Help),
            ("quit", "") | ("exit", "") => Ok(Self::Quit),
            _ => Err(format!("unknown command `{line}` (try `help`)")),
        }
    }
}

/// Header line: clock, connection status and theme
pub fn render_header(dashboard: &Dashboard) -> String {
    let (date, time) = clock_now();
    format!(
        "{date} {time} | {} | {} mode",
        dashboard.connection().label(),
        if dashboard.dark_mode() { "dark" } else { "light" }
    )
}

pub fn render_current_weather(dashboard: &Dashboard) -> String {
    let panel = dashboard.panel();
    format!(
        "[{}] {} {} {} ({})",
        panel.icon().id(),
        panel.city_label(),
        panel.temperature_label(),
        panel.condition_label(),
        panel.category()
    )
}

pub fn render_chart(dashboard: &Dashboard) -> String {
    let chart = dashboard.chart();
    if chart.shows_placeholder() {
        return "chart: no data".to_string();
    }
    let mut out = format!("chart ({:?}):", chart.kind());
    for (label, value) in chart.points() {
        let _ = write!(out, " {label}={value:.1}");
    }
    out
}

pub fn render_filters(dashboard: &Dashboard) -> String {
    let filters = dashboard.filters();
    let cities: Vec<&str> = dashboard.cities().sorted().collect();
    format!(
        "city: {} (all, {}) | condition: {}",
        filters.city,
        cities.join(", "),
        filters.condition.as_str()
    )
}

/// Visible entries, newest first
pub fn render_feed(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    for entry in dashboard.feed().visible() {
        let _ = writeln!(
            out,
            "{:>17}  {:<10} {:<8} {}",
            entry.time_label,
            entry.icon.id(),
            entry.category,
            entry.text
        );
    }
    if out.is_empty() {
        out.push_str("(no notifications)\n");
    }
    out
}

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}",
        render_header(dashboard),
        render_current_weather(dashboard),
        render_chart(dashboard),
        render_filters(dashboard),
        render_feed(dashboard)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Category, MemoryStore};

    #[test]
    fn test_parse_commands() {
        assert_eq!(ConsoleCommand::parse("connect"), Ok(ConsoleCommand::Connect));
        assert_eq!(ConsoleCommand::parse("  city   New York "), Ok(ConsoleCommand::City(CityFilter::parse("New York"))));
        assert_eq!(ConsoleCommand::parse("city all"), Ok(ConsoleCommand::City(CityFilter::All)));
        assert_eq!(
            ConsoleCommand::parse("condition snow"),
            Ok(ConsoleCommand::Condition(ConditionFilter::Only(Category::Snow)))
        );
        assert_eq!(ConsoleCommand::parse("condition all"), Ok(ConsoleCommand::Condition(ConditionFilter::All)));
        assert_eq!(ConsoleCommand::parse(""), Ok(ConsoleCommand::Show));
        assert!(ConsoleCommand::parse("condition hail").is_err());
        assert!(ConsoleCommand::parse("city").is_err());
        assert!(ConsoleCommand::parse("connect now").is_err());
        assert!(ConsoleCommand::parse("dance").is_err());
    }

    #[test]
    fn test_views_before_any_data() {
        let dash = Dashboard::new(Box::new(MemoryStore::new()));
        assert_eq!(render_current_weather(&dash), "[cloud-icon] -- --°C -- (default)");
        assert_eq!(render_chart(&dash), "chart: no data");
        assert_eq!(render_feed(&dash), "(no notifications)\n");
        assert_eq!(render_filters(&dash), "city: Athlone (all, Athlone) | condition: all");
        assert!(render_header(&dash).contains("Disconnected"));
    }

    #[test]
    fn test_views_after_message() {
        let mut dash = Dashboard::new(Box::new(MemoryStore::new()));
        dash.handle_message(
            r#"{"city":"Athlone","condition":"Light Rain","temperatureCelsius":12.3,"message":"Light rain","timeStamp":"2024-03-05T14:30:00"}"#,
        )
        .unwrap();
        assert_eq!(render_current_weather(&dash), "[rain-icon] Athlone 12.3°C Light Rain (rain)");
        assert_eq!(render_chart(&dash), "chart (Line): 14:30:00=12.3");
        let feed = render_feed(&dash);
        assert!(feed.contains("Athlone: Light rain 12.3°C"));
        assert!(feed.contains("14:30:00"));
    }
}
