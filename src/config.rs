//! Endpoint and storage configuration
//!
//! Native builds read environment variables; the browser build derives
//! everything from the page origin.

/// Server used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
/// Raw-WebSocket transport of the server's `/ws` STOMP endpoint
pub const WS_PATH: &str = "/ws/websocket";
pub const TOPIC: &str = "/topic/weather-notifications";
pub const HISTORY_PATH: &str = "/api/notifications";
pub const DEFAULT_PREFS_FILE: &str = "weather-dash-prefs.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// `http(s)://host:port`, no trailing slash
    pub base_url: String,
    pub ws_url: String,
    pub topic: String,
    /// Preference file (native only; the browser uses localStorage)
    pub prefs_path: String,
}

impl DashboardConfig {
    /// Everything derived from one base URL
    pub fn for_origin(origin: &str) -> Self {
        let base_url = origin.trim_end_matches('/').to_string();
        Self {
            ws_url: ws_url_for(&base_url),
            base_url,
            topic: TOPIC.to_string(),
            prefs_path: DEFAULT_PREFS_FILE.to_string(),
        }
    }

    /// Load from `WEATHER_DASH_URL`, `WEATHER_DASH_WS`, `WEATHER_DASH_TOPIC`
    /// and `WEATHER_DASH_PREFS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        use std::env;

        let base = env::var("WEATHER_DASH_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::for_origin(&base);
        if let Ok(ws) = env::var("WEATHER_DASH_WS") {
            config.ws_url = ws;
        }
        if let Ok(topic) = env::var("WEATHER_DASH_TOPIC") {
            config.topic = topic;
        }
        if let Ok(path) = env::var("WEATHER_DASH_PREFS") {
            config.prefs_path = path;
        }
        config
    }

    pub fn history_url(&self) -> String {
        format!("{}{}", self.base_url, HISTORY_PATH)
    }

    /// Virtual host for the STOMP CONNECT frame
    pub fn stomp_host(&self) -> String {
        let without_scheme = self
            .base_url
            .split_once("://")
            .map_or(self.base_url.as_str(), |(_, rest)| rest);
        let authority = without_scheme.split('/').next().unwrap_or_default();
        let host = authority.rsplit_once(':').map_or(authority, |(h, _)| h);
        if host.is_empty() {
            "localhost".to_string()
        } else {
            host.to_string()
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::for_origin(DEFAULT_BASE_URL)
    }
}

/// `http://h:p` → `ws://h:p/ws/websocket`, `https` → `wss`
pub fn ws_url_for(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let swapped = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        base.to_string()
    };
    format!("{swapped}{WS_PATH}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = DashboardConfig::default();
        assert_eq!(config.ws_url, "ws://127.0.0.1:8080/ws/websocket");
        assert_eq!(config.history_url(), "http://127.0.0.1:8080/api/notifications");
        assert_eq!(config.topic, "/topic/weather-notifications");
        assert_eq!(config.stomp_host(), "127.0.0.1");
    }

    #[test]
    fn test_https_origin() {
        let config = DashboardConfig::for_origin("https://weather.example.org/");
        assert_eq!(config.ws_url, "wss://weather.example.org/ws/websocket");
        assert_eq!(config.history_url(), "https://weather.example.org/api/notifications");
        assert_eq!(config.stomp_host(), "weather.example.org");
    }
}
