//! Platform-agnostic core module - shared between WASM dashboard and CLI

pub mod chart;
pub mod dashboard;
pub mod error;
pub mod feed;
pub mod filter;
pub mod notification;
pub mod panel;
pub mod prefs;
pub mod presentation;
pub mod session;
pub mod stomp;

pub use chart::{ChartKind, ChartPalette, TemperatureChart};
pub use dashboard::Dashboard;
pub use error::{DashboardError, StompError};
pub use feed::{FeedEntry, NotificationFeed};
pub use filter::{CityFilter, CityHistory, ConditionFilter, Filters};
pub use notification::{Notification, Timestamp};
pub use panel::CurrentWeather;
pub use prefs::{MemoryStore, PreferenceStore};
pub use presentation::{category_for, icon_for, Category, WeatherIcon};
pub use session::{SessionEvent, StompSession};
