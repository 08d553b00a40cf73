//! Dashboard controller
//!
//! Owns every piece of UI state (filters, city history, feed, current-weather
//! panel, chart, connection state, preference store). Front ends call into it
//! from their single UI thread and draw from its getters.

use chrono::Local;
use tracing::{debug, error, info, warn};

use super::chart::TemperatureChart;
use super::error::DashboardError;
use super::feed::NotificationFeed;
use super::filter::{CityFilter, CityHistory, ConditionFilter, Filters};
use super::notification::{format_time, Notification};
use super::panel::{synthesize_from_entry, CurrentWeather};
use super::prefs::{persist, PreferenceStore, Preferences, CITY_KEY, CONDITION_KEY, DARK_MODE_KEY};
use crate::ws_state::{ClientEvent, ConnectionState};

pub struct Dashboard {
    store: Box<dyn PreferenceStore>,
    dark_mode: bool,
    filters: Filters,
    cities: CityHistory,
    feed: NotificationFeed,
    panel: CurrentWeather,
    chart: TemperatureChart,
    connection: ConnectionState,
    /// Inbound messages dropped because they did not parse
    dropped_messages: u64,
}

impl Dashboard {
    /// Restore preferences and build empty feed/panel/chart
    pub fn new(mut store: Box<dyn PreferenceStore>) -> Self {
        let prefs = Preferences::load(store.as_mut());
        Self {
            store,
            dark_mode: prefs.dark_mode,
            filters: Filters {
                city: prefs.city,
                condition: prefs.condition,
            },
            cities: CityHistory::new(),
            feed: NotificationFeed::new(),
            panel: CurrentWeather::new(),
            chart: TemperatureChart::new(prefs.dark_mode),
            connection: ConnectionState::Disconnected,
            dropped_messages: 0,
        }
    }

    // ------------------------------------------------------------------
    // Startup
    // ------------------------------------------------------------------

    /// Apply the history fetch result, then ask for the messaging connection.
    ///
    /// A failed fetch is logged and startup continues with no history.
    /// Returns true when the caller should open the transport.
    pub fn bootstrap(&mut self, history: Result<Vec<Notification>, DashboardError>) -> bool {
        match history {
            Ok(items) => {
                info!(count = items.len(), "Loaded notification history");
                self.apply_history(&items);
            }
            Err(e) => warn!(error = %e, "Could not load notification history"),
        }
        self.request_connect()
    }

    /// Bootstrap from a history result that may not have arrived yet.
    ///
    /// `None` (still fetching) does nothing and returns false.
    pub fn bootstrap_from_slot(
        &mut self,
        history: Option<Result<Vec<Notification>, DashboardError>>,
    ) -> bool {
        match history {
            Some(history) => self.bootstrap(history),
            None => false,
        }
    }

    fn apply_history(&mut self, items: &[Notification]) {
        self.feed.clear();
        // History is newest first; replay oldest first so the feed ends newest first
        for notification in items.iter().rev() {
            self.feed.render(notification, &self.filters);
            self.cities.insert(&notification.city);
        }
        if let Some(newest) = items.first() {
            self.panel.update(newest);
            self.append_to_chart(newest);
        }
        self.refresh_city_selection();
        self.resync_current_weather();
    }

    // ------------------------------------------------------------------
    // Messaging
    // ------------------------------------------------------------------

    /// Move to Connecting; false if a session is already up or pending
    pub fn request_connect(&mut self) -> bool {
        if !self.connection.can_connect() {
            debug!(state = ?self.connection, "Connect ignored");
            return false;
        }
        info!("Connecting to weather notifications");
        self.connection = ConnectionState::Connecting;
        true
    }

    /// Move to Disconnected and reset the panel and chart.
    ///
    /// Returns true when there was a session for the caller to close.
    pub fn request_disconnect(&mut self) -> bool {
        let had_session = self.connection.can_disconnect();
        self.mark_disconnected();
        info!(had_session, "Disconnected");
        had_session
    }

    pub fn handle_client_event(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::Connected => {
                info!("Connected");
                self.connection = ConnectionState::Connected;
            }
            ClientEvent::Message(body) => {
                if let Err(e) = self.handle_message(&body) {
                    self.dropped_messages += 1;
                    warn!(error = %e, len = body.len(), "Dropping malformed notification");
                }
            }
            ClientEvent::Failed(reason) => {
                error!(reason = %reason, "Messaging connection failed");
                self.mark_disconnected();
            }
            ClientEvent::Disconnected => {
                if self.connection != ConnectionState::Disconnected {
                    warn!("Messaging connection closed");
                    self.mark_disconnected();
                }
            }
        }
    }

    /// Parse one inbound message body and fan it out
    pub fn handle_message(&mut self, body: &str) -> Result<(), DashboardError> {
        let notification = Notification::from_json(body)?;
        self.ingest(&notification);
        Ok(())
    }

    /// Feed, panel (unconditionally) and chart, plus city history
    pub fn ingest(&mut self, notification: &Notification) {
        debug!(
            city = %notification.city,
            condition = ?notification.condition,
            temperature = ?notification.temperature_celsius,
            "Notification received"
        );
        self.feed.render(notification, &self.filters);
        self.panel.update(notification);
        self.append_to_chart(notification);
        if self.cities.insert(&notification.city) {
            self.refresh_city_selection();
        }
    }

    fn mark_disconnected(&mut self) {
        self.connection = ConnectionState::Disconnected;
        self.panel.reset();
        self.chart.clear();
    }

    // ------------------------------------------------------------------
    // User actions
    // ------------------------------------------------------------------

    /// City selector changed: persist, filter, resync the panel.
    ///
    /// A city missing from the history falls back to the default city.
    pub fn select_city(&mut self, city: CityFilter) {
        let city = self.cities.resolve(&city);
        info!(city = %city, "City filter changed");
        persist(self.store.as_mut(), CITY_KEY, city.as_str());
        self.filters.city = city;
        self.feed.apply_filters(&self.filters);
        self.resync_current_weather();
    }

    /// Condition buttons changed: persist and filter; the panel is untouched
    pub fn select_condition(&mut self, condition: ConditionFilter) {
        info!(condition = condition.as_str(), "Condition filter changed");
        persist(self.store.as_mut(), CONDITION_KEY, condition.as_str());
        self.filters.condition = condition;
        self.feed.apply_filters(&self.filters);
    }

    /// Flip the theme, persist it and recolour the chart
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        persist(
            self.store.as_mut(),
            DARK_MODE_KEY,
            if self.dark_mode { "true" } else { "false" },
        );
        self.chart.apply_theme(self.dark_mode);
        debug!(dark_mode = self.dark_mode, "Theme toggled");
        self.dark_mode
    }

    pub fn toggle_chart_kind(&mut self) {
        self.chart.toggle_kind();
    }

    pub fn clear_chart(&mut self) {
        self.chart.clear();
    }

    pub fn clear_notifications(&mut self) {
        self.feed.clear();
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    /// Keep the city selection valid against the known cities
    fn refresh_city_selection(&mut self) {
        let resolved = self.cities.resolve(&self.filters.city);
        if resolved != self.filters.city {
            self.filters.city = resolved;
            self.feed.apply_filters(&self.filters);
        }
    }

    /// Show the newest entry for the selected city on the panel and chart.
    ///
    /// With "all" selected the panel is left as it is.
    pub fn resync_current_weather(&mut self) {
        let CityFilter::City(city) = &self.filters.city else {
            return;
        };
        let Some(entry) = self.feed.latest_for_city(city) else {
            debug!(city = %city, "No entries for city");
            return;
        };
        let synthetic = synthesize_from_entry(entry, Local::now().timestamp_millis());
        self.panel.update(&synthetic);
        self.append_to_chart(&synthetic);
    }

    fn append_to_chart(&mut self, notification: &Notification) {
        let label = notification
            .time_stamp
            .normalize()
            .unwrap_or_else(|| Local::now().naive_local());
        self.chart
            .append(format_time(&label), notification.temperature_or_zero());
    }

    // ------------------------------------------------------------------
    // Getters for rendering
    // ------------------------------------------------------------------

    pub fn feed(&self) -> &NotificationFeed {
        &self.feed
    }

    pub fn panel(&self) -> &CurrentWeather {
        &self.panel
    }

    pub fn chart(&self) -> &TemperatureChart {
        &self.chart
    }

    pub fn cities(&self) -> &CityHistory {
        &self.cities
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn connection(&self) -> &ConnectionState {
        &self.connection
    }

    pub fn dropped_messages(&self) -> u64 {
        self.dropped_messages
    }

    pub fn store(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }
}
