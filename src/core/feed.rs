//! Rendered notification feed
//!
//! An in-memory, newest-first list of entry view models. Front ends draw the
//! visible entries; nothing reads state back out of the UI.

use chrono::NaiveDateTime;
use std::collections::VecDeque;
use tracing::{debug, trace};

use super::filter::Filters;
use super::notification::Notification;
use super::presentation::{category_for, icon_for, Category, WeatherIcon};

/// Number of entries kept in the feed
pub const FEED_CAPACITY: usize = 50;

/// One rendered notification
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub city: String,
    pub category: Category,
    pub icon: WeatherIcon,
    /// `"{city}: {message}"` plus the temperature when one was sent
    pub text: String,
    /// `HH:MM:SS` or the invalid sentinel
    pub time_label: String,
    pub timestamp: Option<NaiveDateTime>,
    pub visible: bool,
}

impl FeedEntry {
    pub fn from_notification(notification: &Notification) -> Self {
        let condition = notification.condition.as_deref();
        let timestamp = notification.time_stamp.normalize();
        let time_label = notification.time_stamp.time_label();

        let mut text = format!("{}: {}", notification.city, notification.message);
        if let Some(t) = notification.temperature_celsius {
            text.push_str(&format!(" {t:.1}°C"));
        }

        Self {
            city: notification.city.clone(),
            category: category_for(condition),
            icon: icon_for(condition),
            text,
            time_label,
            timestamp,
            visible: true,
        }
    }
}

/// Bounded newest-first list of entries
#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    entries: VecDeque<FeedEntry>,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(FEED_CAPACITY + 1),
        }
    }

    /// Prepend an entry, re-apply filters, then drop anything past capacity
    pub fn render(&mut self, notification: &Notification, filters: &Filters) {
        let entry = FeedEntry::from_notification(notification);
        trace!(
            city = %entry.city,
            category = %entry.category,
            time = %entry.time_label,
            "Rendering notification"
        );
        self.entries.push_front(entry);
        self.apply_filters(filters);
        if self.entries.len() > FEED_CAPACITY {
            let dropped = self.entries.len() - FEED_CAPACITY;
            self.entries.truncate(FEED_CAPACITY);
            debug!(dropped, "Feed trimmed");
        }
    }

    /// Recompute visibility for every entry
    pub fn apply_filters(&mut self, filters: &Filters) {
        for entry in &mut self.entries {
            entry.visible = filters.matches(&entry.city, entry.category);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &FeedEntry> + '_ {
        self.entries.iter()
    }

    pub fn visible(&self) -> impl Iterator<Item = &FeedEntry> + '_ {
        self.entries.iter().filter(|e| e.visible)
    }

    /// Newest entry for a city
    pub fn latest_for_city(&self, city: &str) -> Option<&FeedEntry> {
        self.entries.iter().find(|e| e.city == city)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
