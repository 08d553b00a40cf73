//! Notification feed, newest first

use eframe::egui;
use crate::theme::{self, colors};
use super::panel::accent_card;
use super::WeatherApp;

impl WeatherApp {
    pub(crate) fn render_feed(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.strong("Notifications");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(!self.dashboard.feed().is_empty(), egui::Button::new("Clear"))
                    .clicked()
                {
                    self.dashboard.clear_notifications();
                }
            });
        });
        ui.add_space(4.0);

        let dark = self.dashboard.dark_mode();
        let mut shown = 0usize;
        for entry in self.dashboard.feed().visible() {
            shown += 1;
            accent_card(ui, dark, theme::accent(entry.category), |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(entry.icon.glyph()).size(20.0));
                    ui.label(entry.text.as_str());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(egui::RichText::new(&entry.time_label).small().color(colors::TEXT_MUTED));
                    });
                });
            });
            ui.add_space(4.0);
        }

        if shown == 0 {
            ui.label(egui::RichText::new("No notifications").color(colors::TEXT_MUTED));
        }
    }
}
