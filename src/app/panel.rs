//! Current-weather card

use eframe::egui;
use crate::theme::{self, colors};
use super::WeatherApp;

/// Card with a coloured left edge
pub(crate) fn accent_card<R>(
    ui: &mut egui::Ui,
    dark: bool,
    accent: egui::Color32,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    let inner = egui::Frame::new()
        .fill(theme::card_fill(dark))
        .inner_margin(egui::Margin { left: 14, right: 10, top: 8, bottom: 8 })
        .corner_radius(6.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        });
    let rect = inner.response.rect;
    ui.painter().rect_filled(
        egui::Rect::from_min_size(rect.min, egui::vec2(4.0, rect.height())),
        2.0,
        accent,
    );
    inner.inner
}

impl WeatherApp {
    pub(crate) fn render_current_weather(&mut self, ui: &mut egui::Ui) {
        let panel = self.dashboard.panel();
        accent_card(
            ui,
            self.dashboard.dark_mode(),
            theme::accent(panel.category()),
            |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(panel.icon().glyph()).size(48.0));
                    ui.add_space(12.0);
                    ui.vertical(|ui| {
                        ui.heading(panel.city_label());
                        ui.label(egui::RichText::new(panel.temperature_label()).size(28.0).strong());
                        ui.label(egui::RichText::new(panel.condition_label()).color(colors::TEXT_MUTED));
                    });
                });
            },
        );
    }
}
