//! Header bar with clock, connection controls, and theme toggle

use eframe::egui;
use crate::theme::colors;
use crate::ws_state::ConnectionState;
use super::WeatherApp;

impl WeatherApp {
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui) {
        let connection = self.dashboard.connection().clone();

        ui.horizontal(|ui| {
            // LEFT: title and clock
            ui.heading("Weather Dashboard");
            ui.add_space(16.0);
            ui.label(egui::RichText::new(&self.clock.0).color(colors::TEXT_MUTED));
            ui.label(egui::RichText::new(&self.clock.1).monospace());

            // RIGHT: theme, connection buttons, status (right-to-left order)
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let theme_label = if self.dashboard.dark_mode() { "☀ Light" } else { "🌙 Dark" };
                if ui.button(theme_label).clicked() {
                    self.dashboard.toggle_dark_mode();
                }

                ui.add_space(10.0);

                if ui
                    .add_enabled(connection.can_disconnect(), egui::Button::new("Disconnect"))
                    .clicked()
                {
                    self.disconnect();
                }
                if ui
                    .add_enabled(connection.can_connect(), egui::Button::new("Connect"))
                    .clicked()
                {
                    self.connect();
                }

                ui.add_space(10.0);

                let status_color = match connection {
                    ConnectionState::Connected => colors::STATUS_CONNECTED,
                    ConnectionState::Connecting => colors::STATUS_CONNECTING,
                    ConnectionState::Disconnected => colors::STATUS_DISCONNECTED,
                };
                ui.colored_label(status_color, connection.label());
                if self.dashboard.dropped_messages() > 0 {
                    ui.label(
                        egui::RichText::new(format!("{} dropped", self.dashboard.dropped_messages()))
                            .color(colors::TEXT_MUTED),
                    );
                }
            });
        });
    }
}
