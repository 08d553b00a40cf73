//! Temperature chart (line or bar) over the last readings

use eframe::egui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};
use crate::core::ChartKind;
use crate::theme::{self, colors, PlotColors};
use super::WeatherApp;

const SERIES_NAME: &str = "Temperature (°C)";

impl WeatherApp {
    pub(crate) fn render_chart(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.strong("Temperature");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Clear chart").clicked() {
                    self.dashboard.clear_chart();
                }
                let toggle = match self.dashboard.chart().kind() {
                    ChartKind::Line => "Bar chart",
                    ChartKind::Bar => "Line chart",
                };
                if ui.button(toggle).clicked() {
                    self.dashboard.toggle_chart_kind();
                }
            });
        });

        let chart = self.dashboard.chart();
        let plot_colors = PlotColors::from(chart.palette());

        egui::Frame::new()
            .fill(theme::card_fill(self.dashboard.dark_mode()))
            .stroke(egui::Stroke::new(1.0, plot_colors.grid))
            .corner_radius(6.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                if chart.shows_placeholder() {
                    ui.set_min_height(220.0);
                    ui.centered_and_justified(|ui| {
                        ui.label(egui::RichText::new("No temperature data yet").color(colors::TEXT_MUTED));
                    });
                    return;
                }

                let labels: Vec<String> = chart.points().map(|(label, _)| label.to_string()).collect();
                let values: Vec<f64> = chart.points().map(|(_, value)| value).collect();

                // Legend and tick labels take the palette's text colour
                ui.visuals_mut().override_text_color = Some(plot_colors.ticks);

                Plot::new("temperature_chart")
                    .height(220.0)
                    .legend(Legend::default())
                    .allow_drag(false)
                    .allow_zoom(false)
                    .allow_scroll(false)
                    .x_axis_formatter(move |mark, _range| {
                        let idx = mark.value.round();
                        if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                            return String::new();
                        }
                        labels.get(idx as usize).cloned().unwrap_or_default()
                    })
                    .y_axis_formatter(|mark, _range| format!("{:.0}°", mark.value))
                    .show(ui, |plot_ui| match chart.kind() {
                        ChartKind::Line => {
                            let points: PlotPoints = values
                                .iter()
                                .enumerate()
                                .map(|(i, &v)| [i as f64, v])
                                .collect();
                            plot_ui.line(
                                Line::new(points)
                                    .name(SERIES_NAME)
                                    .color(colors::SERIES)
                                    .width(2.0),
                            );
                        }
                        ChartKind::Bar => {
                            let bars = values
                                .iter()
                                .enumerate()
                                .map(|(i, &v)| Bar::new(i as f64, v).width(0.6))
                                .collect();
                            plot_ui.bar_chart(
                                BarChart::new(bars)
                                    .name(SERIES_NAME)
                                    .color(colors::SERIES),
                            );
                        }
                    });
            });
    }
}
