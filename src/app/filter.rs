//! City and condition filters

use eframe::egui;
use crate::core::{CityFilter, ConditionFilter};
use crate::theme;
use super::WeatherApp;

impl WeatherApp {
    pub(crate) fn render_filters(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.strong("City");

        let current = self.dashboard.filters().city.clone();
        let mut selected = current.clone();
        egui::ComboBox::from_id_salt("city_filter")
            .selected_text(match &current {
                CityFilter::All => "All cities",
                CityFilter::City(name) => name.as_str(),
            })
            .width(180.0)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut selected, CityFilter::All, "All cities");
                for city in self.dashboard.cities().sorted() {
                    ui.selectable_value(&mut selected, CityFilter::parse(city), city);
                }
            });
        if selected != current {
            self.dashboard.select_city(selected);
        }

        ui.add_space(12.0);
        ui.strong("Condition");

        let current = self.dashboard.filters().condition;
        for &option in ConditionFilter::OPTIONS {
            let label = match option {
                ConditionFilter::All => egui::RichText::new("All"),
                ConditionFilter::Only(category) => {
                    egui::RichText::new(category.as_str()).color(theme::accent(category))
                }
            };
            if ui.selectable_label(current == option, label).clicked() && current != option {
                self.dashboard.select_condition(option);
            }
        }
    }
}
