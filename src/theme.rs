//! Light and dark palettes

use crate::core::{Category, ChartPalette};
use crate::core::chart::Rgba;
use egui::Color32;

pub mod colors {
    use super::Color32;

    // === Light ===
    pub const LIGHT_BG: Color32 = Color32::from_rgb(245, 247, 250);       // #F5F7FA
    pub const LIGHT_CARD: Color32 = Color32::from_rgb(255, 255, 255);     // #FFFFFF
    pub const LIGHT_TEXT: Color32 = Color32::from_rgb(51, 51, 51);        // #333333

    // === Dark ===
    pub const DARK_BG: Color32 = Color32::from_rgb(18, 18, 18);           // #121212
    pub const DARK_CARD: Color32 = Color32::from_rgb(30, 30, 30);         // #1E1E1E
    pub const DARK_TEXT: Color32 = Color32::from_rgb(244, 244, 244);      // #F4F4F4

    pub const TEXT_MUTED: Color32 = Color32::from_rgb(128, 128, 128);     // #808080

    // === Connection status ===
    pub const STATUS_CONNECTED: Color32 = Color32::from_rgb(100, 200, 100);
    pub const STATUS_CONNECTING: Color32 = Color32::from_rgb(200, 200, 100);
    pub const STATUS_DISCONNECTED: Color32 = Color32::from_rgb(200, 100, 100);

    // === Chart series ===
    pub const SERIES: Color32 = Color32::from_rgb(54, 162, 235);          // #36A2EB
}

pub fn card_fill(dark: bool) -> Color32 {
    if dark {
        colors::DARK_CARD
    } else {
        colors::LIGHT_CARD
    }
}

/// egui Visuals for the current theme
pub fn visuals(dark: bool) -> egui::Visuals {
    use colors::*;

    let mut visuals = if dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    let (bg, card, text) = if dark {
        (DARK_BG, DARK_CARD, DARK_TEXT)
    } else {
        (LIGHT_BG, LIGHT_CARD, LIGHT_TEXT)
    };

    visuals.panel_fill = bg;
    visuals.window_fill = card;
    visuals.faint_bg_color = card;
    visuals.override_text_color = Some(text);

    // Flat cards
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}

/// Left-border accent of a feed entry or the current-weather card
pub fn accent(category: Category) -> Color32 {
    let (r, g, b) = category.accent_rgb();
    Color32::from_rgb(r, g, b)
}

fn rgba(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3])
}

/// Chart legend, tick and grid colours
pub struct PlotColors {
    pub legend: Color32,
    pub ticks: Color32,
    pub grid: Color32,
}

impl From<ChartPalette> for PlotColors {
    fn from(p: ChartPalette) -> Self {
        Self {
            legend: rgba(p.legend),
            ticks: rgba(p.ticks),
            grid: rgba(p.grid),
        }
    }
}
