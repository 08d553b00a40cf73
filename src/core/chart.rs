//! Rolling temperature chart state
//!
//! Platform-agnostic: the egui front end projects this into `egui_plot`,
//! the CLI logs it.

use std::collections::VecDeque;
use tracing::{debug, trace};

/// Number of points kept on the chart
pub const CHART_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

impl ChartKind {
    pub fn toggled(self) -> Self {
        match self {
            ChartKind::Line => ChartKind::Bar,
            ChartKind::Bar => ChartKind::Line,
        }
    }
}

/// RGBA colour, unmultiplied
pub type Rgba = [u8; 4];

/// Axis, legend and grid colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPalette {
    pub legend: Rgba,
    pub ticks: Rgba,
    pub grid: Rgba,
}

impl ChartPalette {
    pub const LIGHT: ChartPalette = ChartPalette {
        legend: [0x66, 0x66, 0x66, 255],
        ticks: [0x66, 0x66, 0x66, 255],
        grid: [0, 0, 0, 26],
    };

    pub const DARK: ChartPalette = ChartPalette {
        legend: [0xf4, 0xf4, 0xf4, 255],
        ticks: [0xf4, 0xf4, 0xf4, 255],
        grid: [255, 255, 255, 26],
    };

    pub fn for_theme(dark: bool) -> Self {
        if dark {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }
}

/// One chart instance: parallel labels/values, FIFO of fixed capacity
#[derive(Debug, Clone)]
pub struct TemperatureChart {
    labels: VecDeque<String>,
    values: VecDeque<f64>,
    kind: ChartKind,
    palette: ChartPalette,
}

impl TemperatureChart {
    /// Empty line chart with the "no data" placeholder showing
    pub fn new(dark: bool) -> Self {
        Self {
            labels: VecDeque::with_capacity(CHART_CAPACITY + 1),
            values: VecDeque::with_capacity(CHART_CAPACITY + 1),
            kind: ChartKind::Line,
            palette: ChartPalette::for_theme(dark),
        }
    }

    /// Push a point, evicting the oldest beyond capacity
    pub fn append(&mut self, label: impl Into<String>, value: f64) {
        let label = label.into();
        trace!(label = %label, value, "Chart point");
        self.labels.push_back(label);
        self.values.push_back(value);
        while self.labels.len() > CHART_CAPACITY {
            self.labels.pop_front();
            self.values.pop_front();
        }
    }

    /// Flip line ↔ bar, keeping the data
    pub fn toggle_kind(&mut self) -> ChartKind {
        self.kind = self.kind.toggled();
        debug!(kind = ?self.kind, "Chart type toggled");
        self.kind
    }

    pub fn clear(&mut self) {
        self.labels.clear();
        self.values.clear();
    }

    pub fn apply_theme(&mut self, dark: bool) {
        self.palette = ChartPalette::for_theme(dark);
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn palette(&self) -> ChartPalette {
        self.palette
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the "no data" placeholder should be visible
    pub fn shows_placeholder(&self) -> bool {
        self.is_empty()
    }

    /// Points oldest first
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn latest(&self) -> Option<(&str, f64)> {
        self.points().last()
    }
}

impl Default for TemperatureChart {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chart_is_empty_line() {
        let chart = TemperatureChart::new(false);
        assert!(chart.shows_placeholder());
        assert_eq!(chart.kind(), ChartKind::Line);
        assert_eq!(chart.palette(), ChartPalette::LIGHT);
    }

    #[test]
    fn test_eleventh_point_evicts_first() {
        let mut chart = TemperatureChart::new(false);
        for i in 0..11 {
            chart.append(format!("t{i}"), i as f64);
            assert!(chart.len() <= CHART_CAPACITY);
        }
        let points: Vec<(String, f64)> =
            chart.points().map(|(l, v)| (l.to_string(), v)).collect();
        assert_eq!(points.len(), 10);
        assert_eq!(points[0], ("t1".to_string(), 1.0));
        assert_eq!(points[9], ("t10".to_string(), 10.0));
        assert!(points.iter().all(|(l, _)| l != "t0"));
        assert!(!chart.shows_placeholder());
    }

    #[test]
    fn test_toggle_keeps_data() {
        let mut chart = TemperatureChart::new(false);
        chart.append("a", 1.5);
        assert_eq!(chart.toggle_kind(), ChartKind::Bar);
        assert_eq!(chart.latest(), Some(("a", 1.5)));
        assert_eq!(chart.toggle_kind(), ChartKind::Line);
    }

    #[test]
    fn test_clear_shows_placeholder() {
        let mut chart = TemperatureChart::new(false);
        chart.append("a", 1.0);
        chart.clear();
        assert!(chart.shows_placeholder());
        assert_eq!(chart.latest(), None);
    }

    #[test]
    fn test_theme_does_not_touch_data() {
        let mut chart = TemperatureChart::new(false);
        chart.append("a", 3.0);
        chart.apply_theme(true);
        assert_eq!(chart.palette(), ChartPalette::DARK);
        assert_eq!(chart.len(), 1);
    }
}
