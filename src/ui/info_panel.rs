use crate::core::{config::RouteConfig, geo::LatLng};
use std::fmt;

/// Latitude/longitude as shown to users: always four decimals.
pub fn format_coordinate(value: f64) -> String {
    format!("{value:.4}")
}

/// Read-only summary of the route shown next to the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfoPanel {
    pub start: LatLng,
    pub end: LatLng,
    pub speed_kmh: u32,
}

impl InfoPanel {
    pub fn new(start: LatLng, end: LatLng, speed_kmh: u32) -> Self {
        Self {
            start,
            end,
            speed_kmh,
        }
    }

    pub fn from_config(config: &RouteConfig) -> Self {
        Self::new(config.start, config.end, config.speed_kmh)
    }

    pub fn speed_label(&self) -> String {
        format!("Speed: {} km/h", self.speed_kmh)
    }

    /// Panel text, one entry per line
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(7);
        lines.push("Starting".to_string());
        lines.extend(coordinate_lines(self.start));
        lines.push(self.speed_label());
        lines.push("Ending".to_string());
        lines.extend(coordinate_lines(self.end));
        lines
    }

    #[cfg(feature = "egui")]
    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        ui.vertical(|ui| {
            section(ui, "Starting", self.start);
            ui.add_space(8.0);
            ui.label(egui::RichText::new(self.speed_label()).italics());
            ui.add_space(8.0);
            section(ui, "Ending", self.end);
        })
        .response
    }
}

fn coordinate_lines(point: LatLng) -> [String; 2] {
    [
        format!("Lat: {}", format_coordinate(point.lat)),
        format!("Long: {}", format_coordinate(point.lng)),
    ]
}

#[cfg(feature = "egui")]
fn section(ui: &mut egui::Ui, title: &str, point: LatLng) {
    ui.label(egui::RichText::new(title).strong());
    for line in coordinate_lines(point) {
        ui.label(line);
    }
}

impl fmt::Display for InfoPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
