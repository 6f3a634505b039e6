pub mod document;
pub mod info_panel;

#[cfg(feature = "egui")]
pub mod imagery;
#[cfg(feature = "egui")]
pub mod widget;

pub use document::Document;
pub use info_panel::{format_coordinate, InfoPanel};

#[cfg(feature = "egui")]
pub use imagery::MapImagery;
#[cfg(feature = "egui")]
pub use widget::{RouteMapStyle, RouteMapWidget};

/// Shorthand for drawing a route map into the current layout
#[cfg(feature = "egui")]
pub trait UiMapExt {
    /// Glyph-only rendering, no textures
    fn route_map(&mut self, map: &crate::core::map::Map) -> egui::Response;

    /// Tiles and icon images from `imagery`
    fn route_map_with(
        &mut self,
        map: &crate::core::map::Map,
        imagery: &mut MapImagery,
    ) -> egui::Response;
}

#[cfg(feature = "egui")]
impl UiMapExt for egui::Ui {
    fn route_map(&mut self, map: &crate::core::map::Map) -> egui::Response {
        self.add(RouteMapWidget::new(map))
    }

    fn route_map_with(
        &mut self,
        map: &crate::core::map::Map,
        imagery: &mut MapImagery,
    ) -> egui::Response {
        self.add(RouteMapWidget::new(map).imagery(imagery))
    }
}
