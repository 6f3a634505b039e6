use crate::core::constants::{DEFAULT_MAX_ZOOM, TILE_SIZE};
use crate::core::geo::{LatLng, Point};
use serde::{Deserialize, Serialize};

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        let max_zoom = DEFAULT_MAX_ZOOM as f64;
        Self {
            center,
            zoom: zoom.clamp(0.0, max_zoom),
            size,
            min_zoom: 0.0,
            max_zoom,
        }
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.center = center;
        self.set_zoom(zoom);
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Projects geographical coordinates to world pixel coordinates at the
    /// current zoom (Web Mercator, EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        let scale = TILE_SIZE as f64 * 2_f64.powf(self.zoom);
        let mercator = lat_lng.to_mercator();
        let half_circumference = std::f64::consts::PI * 6_378_137.0;

        Point::new(
            (mercator.x + half_circumference) / (2.0 * half_circumference) * scale,
            (half_circumference - mercator.y) / (2.0 * half_circumference) * scale,
        )
    }

    /// Converts geographical coordinates to container pixels, with the view
    /// center at the middle of the container
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let offset = self.project(lat_lng).subtract(&self.project(&self.center));
        offset.add(&self.size.multiply(0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = Viewport::new(LatLng::default(), 25.0, Point::new(800.0, 600.0));
        assert_eq!(viewport.zoom, 18.0);

        viewport.set_zoom_limits(2.0, 16.0);
        assert_eq!(viewport.zoom, 16.0);
        viewport.set_zoom(1.0);
        assert_eq!(viewport.zoom, 2.0);
    }

    #[test]
    fn test_center_maps_to_middle() {
        let center = LatLng::new(22.1696, 91.4996);
        let viewport = Viewport::new(center, 11.0, Point::new(800.0, 600.0));
        let pixel = viewport.lat_lng_to_pixel(&center);
        assert!((pixel.x - 400.0).abs() < 1e-6);
        assert!((pixel.y - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_north_east_is_up_right() {
        let center = LatLng::new(22.1696, 91.4996);
        let viewport = Viewport::new(center, 11.0, Point::new(800.0, 600.0));
        let pixel = viewport.lat_lng_to_pixel(&LatLng::new(22.2637, 91.7159));
        assert!(pixel.x > 400.0);
        assert!(pixel.y < 300.0);
    }

    #[test]
    fn test_world_size_at_zoom_zero() {
        let viewport = Viewport::new(LatLng::default(), 0.0, Point::new(256.0, 256.0));
        let origin = viewport.project(&LatLng::new(0.0, -180.0));
        assert!(origin.x.abs() < 1e-9);
        assert!((viewport.project(&LatLng::default()).y - 128.0).abs() < 1e-9);
    }
}
