use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Mean Earth radius used for marker distances, matching the browser map
/// library's `CRS.Earth.R`.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Web Mercator sphere radius
const MERCATOR_RADIUS: f64 = 6_378_137.0;
const MAX_LATITUDE: f64 = 85.0511287798;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Great-circle distance in meters (haversine)
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS * c
    }

    /// Initial compass bearing towards `other`, see [`initial_bearing`]
    pub fn bearing_to(&self, other: &LatLng) -> f64 {
        initial_bearing(*self, *other)
    }

    /// Clamps latitude to the Web Mercator range
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Converts to Web Mercator projection (EPSG:3857)
    pub fn to_mercator(&self) -> Point {
        let x = self.lng.to_radians() * MERCATOR_RADIUS;
        let lat = Self::clamp_lat(self.lat);
        let y = ((PI / 4.0 + lat.to_radians() / 2.0).tan().ln()) * MERCATOR_RADIUS;
        Point::new(x, y)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl From<LatLng> for geo_types::Point<f64> {
    fn from(lat_lng: LatLng) -> Self {
        geo_types::Point::new(lat_lng.lng, lat_lng.lat)
    }
}

/// Initial compass bearing in degrees, in `[0, 360)`, from `start` to `end`.
///
/// Uses the spherical forward-azimuth formula. Coincident points have no
/// defined heading and yield `0.0`.
pub fn initial_bearing(start: LatLng, end: LatLng) -> f64 {
    if start == end {
        return 0.0;
    }

    let start_lat = start.lat.to_radians();
    let start_lng = start.lng.to_radians();
    let end_lat = end.lat.to_radians();
    let end_lng = end.lng.to_radians();

    let y = (end_lng - start_lng).sin() * end_lat.cos();
    let x = start_lat.cos() * end_lat.sin()
        - start_lat.sin() * end_lat.cos() * (end_lng - start_lng).cos();
    let bearing = y.atan2(x).to_degrees();

    let normalized = (bearing + 360.0) % 360.0;
    // -0.0 and values rounding up to 360.0 both fold onto 0
    if normalized >= 360.0 || normalized == 0.0 {
        0.0
    } else {
        normalized
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
