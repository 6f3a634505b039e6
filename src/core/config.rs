//! Configuration for the route map
//!
//! Every value the route component uses is configurable here. The defaults
//! describe the Chittagong demo route; a JSON document can override any
//! subset of fields.

use crate::core::constants::{
    DEFAULT_CONTAINER_ID, DEFAULT_END, DEFAULT_REFRESH_RATE, DEFAULT_SPEED_KMH, DEFAULT_START,
    DEFAULT_ZOOM, ENDPOINT_ICON_SIZE, ROCKET_ICON_SIZE,
};
use crate::core::geo::LatLng;
use crate::layers::tile::TileLayerOptions;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the per-tick step is derived from the route's travel time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacingMode {
    /// `ticks = total_time_s * refresh_rate / 1000`. The rocket crosses the
    /// route roughly 1000x faster than the configured speed.
    #[default]
    Literal,
    /// `ticks = total_time_s * refresh_rate`, so the rocket travels at the
    /// configured speed.
    Physical,
}

impl PacingMode {
    /// Number of ticks needed to cover a route taking `total_time_s`.
    pub fn tick_count(self, total_time_s: f64, refresh_rate: u32) -> f64 {
        match self {
            Self::Literal => total_time_s * refresh_rate as f64 / 1000.0,
            Self::Physical => total_time_s * refresh_rate as f64,
        }
    }
}

/// Image assets for the three markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconSet {
    pub start: String,
    pub end: String,
    pub rocket: String,
    pub endpoint_size: (u32, u32),
    pub rocket_size: (u32, u32),
}

impl Default for IconSet {
    fn default() -> Self {
        Self {
            start: "assets/point2.png".to_string(),
            end: "assets/point.png".to_string(),
            rocket: "assets/rocket.png".to_string(),
            endpoint_size: ENDPOINT_ICON_SIZE,
            rocket_size: ROCKET_ICON_SIZE,
        }
    }
}

/// Map view settings applied when the component mounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapViewConfig {
    /// Id of the host container the map binds to
    pub container: String,
    pub zoom: f64,
    pub tile: TileLayerOptions,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            container: DEFAULT_CONTAINER_ID.to_string(),
            zoom: DEFAULT_ZOOM,
            tile: TileLayerOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub start: LatLng,
    pub end: LatLng,
    /// Travel speed in km/h
    pub speed_kmh: u32,
    /// Position updates per second
    pub refresh_rate: u32,
    pub pacing: PacingMode,
    pub map: MapViewConfig,
    pub icons: IconSet,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START.into(),
            end: DEFAULT_END.into(),
            speed_kmh: DEFAULT_SPEED_KMH,
            refresh_rate: DEFAULT_REFRESH_RATE,
            pacing: PacingMode::default(),
            map: MapViewConfig::default(),
            icons: IconSet::default(),
        }
    }
}

impl RouteConfig {
    /// Parses a JSON document; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading route config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, point) in [("start", self.start), ("end", self.end)] {
            if !point.is_valid() {
                return Err(MapError::InvalidCoordinates(format!(
                    "{name} ({}, {}) is out of range",
                    point.lat, point.lng
                )));
            }
        }
        if self.speed_kmh == 0 {
            return Err(MapError::Config("speed_kmh must be positive".to_string()));
        }
        if self.refresh_rate == 0 {
            return Err(MapError::Config("refresh_rate must be positive".to_string()));
        }
        if !self.map.zoom.is_finite()
            || self.map.zoom < 0.0
            || self.map.zoom > self.map.tile.max_zoom as f64
        {
            return Err(MapError::Config(format!(
                "zoom {} outside 0..={}",
                self.map.zoom, self.map.tile.max_zoom
            )));
        }
        if self.map.container.is_empty() {
            return Err(MapError::Config("container id is empty".to_string()));
        }
        Ok(())
    }
}
