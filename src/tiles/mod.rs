//! Slippy-map tile addressing and the download path for background imagery

pub mod cache;
#[cfg(feature = "tiles")]
pub mod loader;

pub use cache::TileCache;
#[cfg(feature = "tiles")]
pub use loader::TileLoader;

use crate::core::{constants::TILE_SIZE, geo::Point, viewport::Viewport};

/// Deepest tile zoom addressed; keeps `1 << z` inside `u32`
const MAX_TILE_ZOOM: u8 = 30;

/// Tile address in the `{z}/{x}/{y}` scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }
}

/// A tile and the square it covers in container pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    pub coord: TileCoord,
    /// Top-left corner, relative to the container origin
    pub min: Point,
    /// Edge length in pixels; differs from 256 at fractional view zooms
    pub size: f64,
}

/// Tiles covering `viewport`, fetched at the whole zoom nearest the view's
/// zoom within `min_zoom..=max_zoom`. Columns wrap around the antimeridian;
/// rows outside the world are skipped.
pub fn visible_tiles(viewport: &Viewport, min_zoom: u8, max_zoom: u8) -> Vec<TilePlacement> {
    let size = viewport.size;
    if !(size.x > 0.0 && size.y > 0.0) || !viewport.zoom.is_finite() {
        return Vec::new();
    }

    let max_zoom = max_zoom.min(MAX_TILE_ZOOM);
    let z = viewport
        .zoom
        .round()
        .clamp(min_zoom.min(max_zoom) as f64, max_zoom as f64) as u8;
    let tile_px = TILE_SIZE as f64 * 2_f64.powf(viewport.zoom - z as f64);
    let count = 1_i64 << z;

    let origin = viewport
        .project(&viewport.center)
        .subtract(&size.multiply(0.5));
    let first_col = (origin.x / tile_px).floor() as i64;
    let last_col = ((origin.x + size.x) / tile_px).ceil() as i64;
    let first_row = ((origin.y / tile_px).floor() as i64).max(0);
    let last_row = (((origin.y + size.y) / tile_px).ceil() as i64).min(count);

    let mut tiles = Vec::new();
    for ty in first_row..last_row {
        for tx in first_col..last_col {
            tiles.push(TilePlacement {
                coord: TileCoord::new(tx.rem_euclid(count) as u32, ty as u32, z),
                min: Point::new(tx as f64 * tile_px - origin.x, ty as f64 * tile_px - origin.y),
                size: tile_px,
            });
        }
    }
    tiles
}
