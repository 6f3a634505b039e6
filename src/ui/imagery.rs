//! Textures behind the map widget: downloaded tiles and marker icons

use crate::{
    layers::tile::TileLayer,
    prelude::HashMap,
    tiles::{TileCache, TileCoord, TileLoader},
};
use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use std::path::Path;

/// Owns tile and icon textures across frames.
///
/// Tiles are requested on first sight and drawn once their download has
/// been decoded. Icons are read from disk on first use; an icon that cannot
/// be read is remembered as missing and the widget falls back to a glyph.
pub struct MapImagery {
    tiles: TileCache<TextureHandle>,
    loader: Option<TileLoader>,
    icons: HashMap<String, Option<TextureHandle>>,
}

impl MapImagery {
    /// Imagery with background tile downloads
    pub fn new() -> Self {
        let loader = match TileLoader::new() {
            Ok(loader) => Some(loader),
            Err(e) => {
                log::warn!("tile downloads disabled: {e}");
                None
            }
        };
        Self::with_loader(loader)
    }

    /// Imagery that draws icons but never downloads tiles
    pub fn offline() -> Self {
        Self::with_loader(None)
    }

    pub fn with_loader(loader: Option<TileLoader>) -> Self {
        Self {
            tiles: TileCache::default(),
            loader,
            icons: HashMap::default(),
        }
    }

    /// Turns finished downloads into textures. Call once per frame.
    pub fn receive(&mut self, ctx: &Context) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };
        for (coord, bytes) in loader.drain() {
            match decode_image(&bytes) {
                Some(image) => {
                    let texture = ctx.load_texture(
                        format!("tile_{}_{}_{}", coord.z, coord.x, coord.y),
                        image,
                        TextureOptions::LINEAR,
                    );
                    self.tiles.insert(coord, texture);
                }
                None => log::warn!("tile {coord:?} is not a readable image"),
            }
        }
    }

    /// Texture for `coord` if it has arrived; otherwise asks `layer` for its
    /// URL and starts the download.
    pub fn tile(&mut self, layer: &TileLayer, coord: TileCoord) -> Option<&TextureHandle> {
        if !self.tiles.contains(&coord) {
            if let Some(loader) = self.loader.as_mut() {
                loader.request(coord, layer.tile_url(coord.x, coord.y, coord.z));
            }
            return None;
        }
        self.tiles.get(&coord)
    }

    /// Texture for the icon at `path`, loading it on first use
    pub fn icon(&mut self, ctx: &Context, path: &str) -> Option<&TextureHandle> {
        self.icons
            .entry(path.to_string())
            .or_insert_with(|| {
                let image = load_icon(Path::new(path))?;
                Some(ctx.load_texture(format!("icon_{path}"), image, TextureOptions::LINEAR))
            })
            .as_ref()
    }

    /// Whether downloads are still outstanding
    pub fn is_loading(&self) -> bool {
        self.loader
            .as_ref()
            .is_some_and(|loader| loader.in_flight() > 0)
    }

    pub fn cached_tiles(&self) -> usize {
        self.tiles.len()
    }
}

impl Default for MapImagery {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes PNG or JPEG bytes into an egui image
pub fn decode_image(bytes: &[u8]) -> Option<ColorImage> {
    let image = image::load_from_memory(bytes).ok()?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Some(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

fn load_icon(path: &Path) -> Option<ColorImage> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("icon {} unavailable: {e}", path.display());
            return None;
        }
    };
    let image = decode_image(&bytes);
    if image.is_none() {
        log::warn!("icon {} is not a readable image", path.display());
    }
    image
}
