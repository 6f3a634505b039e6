use crate::{
    core::constants::{DEFAULT_ATTRIBUTION, DEFAULT_MAX_ZOOM, DEFAULT_TILE_URL, TILE_SIZE},
    layers::base::{LayerProperties, LayerTrait, LayerType},
    Result,
};

/// Configuration for a tile layer
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TileLayerOptions {
    /// URL template for tiles (e.g., "http://{s}.tile.osm.org/{z}/{x}/{y}.png")
    pub url_template: String,
    /// Available subdomains for load balancing
    pub subdomains: Vec<String>,
    /// Attribution text
    pub attribution: String,
    /// Tile size in pixels
    pub tile_size: u32,
    /// Maximum zoom level for this tile source
    pub max_zoom: u8,
    /// Minimum zoom level for this tile source
    pub min_zoom: u8,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_TILE_URL.to_string(),
            subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            tile_size: TILE_SIZE,
            max_zoom: DEFAULT_MAX_ZOOM,
            min_zoom: 0,
        }
    }
}

/// Background imagery layer. Tiles are addressed, not fetched: a front end
/// asks for [`TileLayer::tile_url`] and draws what it downloads.
pub struct TileLayer {
    properties: LayerProperties,
    options: TileLayerOptions,
}

impl TileLayer {
    /// Create a new tile layer with the default OpenStreetMap template
    pub fn new(id: String, name: String) -> Self {
        Self::with_options(id, name, TileLayerOptions::default())
    }

    /// Create a new tile layer with custom options
    pub fn with_options(id: String, name: String, options: TileLayerOptions) -> Self {
        let properties = LayerProperties::new(id, name, LayerType::Tile);
        Self {
            properties,
            options,
        }
    }

    pub fn tile_options(&self) -> &TileLayerOptions {
        &self.options
    }

    pub fn attribution(&self) -> &str {
        &self.options.attribution
    }

    pub fn max_zoom(&self) -> u8 {
        self.options.max_zoom
    }

    /// Expands the URL template for one tile. Subdomains rotate on `x + y`
    /// so neighbouring tiles spread over hosts.
    pub fn tile_url(&self, x: u32, y: u32, z: u8) -> String {
        let subdomain = if self.options.subdomains.is_empty() {
            ""
        } else {
            let idx = (x as u64 + y as u64) % self.options.subdomains.len() as u64;
            self.options.subdomains[idx as usize].as_str()
        };

        self.options
            .url_template
            .replace("{s}", subdomain)
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(TileLayer, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::to_value(&self.options).unwrap_or(serde_json::Value::Null)
    }

    fn set_options(&mut self, options: serde_json::Value) -> Result<()> {
        self.options = serde_json::from_value(options)?;
        Ok(())
    }
}
