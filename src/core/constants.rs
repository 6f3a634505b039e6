//! Route-map defaults. The browser-era component hard-coded all of these;
//! they now seed [`RouteConfig::default`](crate::core::config::RouteConfig).

/// Launch point of the demo route.
pub const DEFAULT_START: (f64, f64) = (22.1696, 91.4996);

/// Landing point of the demo route.
pub const DEFAULT_END: (f64, f64) = (22.2637, 91.7159);

/// Rocket speed in km/h.
pub const DEFAULT_SPEED_KMH: u32 = 20;

/// Marker position updates per second.
pub const DEFAULT_REFRESH_RATE: u32 = 2;

/// Initial zoom of the map view.
pub const DEFAULT_ZOOM: f64 = 11.0;

/// Highest zoom the background tiles are served at.
pub const DEFAULT_MAX_ZOOM: u8 = 18;

pub const DEFAULT_TILE_URL: &str = "http://{s}.tile.osm.org/{z}/{x}/{y}.png";

pub const DEFAULT_ATTRIBUTION: &str = "Leaflet &copy; OpenStreetMap contributors";

/// Id of the container element the map binds to.
pub const DEFAULT_CONTAINER_ID: &str = "map";

/// Start and end pin size in pixels.
pub const ENDPOINT_ICON_SIZE: (u32, u32) = (40, 40);

/// Rocket icon size in pixels.
pub const ROCKET_ICON_SIZE: (u32, u32) = (50, 50);

/// CSS-style class carried by the rocket's div icon.
pub const ROCKET_ICON_CLASS: &str = "custom-marker";

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Layer ids used by the route component.
pub const TILE_LAYER_ID: &str = "tiles";
pub const START_MARKER_ID: &str = "start";
pub const END_MARKER_ID: &str = "end";
pub const ROCKET_MARKER_ID: &str = "rocket";

/// Fallback marker icon size (regular PNG pin).
pub const MARKER_ICON_SIZE: (u32, u32) = (25, 41);
