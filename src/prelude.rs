//! Prelude module for common rocketmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use rocketmap::prelude::*;`

pub use crate::core::{
    config::{IconSet, MapViewConfig, PacingMode, RouteConfig},
    events::MapEvent,
    geo::{initial_bearing, LatLng, Point},
    map::Map,
    viewport::Viewport,
};

pub use crate::layers::{
    base::{LayerTrait, LayerType},
    marker::{Icon, Marker},
    tile::{TileLayer, TileLayerOptions},
};

pub use crate::animation::{
    LinearMotion, ManualTicks, MotionPlan, MotionState, RocketController, Step, TickSource,
    WallClockTicks,
};

#[cfg(feature = "tokio-runtime")]
pub use crate::animation::TokioTicks;

pub use crate::component::RouteMapComponent;

pub use crate::tiles::{visible_tiles, TileCache, TileCoord, TilePlacement};

#[cfg(feature = "tiles")]
pub use crate::tiles::TileLoader;

pub use crate::ui::{format_coordinate, Document, InfoPanel};

#[cfg(feature = "egui")]
pub use crate::ui::{MapImagery, RouteMapStyle, RouteMapWidget, UiMapExt};

pub use crate::{Error as MapError, Result};

pub use std::time::Duration;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
