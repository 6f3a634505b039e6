//! # rocketmap
//!
//! A route map: a background tile layer, start and end pins, and a rocket
//! marker that travels from one to the other in a straight line at a
//! configured speed, with an info panel summarising the route.
//!
//! The map itself is an in-process model ([`Map`]); front ends draw it. The
//! `egui` feature ships one such front end.

pub mod animation;
pub mod component;
pub mod core;
pub mod layers;
pub mod prelude;
pub mod tiles;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{PacingMode, RouteConfig},
    geo::{initial_bearing, LatLng, Point},
    map::Map,
    viewport::Viewport,
};

pub use animation::{ManualTicks, MotionPlan, MotionState, RocketController, TickSource};

pub use component::RouteMapComponent;

pub use layers::{base::LayerTrait, marker::Marker, tile::TileLayer};

pub use ui::{Document, InfoPanel};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Container already holds a map: {0}")]
    ContainerInUse(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Map has been removed: {0}")]
    MapRemoved(String),
}

/// Error type alias for convenience
pub type Error = MapError;
