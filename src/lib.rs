//! # mapview
//!
//! A map viewport engine: Web Mercator projection, scroll and zoom state,
//! rotation, fling and pinch gestures, zoom animations and placement of
//! geo-anchored child elements.
//!
//! Tile loading and overlay drawing stay outside the engine, behind the
//! [`TileProvider`] and [`OverlayManager`] traits.

pub mod animation;
pub mod core;
pub mod input;
pub mod layers;
pub mod layout;
pub mod prelude;
pub mod tiles;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    builder::MapViewBuilder,
    config::MapViewConfig,
    geo::{BoundingBox, GeoPoint, Point},
    map::MapView,
    projection::Projection,
    redraw::{RedrawHandle, RedrawRequest},
    tile_system::TileSystem,
    viewport::ViewportState,
};

pub use layers::{NoOverlays, OverlayManager};

pub use layout::{Alignment, ChildFrame, ChildId, LayoutAnchor, MapChild};

pub use input::{GestureEvent, MapEvent, MapEventKind};

pub use tiles::{BasicTileProvider, TileProvider, TileSource, XyzTileSource};

pub use animation::{EasingType, ZoomTarget};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid zoom range: min {min} is above max {max}")]
    InvalidZoomRange { min: f64, max: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown child: {0}")]
    UnknownChild(ChildId),

    #[error("Tile provider error: {0}")]
    TileProvider(String),
}

pub type Error = MapError;
