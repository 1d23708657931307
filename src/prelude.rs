//! Prelude module for common mapview types and traits
//!
//! `use mapview::prelude::*;` brings in the map view, its builder and
//! configuration, the geometry types and the collaborator traits.

pub use crate::core::{
    bounds::Bounds,
    builder::MapViewBuilder,
    config::MapViewConfig,
    geo::{BoundingBox, GeoPoint, Point},
    map::MapView,
    projection::Projection,
    redraw::{RedrawHandle, RedrawRequest},
    scroll::ScrollableArea,
    tile_system::TileSystem,
    viewport::ViewportState,
};

pub use crate::input::{
    FlingHandler, GestureEvent, MapEvent, MapEventKind, PanHandler, PinchHandler, TapHandler,
};

pub use crate::layers::{NoOverlays, OverlayManager};

pub use crate::layout::{Alignment, ChildFrame, ChildId, LayoutAnchor, MapChild};

pub use crate::tiles::{BasicTileProvider, TileProvider, TileSource, XyzTileSource};

pub use crate::animation::{EasingType, ZoomTarget};

pub use crate::traits::Lerp;

pub use crate::{Error as MapError, Result};

pub use instant::{Duration, Instant};
