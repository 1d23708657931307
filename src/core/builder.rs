//! Fluent construction of [`MapView`] instances.

use crate::{
    core::{
        config::MapViewConfig,
        geo::{BoundingBox, GeoPoint},
        map::MapView,
    },
    layers::{NoOverlays, OverlayManager},
    tiles::{BasicTileProvider, TileProvider},
    MapError, Result,
};

/// Builder for creating and configuring [`MapView`] instances
pub struct MapViewBuilder {
    center: GeoPoint,
    zoom: Option<f64>,
    orientation: f64,
    size: Option<(f64, f64)>,
    config: MapViewConfig,
    tile_provider: Option<Box<dyn TileProvider>>,
    overlays: Option<Box<dyn OverlayManager>>,
    scrollable_area: Option<BoundingBox>,
}

impl MapViewBuilder {
    pub fn new() -> Self {
        Self {
            center: GeoPoint::default(),
            zoom: None,
            orientation: 0.0,
            size: None,
            config: MapViewConfig::default(),
            tile_provider: None,
            overlays: None,
            scrollable_area: None,
        }
    }

    pub fn center(mut self, center: GeoPoint) -> Self {
        self.center = center;
        self
    }

    /// Initial zoom, clamped to the effective range. Defaults to the minimum.
    pub fn zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn orientation(mut self, degrees: f64) -> Self {
        self.orientation = degrees;
        self
    }

    /// Screen size; when given, the first layout runs during `build`
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn config(mut self, config: MapViewConfig) -> Self {
        self.config = config;
        self
    }

    pub fn min_zoom_level(mut self, level: f64) -> Self {
        self.config.min_zoom_level = Some(level);
        self
    }

    pub fn max_zoom_level(mut self, level: f64) -> Self {
        self.config.max_zoom_level = Some(level);
        self
    }

    pub fn tile_provider(mut self, provider: Box<dyn TileProvider>) -> Self {
        self.tile_provider = Some(provider);
        self
    }

    pub fn overlays(mut self, overlays: Box<dyn OverlayManager>) -> Self {
        self.overlays = Some(overlays);
        self
    }

    pub fn scrollable_area(mut self, area: BoundingBox) -> Self {
        self.scrollable_area = Some(area);
        self
    }

    /// Build the map view
    pub fn build(self) -> Result<MapView> {
        if !self.center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "center ({}, {}) is out of range",
                self.center.lat, self.center.lon
            ))
            .into());
        }
        if !self.orientation.is_finite() {
            return Err(MapError::InvalidConfig(format!(
                "orientation {} is not finite",
                self.orientation
            ))
            .into());
        }

        let provider = self
            .tile_provider
            .unwrap_or_else(|| Box::new(BasicTileProvider::default()));
        let overlays = self.overlays.unwrap_or_else(|| Box::new(NoOverlays));
        let mut map = MapView::new(provider, overlays, self.config)?;

        if self.scrollable_area.is_some() {
            map.set_scrollable_area_limit(self.scrollable_area);
        }
        if let Some(zoom) = self.zoom {
            map.set_zoom_level(zoom);
        }
        map.set_center(self.center);
        if self.orientation != 0.0 {
            map.set_orientation(self.orientation);
        }
        if let Some((width, height)) = self.size {
            map.on_layout(width, height);
        }
        Ok(map)
    }
}

impl Default for MapViewBuilder {
    fn default() -> Self {
        Self::new()
    }
}
