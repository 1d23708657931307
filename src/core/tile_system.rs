//! Web Mercator math shared by the projection, zoom and scroll code.
//!
//! The tile size is an explicit value rather than a global so that two map
//! views with different tile sources never interfere.

use crate::core::constants::{EARTH_RADIUS, MAX_LONGITUDE, MIN_LONGITUDE, TILE_SIZE};
use crate::core::geo::{BoundingBox, GeoPoint, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Geo to world-pixel conversions for one tile size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileSystem {
    tile_size: f64,
}

impl TileSystem {
    pub fn new(tile_size: f64) -> Self {
        Self { tile_size }
    }

    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Width and height of the whole world in pixels at `zoom`
    pub fn world_size(&self, zoom: f64) -> f64 {
        self.tile_size * zoom_factor(zoom)
    }

    /// Projects a geographic point to world pixels at `zoom`.
    ///
    /// Latitudes outside the Mercator square are clamped so the result is
    /// always finite. `x` lies in `[0, world_size)`: the antimeridian maps to
    /// the left edge, matching [`TileSystem::world_pixel_to_geo`].
    pub fn geo_to_world_pixel(&self, point: &GeoPoint, zoom: f64) -> Point {
        let size = self.world_size(zoom);
        let x01 = Self::x01_from_longitude(point.lon);
        let x01 = if x01 >= 1.0 { 0.0 } else { x01 };
        Point::new(x01 * size, Self::y01_from_latitude(point.lat) * size)
    }

    /// Inverse of [`TileSystem::geo_to_world_pixel`]. `x` wraps around the
    /// world and `y` is clamped to it.
    pub fn world_pixel_to_geo(&self, pixel: &Point, zoom: f64) -> GeoPoint {
        let size = self.world_size(zoom);
        let x01 = pixel.x.rem_euclid(size) / size;
        let y01 = (pixel.y / size).clamp(0.0, 1.0);
        GeoPoint::new(Self::latitude_from_y01(y01), Self::longitude_from_x01(x01))
    }

    /// Largest continuous zoom at which `bbox` fits a `width` x `height`
    /// viewport, or `None` when it cannot be determined.
    ///
    /// A box with zero span on one axis is fitted on the other axis only.
    pub fn bounding_box_zoom(&self, bbox: &BoundingBox, width: f64, height: f64) -> Option<f64> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        let lat_zoom = self.latitude_zoom(bbox.north, bbox.south, height);
        let lon_zoom = self.longitude_zoom(bbox.east, bbox.west, width);
        match (lat_zoom, lon_zoom) {
            (Some(lat), Some(lon)) => Some(lat.min(lon)),
            (Some(lat), None) => Some(lat),
            (None, Some(lon)) => Some(lon),
            (None, None) => None,
        }
    }

    /// Meters represented by one pixel at `latitude` and `zoom`
    pub fn ground_resolution(&self, latitude: f64, zoom: f64) -> f64 {
        let lat = GeoPoint::clamp_lat(latitude);
        lat.to_radians().cos() * 2.0 * PI * EARTH_RADIUS / self.world_size(zoom)
    }

    fn latitude_zoom(&self, north: f64, south: f64, height: f64) -> Option<f64> {
        let span = Self::y01_from_latitude(south) - Self::y01_from_latitude(north);
        if span <= 0.0 {
            return None;
        }
        Some((height / span / self.tile_size).log2())
    }

    fn longitude_zoom(&self, east: f64, west: f64, width: f64) -> Option<f64> {
        let mut span = Self::x01_from_longitude(east) - Self::x01_from_longitude(west);
        if span < 0.0 {
            span += 1.0;
        }
        if span == 0.0 {
            return None;
        }
        Some((width / span / self.tile_size).log2())
    }

    fn x01_from_longitude(lon: f64) -> f64 {
        let lon = lon.clamp(MIN_LONGITUDE, MAX_LONGITUDE);
        (lon - MIN_LONGITUDE) / (MAX_LONGITUDE - MIN_LONGITUDE)
    }

    fn y01_from_latitude(lat: f64) -> f64 {
        let sin = GeoPoint::clamp_lat(lat).to_radians().sin();
        let y01 = 0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI);
        y01.clamp(0.0, 1.0)
    }

    fn longitude_from_x01(x01: f64) -> f64 {
        MIN_LONGITUDE + (MAX_LONGITUDE - MIN_LONGITUDE) * x01
    }

    fn latitude_from_y01(y01: f64) -> f64 {
        let lat = 90.0 - 360.0 * (-(0.5 - y01) * 2.0 * PI).exp().atan() / PI;
        GeoPoint::clamp_lat(lat)
    }
}

impl Default for TileSystem {
    fn default() -> Self {
        Self::new(TILE_SIZE as f64)
    }
}

/// Scale between two zoom levels `delta` apart
pub fn zoom_factor(delta: f64) -> f64 {
    2f64.powf(delta)
}
