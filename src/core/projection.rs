use crate::core::bounds::Bounds;
use crate::core::geo::{BoundingBox, GeoPoint, Point};
use crate::core::tile_system::TileSystem;
use crate::core::viewport::ViewportState;

/// Immutable snapshot of the geo <-> screen transform for one instant.
///
/// Built from a [`ViewportState`] and a screen size; any later change to the
/// state requires building a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    tile_system: TileSystem,
    zoom: f64,
    offset: Point,
    width: f64,
    height: f64,
    orientation: f64,
    scale: f64,
    scale_point: Point,
}

impl Projection {
    pub fn new(state: &ViewportState, tile_system: TileSystem, width: f64, height: f64) -> Self {
        Self {
            tile_system,
            zoom: state.zoom_level(),
            offset: state.scroll_offset(),
            width,
            height,
            orientation: state.orientation(),
            scale: state.multi_touch_scale(),
            scale_point: state.multi_touch_scale_point(),
        }
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom
    }

    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    pub fn scroll_offset(&self) -> Point {
        self.offset
    }

    pub fn tile_system(&self) -> &TileSystem {
        &self.tile_system
    }

    pub fn world_size(&self) -> f64 {
        self.tile_system.world_size(self.zoom)
    }

    pub fn screen_center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Geographic point to rotated and pinch-scaled screen pixels
    pub fn to_screen(&self, point: &GeoPoint) -> Point {
        self.rotate_and_scale_point(&self.to_pixels(point))
    }

    /// Screen pixels back to a geographic point; inverse of [`Projection::to_screen`]
    pub fn from_screen(&self, x: f64, y: f64) -> GeoPoint {
        let unrotated = self.unrotate_and_scale_point(&Point::new(x, y));
        self.tile_system
            .world_pixel_to_geo(&unrotated.add(&self.offset), self.zoom)
    }

    /// Geographic point to screen pixels ignoring rotation and pinch scale.
    ///
    /// The world copy nearest the screen center is used, so points across
    /// the antimeridian land next to the visible area.
    pub fn to_pixels(&self, point: &GeoPoint) -> Point {
        let world = self.tile_system.world_size(self.zoom);
        let mut pixel = self.tile_system.geo_to_world_pixel(point, self.zoom);
        let center_x = self.offset.x + self.width / 2.0;
        pixel.x -= ((pixel.x - center_x) / world).round() * world;
        pixel.subtract(&self.offset)
    }

    pub fn rotate_only(&self, point: &Point) -> Point {
        point.rotate_around(&self.screen_center(), self.orientation)
    }

    pub fn unrotate_only(&self, point: &Point) -> Point {
        point.rotate_around(&self.screen_center(), -self.orientation)
    }

    /// Applies rotation about the screen center, then the pinch scale
    pub fn rotate_and_scale_point(&self, point: &Point) -> Point {
        let rotated = self.rotate_only(point);
        if self.scale == 1.0 {
            return rotated;
        }
        rotated.scale_around(&self.scale_point, self.scale)
    }

    pub fn unrotate_and_scale_point(&self, point: &Point) -> Point {
        let unscaled = if self.scale == 1.0 {
            *point
        } else {
            point.scale_around(&self.scale_point, 1.0 / self.scale)
        };
        self.unrotate_only(&unscaled)
    }

    /// Rotates a screen-space displacement into map space
    pub fn unrotate_vector(&self, dx: f64, dy: f64) -> Point {
        Point::new(dx, dy).rotate_around(&Point::default(), -self.orientation)
    }

    pub fn screen_rect(&self) -> Bounds {
        Bounds::from_size(self.width, self.height)
    }

    /// Axis-aligned rectangle enclosing the rotated viewport
    pub fn expanded_invalidation_rect(&self) -> Bounds {
        let rect = self.screen_rect();
        if self.orientation == 0.0 || self.orientation == 180.0 {
            return rect;
        }
        rect.rotated_bounding_box(&self.screen_center(), self.orientation)
            .round_out()
    }

    /// Geographic bounds of the visible area.
    ///
    /// Longitudes are resolved relative to the screen center; a view wider
    /// than the world reports the full `[-180, 180]` range.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut world_rect = Bounds::empty();
        for corner in self.screen_rect().corners() {
            let unrotated = self.unrotate_and_scale_point(&corner);
            world_rect.extend(&unrotated.add(&self.offset));
        }

        let north = self.tile_system.world_pixel_to_geo(&world_rect.min, self.zoom).lat;
        let south = self.tile_system.world_pixel_to_geo(&world_rect.max, self.zoom).lat;
        if world_rect.width() >= self.world_size() {
            return BoundingBox::new(north, south, 180.0, -180.0);
        }
        let west = self.tile_system.world_pixel_to_geo(&world_rect.min, self.zoom).lon;
        let east = self.tile_system.world_pixel_to_geo(&world_rect.max, self.zoom).lon;
        BoundingBox::new(north, south, east, west)
    }
}
