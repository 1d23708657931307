use crate::core::geo::{GeoPoint, Point};
use crate::core::scroll::ScrollableArea;
use crate::core::tile_system::TileSystem;
use serde::{Deserialize, Serialize};

/// The committed visual state of a map view.
///
/// Fields are private: the map view mutates them through the zoom, scroll
/// and gesture paths so the center and the scroll offset never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Geographic point under the middle of the screen
    center: GeoPoint,
    /// Continuous zoom level
    zoom_level: f64,
    /// Map rotation in degrees, `[0, 360)`
    orientation: f64,
    /// World pixel at the screen's top-left corner, current zoom
    scroll_offset: Point,
    /// Pinch preview scale, 1.0 when no preview is active
    multi_touch_scale: f64,
    /// Screen point the preview scale is applied around
    multi_touch_scale_point: Point,
    scrollable_area: Option<ScrollableArea>,
}

impl ViewportState {
    pub fn new(center: GeoPoint, zoom_level: f64) -> Self {
        Self {
            center,
            zoom_level,
            orientation: 0.0,
            scroll_offset: Point::default(),
            multi_touch_scale: 1.0,
            multi_touch_scale_point: Point::default(),
            scrollable_area: None,
        }
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    pub fn scroll_offset(&self) -> Point {
        self.scroll_offset
    }

    pub fn multi_touch_scale(&self) -> f64 {
        self.multi_touch_scale
    }

    pub fn multi_touch_scale_point(&self) -> Point {
        self.multi_touch_scale_point
    }

    pub fn scrollable_area(&self) -> Option<&ScrollableArea> {
        self.scrollable_area.as_ref()
    }

    pub(crate) fn set_zoom_level(&mut self, zoom_level: f64) {
        self.zoom_level = zoom_level;
    }

    /// Stores the orientation normalized to `[0, 360)`
    pub(crate) fn set_orientation(&mut self, degrees: f64) {
        self.orientation = degrees.rem_euclid(360.0);
    }

    pub(crate) fn set_multi_touch_scale(&mut self, scale: f64, point: Point) {
        self.multi_touch_scale = scale;
        self.multi_touch_scale_point = point;
    }

    pub(crate) fn reset_multi_touch_scale(&mut self) {
        self.multi_touch_scale = 1.0;
    }

    pub(crate) fn set_scrollable_area(&mut self, area: Option<ScrollableArea>) {
        self.scrollable_area = area;
    }

    /// Places `center` in the middle of a `width` x `height` screen,
    /// subject to the scrollable area. Returns the committed scroll offset.
    pub(crate) fn place_center(
        &mut self,
        center: GeoPoint,
        tile_system: &TileSystem,
        width: f64,
        height: f64,
    ) -> Point {
        let world = tile_system.geo_to_world_pixel(&center, self.zoom_level);
        let desired = Point::new(world.x - width / 2.0, world.y - height / 2.0);
        let committed = self.place_scroll(desired, tile_system, width, height);
        if committed == desired {
            // Keep the exact requested center instead of a round-tripped one
            self.center = GeoPoint::new(center.lat, center.lon);
        }
        committed
    }

    /// Commits a top-left scroll offset after clamping, deriving the center
    /// from it. Returns the committed offset.
    pub(crate) fn place_scroll(
        &mut self,
        offset: Point,
        tile_system: &TileSystem,
        width: f64,
        height: f64,
    ) -> Point {
        let committed = match &self.scrollable_area {
            Some(area) => area.clamp(offset, self.zoom_level, tile_system, width, height),
            None => Self::wrap_offset(offset, tile_system.world_size(self.zoom_level), width),
        };
        self.scroll_offset = committed;
        let middle = Point::new(committed.x + width / 2.0, committed.y + height / 2.0);
        self.center = tile_system.world_pixel_to_geo(&middle, self.zoom_level);
        committed
    }

    /// Shifts `offset.x` by whole worlds so the screen middle is on the
    /// primary copy of the world
    fn wrap_offset(offset: Point, world: f64, width: f64) -> Point {
        let middle = offset.x + width / 2.0;
        let shift = (middle / world).floor() * world;
        Point::new(offset.x - shift, offset.y)
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(GeoPoint::default(), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::BoundingBox;

    #[test]
    fn test_place_center_keeps_exact_center() {
        let ts = TileSystem::default();
        let mut state = ViewportState::new(GeoPoint::default(), 4.0);
        let target = GeoPoint::new(48.8566, 2.3522);
        let offset = state.place_center(target, &ts, 300.0, 200.0);

        assert_eq!(state.center(), target);
        let world = ts.geo_to_world_pixel(&target, 4.0);
        assert!((offset.x - (world.x - 150.0)).abs() < 1e-9);
        assert!((offset.y - (world.y - 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_place_scroll_derives_center() {
        let ts = TileSystem::default();
        let mut state = ViewportState::new(GeoPoint::default(), 3.0);
        state.place_scroll(Point::new(1024.0 - 128.0, 1024.0 - 128.0), &ts, 256.0, 256.0);
        assert!(state.center().lat.abs() < 1e-9);
        assert!(state.center().lon.abs() < 1e-9);
    }

    #[test]
    fn test_scroll_wraps_around_world() {
        let ts = TileSystem::default();
        let mut state = ViewportState::new(GeoPoint::default(), 1.0);
        let committed = state.place_scroll(Point::new(512.0 + 100.0, 0.0), &ts, 100.0, 100.0);
        assert!((committed.x - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_scrollable_area_clamps_center() {
        let ts = TileSystem::default();
        let mut state = ViewportState::new(GeoPoint::default(), 3.0);
        state.set_scrollable_area(Some(ScrollableArea::new(
            BoundingBox::new(1.0, -1.0, 1.0, -1.0),
            &ts,
        )));
        state.place_center(GeoPoint::new(30.0, 30.0), &ts, 256.0, 256.0);
        assert!(state.center().lat.abs() < 1e-6);
        assert!(state.center().lon.abs() < 1e-6);
    }

    #[test]
    fn test_orientation_normalized() {
        let mut state = ViewportState::default();
        state.set_orientation(-90.0);
        assert_eq!(state.orientation(), 270.0);
        state.set_orientation(720.0);
        assert_eq!(state.orientation(), 0.0);
    }
}
