use crate::core::bounds::Bounds;
use crate::core::constants::MAX_ZOOM_LEVEL;
use crate::core::geo::{BoundingBox, Point};
use crate::core::tile_system::{zoom_factor, TileSystem};
use serde::{Deserialize, Serialize};

/// Geographic region the viewport may not scroll out of.
///
/// The limit is stored in world pixels at [`MAX_ZOOM_LEVEL`] and scaled down
/// to the current zoom on every clamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollableArea {
    bounds: BoundingBox,
    limit: Bounds,
}

impl ScrollableArea {
    pub fn new(bounds: BoundingBox, tile_system: &TileSystem) -> Self {
        let nw = tile_system.geo_to_world_pixel(&bounds.north_west(), MAX_ZOOM_LEVEL);
        let mut se = tile_system.geo_to_world_pixel(&bounds.south_east(), MAX_ZOOM_LEVEL);
        // East is measured from west so edges on the antimeridian stay ordered
        let span = bounds.longitude_span().min(360.0) / 360.0;
        se.x = nw.x + span * tile_system.world_size(MAX_ZOOM_LEVEL);
        Self {
            bounds,
            limit: Bounds::new(nw, se),
        }
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounds
    }

    /// The limit expressed in world pixels at `zoom`
    pub fn limit_at(&self, zoom: f64) -> Bounds {
        self.limit.scaled_down(zoom_factor(MAX_ZOOM_LEVEL - zoom))
    }

    /// Clamps a top-left scroll offset so the viewport stays over the area.
    ///
    /// On an axis where the area is narrower than the viewport the viewport
    /// is centered over it and the requested coordinate is ignored.
    pub fn clamp(
        &self,
        offset: Point,
        zoom: f64,
        tile_system: &TileSystem,
        width: f64,
        height: f64,
    ) -> Point {
        let limit = self.limit_at(zoom);
        let world = tile_system.world_size(zoom);

        // Pick the world copy of `x` closest to the area before clamping
        let mid = limit.center().x - width / 2.0;
        let x = offset.x - ((offset.x - mid) / world).round() * world;

        Point::new(
            clamp_axis(x, limit.min.x, limit.max.x, width),
            clamp_axis(offset.y, limit.min.y, limit.max.y, height),
        )
    }
}

fn clamp_axis(value: f64, min: f64, max: f64, viewport: f64) -> f64 {
    let span = max - min;
    if span < viewport {
        min - (viewport - span) / 2.0
    } else if value < min {
        min
    } else if value + viewport > max {
        max - viewport
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::GeoPoint;

    #[test]
    fn test_small_area_is_centered() {
        let ts = TileSystem::default();
        let area = ScrollableArea::new(BoundingBox::new(1.0, -1.0, 1.0, -1.0), &ts);
        let zoom = 3.0;
        let limit = area.limit_at(zoom);
        assert!(limit.width() < 256.0);

        let expected = Point::new(
            limit.min.x - (256.0 - limit.width()) / 2.0,
            limit.min.y - (256.0 - limit.height()) / 2.0,
        );
        for request in [
            Point::new(0.0, 0.0),
            Point::new(-5000.0, 900.0),
            Point::new(1234.5, -77.0),
        ] {
            let clamped = area.clamp(request, zoom, &ts, 256.0, 256.0);
            assert!((clamped.x - expected.x).abs() < 1e-6);
            assert!((clamped.y - expected.y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_large_area_edge_clamp() {
        let ts = TileSystem::default();
        let area = ScrollableArea::new(BoundingBox::new(40.0, -40.0, 40.0, -40.0), &ts);
        let zoom = 5.0;
        let limit = area.limit_at(zoom);
        assert!(limit.width() > 256.0);

        let inside = Point::new(limit.min.x + 10.0, limit.min.y + 10.0);
        assert_eq!(area.clamp(inside, zoom, &ts, 256.0, 256.0), inside);

        let left = area.clamp(Point::new(limit.min.x - 100.0, inside.y), zoom, &ts, 256.0, 256.0);
        assert!((left.x - limit.min.x).abs() < 1e-6);

        let bottom = area.clamp(Point::new(inside.x, limit.max.y), zoom, &ts, 256.0, 256.0);
        assert!((bottom.y - (limit.max.y - 256.0)).abs() < 1e-6);
    }

    #[test]
    fn test_limit_scales_with_zoom() {
        let ts = TileSystem::default();
        let area = ScrollableArea::new(BoundingBox::new(10.0, -10.0, 10.0, -10.0), &ts);
        let at_four = area.limit_at(4.0);
        let at_five = area.limit_at(5.0);
        assert!((at_five.width() - 2.0 * at_four.width()).abs() < 1e-6);

        let nw = ts.geo_to_world_pixel(&GeoPoint::new(10.0, -10.0), 4.0);
        assert!((at_four.min.x - nw.x).abs() < 1e-6);
        assert!((at_four.min.y - nw.y).abs() < 1e-6);
    }

    #[test]
    fn test_area_across_date_line() {
        let ts = TileSystem::default();
        let area = ScrollableArea::new(BoundingBox::new(10.0, -10.0, -170.0, 170.0), &ts);
        let limit = area.limit_at(0.0);
        assert!(limit.max.x > 256.0);
        assert!((limit.width() - 256.0 * 20.0 / 360.0).abs() < 1e-6);
    }

    #[test]
    fn test_area_edges_on_antimeridian() {
        let ts = TileSystem::default();
        let east_edge = ScrollableArea::new(BoundingBox::new(10.0, -10.0, 180.0, 170.0), &ts);
        let limit = east_edge.limit_at(0.0);
        assert!((limit.min.x - 256.0 * 350.0 / 360.0).abs() < 1e-6);
        assert!((limit.max.x - 256.0).abs() < 1e-6);

        let whole = ScrollableArea::new(BoundingBox::new(60.0, -60.0, 180.0, -180.0), &ts);
        assert!((whole.limit_at(0.0).width() - 256.0).abs() < 1e-6);
    }
}
