use crate::core::geo::Point;
use crate::core::projection::Projection;

/// Overlay and selection collaborator.
///
/// It sees gestures before the map does: returning true from one of the
/// gesture hooks consumes the gesture and the map leaves its state alone.
pub trait OverlayManager {
    /// Screen point of a selectable item near (`x`, `y`) that the map
    /// should re-center on after a zoom, if any
    fn try_snap_to_item(&mut self, x: f64, y: f64, projection: &Projection) -> Option<Point>;

    fn on_down(&mut self, _position: Point, _projection: &Projection) -> bool {
        false
    }

    fn on_scroll(&mut self, _distance: Point, _projection: &Projection) -> bool {
        false
    }

    fn on_fling(&mut self, _velocity: Point, _projection: &Projection) -> bool {
        false
    }

    fn on_double_tap(&mut self, _position: Point, _projection: &Projection) -> bool {
        false
    }
}

/// Overlay manager with nothing on the map
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverlays;

impl OverlayManager for NoOverlays {
    fn try_snap_to_item(&mut self, _x: f64, _y: f64, _projection: &Projection) -> Option<Point> {
        None
    }
}
