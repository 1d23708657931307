use crate::animation::scroller::Scroller;
use crate::core::bounds::Bounds;
use crate::core::geo::Point;
use instant::Instant;

/// Whether a fling is currently moving the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlingPhase {
    Idle,
    Flinging,
}

/// Fling state machine around a [`Scroller`].
///
/// The scroller runs in its own coordinates starting at the origin; each
/// advance yields the delta to scroll by since the previous one.
#[derive(Debug, Clone)]
pub struct FlingState {
    scroller: Scroller,
    last: Point,
    phase: FlingPhase,
    enabled: bool,
    suppress_next: bool,
}

impl FlingState {
    pub fn new(deceleration: f64, enabled: bool) -> Self {
        Self {
            scroller: Scroller::new(deceleration),
            last: Point::default(),
            phase: FlingPhase::Idle,
            enabled,
            suppress_next: false,
        }
    }

    pub fn phase(&self) -> FlingPhase {
        self.phase
    }

    pub fn is_flinging(&self) -> bool {
        self.phase == FlingPhase::Flinging
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Swallow the next fling request
    pub fn suppress_next(&mut self) {
        self.suppress_next = true;
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppress_next
    }

    /// Checks whether a fling may start, consuming a pending suppression
    pub fn accept(&mut self) -> bool {
        if !self.enabled || self.suppress_next {
            self.suppress_next = false;
            return false;
        }
        true
    }

    /// Seeds the momentum model; travel is limited to one world size on
    /// each axis
    pub fn start(&mut self, velocity: Point, world_size: f64, now: Instant) {
        let bounds = Bounds::from_coords(-world_size, -world_size, world_size, world_size);
        self.scroller.fling(Point::default(), velocity, bounds, now);
        self.last = Point::default();
        self.phase = FlingPhase::Flinging;
    }

    /// Advances the fling, returning the scroll delta to apply. The last
    /// delta lands exactly on the final position and returns to idle.
    pub fn advance(&mut self, now: Instant) -> Option<Point> {
        if self.phase != FlingPhase::Flinging {
            return None;
        }
        if !self.scroller.compute_scroll_offset(now) {
            self.phase = FlingPhase::Idle;
            return None;
        }
        let current = self.scroller.current();
        let delta = current.subtract(&self.last);
        self.last = current;
        if self.scroller.is_finished() {
            self.phase = FlingPhase::Idle;
        }
        Some(delta)
    }

    /// Stops the fling immediately
    pub fn abort(&mut self) {
        self.scroller.force_finished();
        self.phase = FlingPhase::Idle;
    }
}
