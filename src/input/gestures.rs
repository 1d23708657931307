use crate::core::geo::Point;
use crate::input::events::GestureEvent;
use crate::input::fling::FlingState;
use instant::Instant;

/// Receives single-finger panning
pub trait PanHandler {
    /// A finger touched down; stops any running fling
    fn on_down(&mut self, position: Point) -> bool;
    /// Scrolls the content by `distance` screen pixels
    fn on_scroll(&mut self, distance: Point) -> bool;
}

/// Receives two-finger scale gestures
pub trait PinchHandler {
    fn on_pinch_start(&mut self, focus: Point) -> bool;
    /// Updates the preview scale without committing a zoom
    fn on_pinch_update(&mut self, scale: f64) -> bool;
    /// Converts the preview scale into a committed zoom change
    fn on_pinch_end(&mut self) -> bool;
}

pub trait FlingHandler {
    /// Starts momentum scrolling from a release `velocity` in px/s
    fn on_fling(&mut self, velocity: Point, now: Instant) -> bool;
}

pub trait TapHandler {
    fn on_double_tap(&mut self, position: Point) -> bool;
}

/// Routes a recognized gesture to the matching handler capability.
/// Returns whether the gesture was consumed.
pub fn dispatch<H>(handler: &mut H, event: &GestureEvent, now: Instant) -> bool
where
    H: PanHandler + PinchHandler + FlingHandler + TapHandler,
{
    match *event {
        GestureEvent::Down { position } => handler.on_down(position),
        GestureEvent::Scroll { distance } => handler.on_scroll(distance),
        GestureEvent::Fling { velocity } => handler.on_fling(velocity, now),
        GestureEvent::PinchStart { focus } => handler.on_pinch_start(focus),
        GestureEvent::PinchUpdate { scale } => handler.on_pinch_update(scale),
        GestureEvent::PinchEnd => handler.on_pinch_end(),
        GestureEvent::DoubleTap { position } => handler.on_double_tap(position),
    }
}

/// Pinch preview state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinchState {
    Idle,
    Pinching { focus: Point },
}

/// Gesture state owned by a map view: the fling and pinch state machines
/// plus the focal point of the pinch currently being committed.
#[derive(Debug, Clone)]
pub struct GestureCoordinator {
    pub fling: FlingState,
    pub pinch: PinchState,
    multi_touch_enabled: bool,
    zoom_sensitivity: f64,
}

impl GestureCoordinator {
    pub fn new(
        fling_deceleration: f64,
        fling_enabled: bool,
        multi_touch_enabled: bool,
        zoom_sensitivity: f64,
    ) -> Self {
        Self {
            fling: FlingState::new(fling_deceleration, fling_enabled),
            pinch: PinchState::Idle,
            multi_touch_enabled,
            zoom_sensitivity,
        }
    }

    pub fn is_multi_touch_enabled(&self) -> bool {
        self.multi_touch_enabled
    }

    pub fn set_multi_touch_enabled(&mut self, enabled: bool) {
        self.multi_touch_enabled = enabled;
        if !enabled {
            self.pinch = PinchState::Idle;
        }
    }

    pub fn pinch_focus(&self) -> Option<Point> {
        match self.pinch {
            PinchState::Pinching { focus } => Some(focus),
            PinchState::Idle => None,
        }
    }

    /// Zoom delta for a released pinch of `scale`.
    ///
    /// A sensitivity of 1.0 maps a 2x spread to exactly one level.
    pub fn scale_to_zoom_delta(&self, scale: f64) -> f64 {
        scale.ln() / (2.0 / self.zoom_sensitivity).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl PanHandler for Recorder {
        fn on_down(&mut self, _: Point) -> bool {
            self.calls.push("down");
            true
        }
        fn on_scroll(&mut self, _: Point) -> bool {
            self.calls.push("scroll");
            false
        }
    }

    impl PinchHandler for Recorder {
        fn on_pinch_start(&mut self, _: Point) -> bool {
            self.calls.push("pinch_start");
            true
        }
        fn on_pinch_update(&mut self, _: f64) -> bool {
            self.calls.push("pinch_update");
            true
        }
        fn on_pinch_end(&mut self) -> bool {
            self.calls.push("pinch_end");
            true
        }
    }

    impl FlingHandler for Recorder {
        fn on_fling(&mut self, _: Point, _: Instant) -> bool {
            self.calls.push("fling");
            true
        }
    }

    impl TapHandler for Recorder {
        fn on_double_tap(&mut self, _: Point) -> bool {
            self.calls.push("double_tap");
            true
        }
    }

    #[test]
    fn test_dispatch_routes_each_gesture() {
        let mut recorder = Recorder::default();
        let now = Instant::now();
        let events = [
            GestureEvent::Down {
                position: Point::default(),
            },
            GestureEvent::Scroll {
                distance: Point::new(1.0, 0.0),
            },
            GestureEvent::PinchStart {
                focus: Point::default(),
            },
            GestureEvent::PinchUpdate { scale: 1.2 },
            GestureEvent::PinchEnd,
            GestureEvent::Fling {
                velocity: Point::new(10.0, 0.0),
            },
            GestureEvent::DoubleTap {
                position: Point::default(),
            },
        ];
        let consumed: Vec<bool> = events
            .iter()
            .map(|e| dispatch(&mut recorder, e, now))
            .collect();
        assert_eq!(
            recorder.calls,
            vec![
                "down",
                "scroll",
                "pinch_start",
                "pinch_update",
                "pinch_end",
                "fling",
                "double_tap"
            ]
        );
        assert!(!consumed[1]);
    }

    #[test]
    fn test_scale_to_zoom_delta() {
        let coordinator = GestureCoordinator::new(1000.0, true, true, 1.0);
        assert!((coordinator.scale_to_zoom_delta(2.0) - 1.0).abs() < 1e-12);
        assert!((coordinator.scale_to_zoom_delta(0.5) + 1.0).abs() < 1e-12);
        assert!((coordinator.scale_to_zoom_delta(1.4) - 1.4f64.log2()).abs() < 1e-12);

        let sluggish = GestureCoordinator::new(1000.0, true, true, 0.5);
        assert!((sluggish.scale_to_zoom_delta(4.0) - 1.0).abs() < 1e-12);
    }
}
