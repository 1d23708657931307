use crate::core::bounds::Bounds;
use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Gesture input already recognized by the host toolkit.
///
/// Positions are screen pixels. These arrive in screen space; the map
/// un-rotates them itself when its orientation is not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    /// First finger touched the screen
    Down { position: Point },
    /// Pan; `distance` is how far the content should scroll, i.e. the
    /// opposite of the finger movement
    Scroll { distance: Point },
    /// Finger released while moving, velocity in pixels per second
    Fling { velocity: Point },
    /// Two-finger gesture started around `focus`
    PinchStart { focus: Point },
    /// Current pinch scale relative to the start of the gesture
    PinchUpdate { scale: f64 },
    PinchEnd,
    DoubleTap { position: Point },
}

/// Notifications emitted by the map view after a state change is committed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    /// Zoom level changed
    Zoom { zoom: f64 },
    /// Scroll offset changed; `dx`/`dy` is the delta from the previous offset
    Scroll { x: f64, y: f64, dx: f64, dy: f64 },
    /// The first layout pass completed
    FirstLayout { bounds: Bounds },
}

/// Key used to register listeners for a family of [`MapEvent`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapEventKind {
    Zoom,
    Scroll,
    FirstLayout,
}

impl MapEvent {
    pub fn kind(&self) -> MapEventKind {
        match self {
            MapEvent::Zoom { .. } => MapEventKind::Zoom,
            MapEvent::Scroll { .. } => MapEventKind::Scroll,
            MapEvent::FirstLayout { .. } => MapEventKind::FirstLayout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind() {
        assert_eq!(MapEvent::Zoom { zoom: 3.0 }.kind(), MapEventKind::Zoom);
        let scroll = MapEvent::Scroll {
            x: 1.0,
            y: 2.0,
            dx: 1.0,
            dy: 0.0,
        };
        assert_eq!(scroll.kind(), MapEventKind::Scroll);
    }

    #[test]
    fn test_gesture_event_json() {
        let json = r#"[
            {"type": "pinch_start", "focus": {"x": 128.0, "y": 128.0}},
            {"type": "pinch_update", "scale": 1.4},
            {"type": "pinch_end"}
        ]"#;
        let events: Vec<GestureEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], GestureEvent::PinchUpdate { scale: 1.4 });
        assert_eq!(events[2], GestureEvent::PinchEnd);
    }
}
