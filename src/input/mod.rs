pub mod events;
pub mod fling;
pub mod gestures;
pub mod handler;

// Re-export the essential types
pub use events::{GestureEvent, MapEvent, MapEventKind};
pub use fling::{FlingPhase, FlingState};
pub use gestures::{
    dispatch, FlingHandler, GestureCoordinator, PanHandler, PinchHandler, PinchState, TapHandler,
};
pub use handler::{EventCallback, EventManager};
