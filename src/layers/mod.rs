pub mod overlay;

pub use overlay::{NoOverlays, OverlayManager};
