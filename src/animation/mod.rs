pub mod interpolation;
pub mod scroller;
pub mod zoom;

pub use interpolation::EasingType;
pub use scroller::Scroller;
pub use zoom::{CenterAnimation, ZoomAnimation, ZoomFrame, ZoomTarget};
