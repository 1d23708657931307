pub mod anchor;
pub mod placement;

pub use anchor::{Alignment, ChildFrame, LayoutAnchor};
pub use placement::{ChildId, ChildPlacementEngine, FirstLayoutListenerId, MapChild};
