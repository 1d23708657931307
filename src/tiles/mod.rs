pub mod provider;
pub mod source;

pub use provider::{BasicTileProvider, TileProvider};
pub use source::{TileSource, XyzTileSource};
