use crate::core::bounds::Bounds;
use crate::core::projection::Projection;
use crate::core::redraw::RedrawHandle;
use crate::tiles::source::{TileSource, XyzTileSource};
use crate::Result;

/// Tile-management collaborator.
///
/// The map view never waits on it: `rescale_cache` should only start work
/// and report completion through the [`RedrawHandle`] it was given. An
/// error is logged and otherwise ignored.
pub trait TileProvider {
    fn tile_source(&self) -> &dyn TileSource;

    /// Rebuilds cached imagery for a zoom change from `old_zoom` to
    /// `new_zoom`, given a projection snapshot taken after the change
    fn rescale_cache(
        &mut self,
        projection: &Projection,
        new_zoom: f64,
        old_zoom: f64,
        screen_rect: Bounds,
    ) -> Result<()>;

    fn min_zoom_level(&self) -> f64 {
        self.tile_source().min_zoom() as f64
    }

    fn max_zoom_level(&self) -> f64 {
        self.tile_source().max_zoom() as f64
    }

    /// Gives the provider a way to request redraws later
    fn set_redraw_handle(&mut self, _handle: RedrawHandle) {}
}

/// Provider with no cache, useful headless and in tests
#[derive(Debug, Clone, Default)]
pub struct BasicTileProvider {
    source: XyzTileSource,
}

impl BasicTileProvider {
    pub fn new(source: XyzTileSource) -> Self {
        Self { source }
    }
}

impl TileProvider for BasicTileProvider {
    fn tile_source(&self) -> &dyn TileSource {
        &self.source
    }

    fn rescale_cache(
        &mut self,
        _projection: &Projection,
        new_zoom: f64,
        old_zoom: f64,
        _screen_rect: Bounds,
    ) -> Result<()> {
        log::trace!("no tile cache to rescale ({} -> {})", old_zoom, new_zoom);
        Ok(())
    }
}
