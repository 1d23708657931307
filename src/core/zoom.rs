//! Zoom commands for [`MapView`].
//!
//! A zoom change is committed in one place, [`MapView::commit_zoom`], which
//! clamps the level, re-places the center, rescales the tile cache and
//! notifies listeners. Animated zooms only preview a scale until they end.

use crate::animation::ZoomAnimation;
use crate::core::constants::DEFAULT_ZOOM_DELTA;
use crate::core::geo::{BoundingBox, GeoPoint, Point};
use crate::core::map::MapView;
use crate::input::MapEvent;
use crate::Result;

impl MapView {
    /// Effective lower zoom bound: the override if set, else the provider's
    pub fn min_zoom_level(&self) -> f64 {
        self.config
            .min_zoom_level
            .unwrap_or_else(|| self.tile_provider.min_zoom_level())
    }

    /// Effective upper zoom bound: the override if set, else the provider's
    pub fn max_zoom_level(&self) -> f64 {
        self.config
            .max_zoom_level
            .unwrap_or_else(|| self.tile_provider.max_zoom_level())
    }

    /// Overrides the lower zoom bound; `None` defers to the tile provider
    pub fn set_min_zoom_level(&mut self, level: Option<f64>) -> Result<()> {
        let mut config = self.config.clone();
        config.min_zoom_level = level;
        self.apply_zoom_bounds(config)
    }

    /// Overrides the upper zoom bound; `None` defers to the tile provider
    pub fn set_max_zoom_level(&mut self, level: Option<f64>) -> Result<()> {
        let mut config = self.config.clone();
        config.max_zoom_level = level;
        self.apply_zoom_bounds(config)
    }

    fn apply_zoom_bounds(&mut self, config: crate::core::config::MapViewConfig) -> Result<()> {
        config.validate()?;
        let min = config
            .min_zoom_level
            .unwrap_or_else(|| self.tile_provider.min_zoom_level());
        let max = config
            .max_zoom_level
            .unwrap_or_else(|| self.tile_provider.max_zoom_level());
        Self::check_zoom_range(min, max)?;
        self.config = config;
        let zoom = self.state.zoom_level();
        self.commit_zoom(zoom, None, None);
        self.flush_events();
        Ok(())
    }

    /// Committed zoom, or the target of a running zoom animation when
    /// `pending` is set
    pub fn zoom_level(&self, pending: bool) -> f64 {
        if pending {
            if let Some(target) = self.zoom_target.get() {
                return target;
            }
        }
        self.state.zoom_level()
    }

    /// The lock-free slot holding the target of the running zoom animation
    pub fn zoom_target(&self) -> &crate::animation::ZoomTarget {
        &self.zoom_target
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom_level(true) < self.max_zoom_level()
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom_level(true) > self.min_zoom_level()
    }

    pub fn is_animating(&self) -> bool {
        self.zoom_animation.is_some()
    }

    /// Sets the zoom immediately, keeping the center. Returns the committed
    /// level after clamping.
    pub fn set_zoom_level(&mut self, level: f64) -> f64 {
        self.gestures.fling.abort();
        if self.zoom_animation.is_some() {
            self.abort_zoom_animation();
        }
        let committed = self.commit_zoom(level, None, None);
        self.flush_events();
        committed
    }

    /// Zooms to `level`, animating when asked and possible. Returns false if
    /// the clamped level is already the current one.
    pub fn zoom_to(&mut self, level: f64, animated: bool) -> bool {
        let target = self.clamp_zoom(level);
        let result = if !animated
            || !self.is_layout_occurred()
            || self.config.zoom_animation_duration().is_zero()
        {
            if self.zoom_animation.is_some() {
                self.abort_zoom_animation();
            }
            let before = self.state.zoom_level();
            self.commit_zoom(target, None, None) != before
        } else {
            self.start_zoom_animation(target)
        };
        self.flush_events();
        result
    }

    pub fn zoom_in(&mut self, animated: bool) -> bool {
        if !self.can_zoom_in() {
            return false;
        }
        let target = self.zoom_level(true) + DEFAULT_ZOOM_DELTA;
        self.zoom_to(target, animated)
    }

    pub fn zoom_out(&mut self, animated: bool) -> bool {
        if !self.can_zoom_out() {
            return false;
        }
        let target = self.zoom_level(true) - DEFAULT_ZOOM_DELTA;
        self.zoom_to(target, animated)
    }

    /// Zooms and centers so `bbox` fits inside the screen less `border`
    /// pixels on every side. Returns false when no zoom fits, for example
    /// before the first layout or for a point-sized box.
    pub fn zoom_to_bounding_box(&mut self, bbox: &BoundingBox, animated: bool, border: f64) -> bool {
        let width = self.width - 2.0 * border;
        let height = self.height - 2.0 * border;
        let zoom = match self.tile_system.bounding_box_zoom(bbox, width, height) {
            Some(zoom) => self.clamp_zoom(zoom),
            None => {
                log::debug!("no zoom fits {:?} in {}x{}", bbox, width, height);
                return false;
            }
        };

        self.gestures.fling.abort();
        self.center_animation = None;
        if animated && self.is_layout_occurred() {
            self.start_zoom_animation(zoom);
        } else {
            if self.zoom_animation.is_some() {
                self.abort_zoom_animation();
            }
            self.commit_zoom(zoom, None, None);
        }
        self.commit_center(bbox.center_with_date_line());
        self.flush_events();
        true
    }

    /// Cancels a running zoom animation without committing its target
    pub fn abort_zoom_animation(&mut self) {
        if self.zoom_animation.take().is_some() {
            log::debug!("zoom animation aborted");
        }
        self.zoom_target.clear();
        self.state.reset_multi_touch_scale();
        self.request_layout();
        self.invalidate();
    }

    /// Clamps to the effective zoom range. A min above max resolves to min.
    pub(crate) fn clamp_zoom(&self, level: f64) -> f64 {
        level.min(self.max_zoom_level()).max(self.min_zoom_level())
    }

    fn start_zoom_animation(&mut self, target: f64) -> bool {
        let committed = self.state.zoom_level();
        if target == committed {
            if self.zoom_animation.is_some() {
                self.abort_zoom_animation();
            }
            return false;
        }
        // A retarget continues from the zoom currently on screen
        let from = self
            .zoom_animation
            .as_ref()
            .map_or(committed, ZoomAnimation::current_zoom);
        self.zoom_animation = Some(
            ZoomAnimation::new(
                from,
                target,
                self.config.zoom_animation_duration(),
                self.config.zoom_easing,
            )
            .relative_to(committed),
        );
        self.zoom_target.publish(target);
        self.invalidate();
        true
    }

    pub(crate) fn finish_zoom_animation(&mut self, target: f64) {
        self.zoom_animation = None;
        self.zoom_target.clear();
        self.state.reset_multi_touch_scale();
        self.commit_zoom(target, None, None);
        self.request_layout();
        self.invalidate();
    }

    /// Commits a zoom change. The new center is `anchor` or the current
    /// one; with `snap_focus`, the overlays may pick an item to re-center
    /// on. Returns the committed level.
    pub(crate) fn commit_zoom(
        &mut self,
        requested: f64,
        anchor: Option<GeoPoint>,
        snap_focus: Option<Point>,
    ) -> f64 {
        let old = self.state.zoom_level();
        let new = self.clamp_zoom(requested);
        if new == old {
            if let Some(center) = anchor {
                self.commit_center(center);
            }
            return old;
        }

        self.gestures.fling.abort();
        let center = anchor.unwrap_or_else(|| self.state.center());
        self.state.set_zoom_level(new);
        self.state
            .place_center(center, &self.tile_system, self.width, self.height);

        if self.is_layout_occurred() {
            let projection = self.projection();
            let screen_rect = projection.screen_rect();
            if let Err(e) = self
                .tile_provider
                .rescale_cache(&projection, new, old, screen_rect)
            {
                log::warn!("tile cache rescale from {} to {} failed: {}", old, new, e);
            }
            if let Some(focus) = snap_focus {
                if let Some(snap) = self.overlays.try_snap_to_item(focus.x, focus.y, &projection) {
                    let target = projection.from_screen(snap.x, snap.y);
                    log::debug!("snapping to item at {:?}", target);
                    self.start_center_animation(target);
                }
            }
        }

        log::debug!("zoom {} -> {}", old, new);
        self.events.emit(MapEvent::Zoom { zoom: new });
        if self.is_layout_occurred() {
            self.gestures.fling.suppress_next();
        }
        self.request_layout();
        self.invalidate();
        new
    }

    /// Commits `new_zoom` so the geographic point under `screen` stays
    /// there. The preview scale, if any, is folded into the result.
    pub(crate) fn zoom_fixing_screen_point(
        &mut self,
        new_zoom: f64,
        screen: Point,
        snap_focus: Option<Point>,
    ) -> f64 {
        let target = self.clamp_zoom(new_zoom);
        let projection = self.projection();
        let geo = projection.from_screen(screen.x, screen.y);
        let unrotated = projection.unrotate_only(&screen);

        let world = self.tile_system.geo_to_world_pixel(&geo, target);
        let middle = Point::new(
            world.x - unrotated.x + self.width / 2.0,
            world.y - unrotated.y + self.height / 2.0,
        );
        let center = self.tile_system.world_pixel_to_geo(&middle, target);

        self.state.reset_multi_touch_scale();
        self.commit_zoom(target, Some(center), snap_focus)
    }
}
