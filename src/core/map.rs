use crate::{
    animation::{CenterAnimation, ZoomAnimation, ZoomTarget},
    core::{
        bounds::Bounds,
        config::MapViewConfig,
        geo::{BoundingBox, GeoPoint, Point},
        projection::Projection,
        redraw::{RedrawHandle, RedrawQueue, RedrawRequest},
        scroll::ScrollableArea,
        tile_system::TileSystem,
        viewport::ViewportState,
    },
    input::{gestures, GestureCoordinator, GestureEvent, EventManager, MapEvent, MapEventKind},
    layers::OverlayManager,
    layout::{ChildId, ChildPlacementEngine, FirstLayoutListenerId, MapChild},
    tiles::TileProvider,
    MapError, Result,
};
use instant::Instant;

/// A pannable, zoomable, rotatable map viewport.
///
/// Owns the committed [`ViewportState`] and every state machine that
/// mutates it. Notifications are queued during a command and dispatched
/// once the command has committed its changes.
pub struct MapView {
    pub(crate) state: ViewportState,
    pub(crate) config: MapViewConfig,
    pub(crate) tile_system: TileSystem,
    pub(crate) tile_provider: Box<dyn TileProvider>,
    pub(crate) overlays: Box<dyn OverlayManager>,
    pub(crate) events: EventManager,
    pub(crate) gestures: GestureCoordinator,
    pub(crate) zoom_animation: Option<ZoomAnimation>,
    pub(crate) center_animation: Option<CenterAnimation>,
    pub(crate) zoom_target: ZoomTarget,
    placement: ChildPlacementEngine,
    redraw: RedrawQueue,
    pub(crate) width: f64,
    pub(crate) height: f64,
    layout_requested: bool,
}

impl MapView {
    pub fn new(
        mut tile_provider: Box<dyn TileProvider>,
        overlays: Box<dyn OverlayManager>,
        config: MapViewConfig,
    ) -> Result<Self> {
        config.validate()?;
        let redraw = RedrawQueue::new();
        tile_provider.set_redraw_handle(redraw.handle());
        let tile_system = Self::tile_system_for(tile_provider.as_ref(), &config);
        let gestures = GestureCoordinator::new(
            config.fling_deceleration,
            config.fling_enabled,
            config.multi_touch_enabled,
            config.zoom_sensitivity,
        );

        let mut map = Self {
            state: ViewportState::default(),
            config,
            tile_system,
            tile_provider,
            overlays,
            events: EventManager::new(),
            gestures,
            zoom_animation: None,
            center_animation: None,
            zoom_target: ZoomTarget::new(),
            placement: ChildPlacementEngine::new(),
            redraw,
            width: 0.0,
            height: 0.0,
            layout_requested: false,
        };
        let initial = map.min_zoom_level();
        map.state.set_zoom_level(initial);
        map.state
            .place_center(GeoPoint::default(), &map.tile_system, 0.0, 0.0);
        log::info!(
            "map view created with tile source {}",
            map.tile_provider.tile_source().name()
        );
        Ok(map)
    }

    /// Builds the projection for the current state and screen size
    pub fn projection(&self) -> Projection {
        Projection::new(&self.state, self.tile_system, self.width, self.height)
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn config(&self) -> &MapViewConfig {
        &self.config
    }

    pub fn tile_system(&self) -> &TileSystem {
        &self.tile_system
    }

    pub fn tile_provider(&self) -> &dyn TileProvider {
        self.tile_provider.as_ref()
    }

    pub fn center(&self) -> GeoPoint {
        self.state.center()
    }

    pub fn orientation(&self) -> f64 {
        self.state.orientation()
    }

    pub fn scroll_offset(&self) -> Point {
        self.state.scroll_offset()
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.projection().bounding_box()
    }

    /// Register a listener for committed state changes
    pub fn on<F>(&mut self, kind: MapEventKind, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.events.on(kind, callback);
    }

    pub fn off(&mut self, kind: MapEventKind) {
        self.events.off(kind);
    }

    /// Applies a new screen size, keeping the center fixed, and runs a
    /// layout pass. The first call completes the first layout.
    pub fn on_layout(&mut self, width: f64, height: f64) {
        let center = self.state.center();
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.state
            .place_center(center, &self.tile_system, self.width, self.height);
        self.layout_children();
        self.invalidate();
        self.flush_events();
    }

    pub fn is_layout_occurred(&self) -> bool {
        self.placement.is_ready()
    }

    /// Moves the map so `center` is in the middle of the screen
    pub fn set_center(&mut self, center: GeoPoint) {
        self.stop_motion();
        self.commit_center(center);
        self.flush_events();
    }

    /// Scrolls so the screen's top-left corner shows world pixel (`x`, `y`)
    /// at the current zoom, subject to the scrollable area
    pub fn scroll_to(&mut self, x: f64, y: f64) {
        self.stop_motion();
        self.commit_scroll(Point::new(x, y));
        self.flush_events();
    }

    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        let offset = self.state.scroll_offset();
        self.scroll_to(offset.x + dx, offset.y + dy);
    }

    /// Rotates the map; children are repositioned immediately
    pub fn set_orientation(&mut self, degrees: f64) {
        self.state.set_orientation(degrees);
        if self.is_layout_occurred() {
            self.layout_children();
        }
        self.invalidate();
        self.flush_events();
    }

    /// Restricts scrolling to `area`, or lifts the restriction with `None`
    pub fn set_scrollable_area_limit(&mut self, area: Option<BoundingBox>) {
        let area = area.map(|bounds| ScrollableArea::new(bounds, &self.tile_system));
        self.state.set_scrollable_area(area);
        let offset = self.state.scroll_offset();
        self.commit_scroll(offset);
        self.flush_events();
    }

    pub fn scrollable_area_limit(&self) -> Option<BoundingBox> {
        self.state.scrollable_area().map(|area| *area.bounding_box())
    }

    /// Swaps the tile provider. The tile size and the zoom range may change,
    /// so the world is re-projected and the zoom re-clamped.
    pub fn set_tile_provider(&mut self, mut provider: Box<dyn TileProvider>) {
        provider.set_redraw_handle(self.redraw.handle());
        log::info!("using tile source: {}", provider.tile_source().name());
        self.tile_provider = provider;
        self.refresh_tile_system();
        self.flush_events();
    }

    pub fn set_tiles_scaled_to_dpi(&mut self, scaled: bool) {
        self.config.tiles_scaled_to_dpi = scaled;
        self.refresh_tile_system();
        self.flush_events();
    }

    /// Starts an animated re-center; applied immediately before the first
    /// layout
    pub fn animate_to(&mut self, target: GeoPoint) {
        self.gestures.fling.abort();
        if !self.is_layout_occurred() {
            self.center_animation = None;
            self.commit_center(target);
        } else {
            self.start_center_animation(target);
        }
        self.flush_events();
    }

    pub fn set_fling_enabled(&mut self, enabled: bool) {
        self.config.fling_enabled = enabled;
        self.gestures.fling.set_enabled(enabled);
    }

    pub fn is_fling_enabled(&self) -> bool {
        self.gestures.fling.is_enabled()
    }

    pub fn set_multi_touch_enabled(&mut self, enabled: bool) {
        self.config.multi_touch_enabled = enabled;
        self.gestures.set_multi_touch_enabled(enabled);
        if !enabled && self.state.multi_touch_scale() != 1.0 && self.zoom_animation.is_none() {
            self.state.reset_multi_touch_scale();
            self.invalidate();
        }
    }

    pub fn is_flinging(&self) -> bool {
        self.gestures.fling.is_flinging()
    }

    /// Feeds a recognized gesture to the map. Returns whether it was consumed.
    pub fn handle_gesture(&mut self, event: &GestureEvent, now: Instant) -> bool {
        if self.config.debug {
            log::debug!("gesture {:?}", event);
        }
        let consumed = gestures::dispatch(self, event, now);
        self.flush_events();
        consumed
    }

    /// Advances fling and animations to `now` and runs any pending layout.
    /// Returns true while something is still moving.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(delta) = self.gestures.fling.advance(now) {
            let offset = self.state.scroll_offset().add(&delta);
            self.commit_scroll(offset);
        }

        if let Some(animation) = self.zoom_animation.as_mut() {
            let frame = animation.sample(now);
            if frame.finished {
                let target = animation.to_zoom();
                self.finish_zoom_animation(target);
            } else {
                let middle = Point::new(self.width / 2.0, self.height / 2.0);
                self.state.set_multi_touch_scale(frame.scale, middle);
                self.request_layout();
                self.invalidate();
            }
        }

        if let Some(animation) = self.center_animation.as_mut() {
            let (center, finished) = animation.sample(now);
            if finished {
                self.center_animation = None;
            }
            self.commit_center(center);
        }

        self.layout_if_needed();
        self.flush_events();
        self.is_flinging() || self.zoom_animation.is_some() || self.center_animation.is_some()
    }

    /// Requests a full redraw
    pub fn invalidate(&self) {
        self.redraw.handle().request_redraw();
    }

    /// Requests a redraw of a region given in unrotated map-screen space
    pub fn invalidate_map_coordinates(&self, rect: Bounds) {
        let orientation = self.state.orientation();
        let region = if orientation != 0.0 {
            let middle = Point::new(self.width / 2.0, self.height / 2.0);
            rect.rotated_bounding_box(&middle, orientation).round_out()
        } else {
            rect
        };
        self.redraw.handle().request_region(region);
    }

    /// Handle collaborators use to request redraws from any thread
    pub fn redraw_handle(&self) -> RedrawHandle {
        self.redraw.handle()
    }

    /// Drains the redraw requests accumulated since the last call
    pub fn take_redraw_requests(&self) -> Vec<RedrawRequest> {
        self.redraw.drain()
    }

    pub fn add_child(&mut self, child: Box<dyn MapChild>) -> ChildId {
        let id = self.placement.add_child(child);
        self.request_layout();
        id
    }

    pub fn remove_child(&mut self, id: ChildId) -> Result<Box<dyn MapChild>> {
        let child = self.placement.remove_child(id)?;
        self.invalidate();
        Ok(child)
    }

    pub fn child(&self, id: ChildId) -> Option<&dyn MapChild> {
        self.placement.child(id)
    }

    /// Registers a callback for the first layout pass. Returns `None` when
    /// that pass already happened; the callback is then never called.
    pub fn add_on_first_layout_listener<F>(&mut self, listener: F) -> Option<FirstLayoutListenerId>
    where
        F: FnOnce(Bounds) + 'static,
    {
        self.placement.add_first_layout_listener(listener)
    }

    pub fn remove_on_first_layout_listener(&mut self, id: FirstLayoutListenerId) -> bool {
        self.placement.remove_first_layout_listener(id)
    }

    pub(crate) fn check_zoom_range(min: f64, max: f64) -> Result<()> {
        if min > max {
            return Err(MapError::InvalidZoomRange { min, max }.into());
        }
        Ok(())
    }

    /// Stops fling, center and zoom animations ahead of an explicit move
    pub(crate) fn stop_motion(&mut self) {
        self.gestures.fling.abort();
        self.center_animation = None;
        if self.zoom_animation.is_some() {
            self.abort_zoom_animation();
        }
    }

    pub(crate) fn commit_center(&mut self, center: GeoPoint) {
        let previous = self.state.scroll_offset();
        self.state
            .place_center(center, &self.tile_system, self.width, self.height);
        self.after_scroll(previous);
    }

    pub(crate) fn commit_scroll(&mut self, offset: Point) {
        let previous = self.state.scroll_offset();
        self.state
            .place_scroll(offset, &self.tile_system, self.width, self.height);
        self.after_scroll(previous);
    }

    fn after_scroll(&mut self, previous: Point) {
        let current = self.state.scroll_offset();
        if current == previous {
            return;
        }
        if self.state.orientation() != 0.0 && self.is_layout_occurred() {
            self.layout_children();
        } else {
            self.request_layout();
        }
        // x wraps around the world, so report the short way across the seam
        let world = self.tile_system.world_size(self.state.zoom_level());
        let dx = current.x - previous.x;
        self.events.emit(MapEvent::Scroll {
            x: current.x,
            y: current.y,
            dx: dx - (dx / world).round() * world,
            dy: current.y - previous.y,
        });
        self.invalidate();
    }

    pub(crate) fn start_center_animation(&mut self, target: GeoPoint) {
        self.center_animation = Some(CenterAnimation::new(
            self.state.center(),
            target,
            self.config.center_animation_duration(),
            self.config.zoom_easing,
        ));
        self.invalidate();
    }

    pub(crate) fn request_layout(&mut self) {
        self.layout_requested = true;
    }

    fn layout_if_needed(&mut self) {
        if self.layout_requested && self.is_layout_occurred() {
            self.layout_children();
        }
    }

    fn layout_children(&mut self) {
        self.layout_requested = false;
        let projection = self.projection();
        let bounds = projection.screen_rect();
        if self.placement.layout(&projection, bounds) {
            log::debug!("first layout {}x{}", self.width, self.height);
            self.events.emit(MapEvent::FirstLayout { bounds });
        }
    }

    pub(crate) fn flush_events(&mut self) {
        self.events.process_events();
    }

    fn tile_system_for(provider: &dyn TileProvider, config: &MapViewConfig) -> TileSystem {
        let size = provider.tile_source().tile_size() as f64;
        if config.tiles_scaled_to_dpi {
            TileSystem::new(size * config.display_density)
        } else {
            TileSystem::new(size)
        }
    }

    fn refresh_tile_system(&mut self) {
        let tile_system = Self::tile_system_for(self.tile_provider.as_ref(), &self.config);
        if tile_system != self.tile_system {
            log::debug!(
                "tile size {} -> {}",
                self.tile_system.tile_size(),
                tile_system.tile_size()
            );
            let center = self.state.center();
            self.tile_system = tile_system;
            if let Some(area) = self.state.scrollable_area() {
                let rebuilt = ScrollableArea::new(*area.bounding_box(), &self.tile_system);
                self.state.set_scrollable_area(Some(rebuilt));
            }
            self.state
                .place_center(center, &self.tile_system, self.width, self.height);
            self.request_layout();
        }
        let zoom = self.state.zoom_level();
        self.commit_zoom(zoom, None, None);
        self.invalidate();
    }
}

impl std::fmt::Debug for MapView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapView")
            .field("state", &self.state)
            .field("size", &(self.width, self.height))
            .field("tile_system", &self.tile_system)
            .field("zoom_animation", &self.zoom_animation)
            .field("flinging", &self.is_flinging())
            .finish()
    }
}
