use crate::core::geo::Point;
use crate::core::map::MapView;
use crate::input::{FlingHandler, PanHandler, PinchHandler, PinchState, TapHandler};
use instant::Instant;

impl PanHandler for MapView {
    fn on_down(&mut self, position: Point) -> bool {
        self.gestures.fling.abort();
        let projection = self.projection();
        self.overlays.on_down(position, &projection)
    }

    fn on_scroll(&mut self, distance: Point) -> bool {
        let projection = self.projection();
        if self.overlays.on_scroll(distance, &projection) {
            return true;
        }
        // Screen-space distances are turned into map space before scrolling
        let delta = projection.unrotate_vector(distance.x, distance.y);
        self.stop_motion();
        let offset = self.state.scroll_offset().add(&delta);
        self.commit_scroll(offset);
        true
    }
}

impl FlingHandler for MapView {
    fn on_fling(&mut self, velocity: Point, now: Instant) -> bool {
        if !velocity.x.is_finite() || !velocity.y.is_finite() {
            log::warn!("fling with non-finite velocity {:?} ignored", velocity);
            return false;
        }
        if !self.gestures.fling.accept() {
            log::trace!("fling ignored");
            return false;
        }
        let projection = self.projection();
        if self.overlays.on_fling(velocity, &projection) {
            return true;
        }
        // Content follows the finger, so the scroll runs against the velocity
        let velocity = projection.unrotate_vector(-velocity.x, -velocity.y);
        self.center_animation = None;
        self.gestures
            .fling
            .start(velocity, projection.world_size(), now);
        self.invalidate();
        true
    }
}

impl PinchHandler for MapView {
    fn on_pinch_start(&mut self, focus: Point) -> bool {
        if !self.gestures.is_multi_touch_enabled() || self.zoom_animation.is_some() {
            return false;
        }
        self.gestures.fling.abort();
        self.gestures.pinch = PinchState::Pinching { focus };
        self.state.set_multi_touch_scale(1.0, focus);
        true
    }

    fn on_pinch_update(&mut self, scale: f64) -> bool {
        let focus = match self.gestures.pinch_focus() {
            Some(focus) => focus,
            None => return false,
        };
        let out_of_range = (scale > 1.0 && !self.can_zoom_in())
            || (scale < 1.0 && !self.can_zoom_out());
        let scale = if !scale.is_finite() || scale <= 0.0 || out_of_range {
            1.0
        } else {
            scale
        };
        self.state.set_multi_touch_scale(scale, focus);
        self.request_layout();
        self.invalidate();
        true
    }

    fn on_pinch_end(&mut self) -> bool {
        let focus = match self.gestures.pinch_focus() {
            Some(focus) => focus,
            None => return false,
        };
        let scale = self.state.multi_touch_scale();
        if scale != 1.0 {
            let delta = self.gestures.scale_to_zoom_delta(scale);
            let target = self.state.zoom_level() + delta;
            self.zoom_fixing_screen_point(target, focus, Some(focus));
        }
        self.state.reset_multi_touch_scale();
        self.gestures.pinch = PinchState::Idle;
        self.invalidate();
        true
    }
}

impl TapHandler for MapView {
    fn on_double_tap(&mut self, position: Point) -> bool {
        let projection = self.projection();
        if self.overlays.on_double_tap(position, &projection) {
            return true;
        }
        if !self.can_zoom_in() || self.is_animating() {
            return false;
        }
        let target = self.state.zoom_level() + 1.0;
        self.zoom_fixing_screen_point(target, position, None);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::core::builder::MapViewBuilder;
    use crate::core::geo::{GeoPoint, Point};
    use crate::core::map::MapView;
    use crate::input::GestureEvent;
    use instant::{Duration, Instant};

    fn map() -> MapView {
        MapViewBuilder::new()
            .center(GeoPoint::new(0.0, 0.0))
            .zoom(4.0)
            .size(400.0, 400.0)
            .build()
            .unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_scroll_moves_offset() {
        let mut map = map();
        let before = map.scroll_offset();
        let now = Instant::now();
        assert!(map.handle_gesture(
            &GestureEvent::Scroll {
                distance: Point::new(30.0, -20.0)
            },
            now
        ));
        let after = map.scroll_offset();
        assert!(close(after.x - before.x, 30.0));
        assert!(close(after.y - before.y, -20.0));
    }

    #[test]
    fn test_scroll_unrotated_when_map_is_rotated() {
        let mut map = map();
        map.set_orientation(90.0);
        let before = map.scroll_offset();
        map.handle_gesture(
            &GestureEvent::Scroll {
                distance: Point::new(10.0, 0.0),
            },
            Instant::now(),
        );
        let after = map.scroll_offset();
        assert!(close(after.x - before.x, 0.0));
        assert!(close((after.y - before.y).abs(), 10.0));
    }

    #[test]
    fn test_double_tap_keeps_tapped_point() {
        let mut map = map();
        let tap = Point::new(300.0, 120.0);
        let geo = map.projection().from_screen(tap.x, tap.y);
        assert!(map.handle_gesture(&GestureEvent::DoubleTap { position: tap }, Instant::now()));
        assert_eq!(map.zoom_level(false), 5.0);
        let back = map.projection().to_screen(&geo);
        assert!((back.x - tap.x).abs() < 1e-6);
        assert!((back.y - tap.y).abs() < 1e-6);
    }

    #[test]
    fn test_pinch_commits_log_scale() {
        let mut map = map();
        let now = Instant::now();
        let focus = Point::new(100.0, 100.0);
        let geo = map.projection().from_screen(focus.x, focus.y);
        map.handle_gesture(&GestureEvent::PinchStart { focus }, now);
        map.handle_gesture(&GestureEvent::PinchUpdate { scale: 2.0 }, now);
        assert_eq!(map.zoom_level(false), 4.0);
        map.handle_gesture(&GestureEvent::PinchEnd, now);

        assert!(close(map.zoom_level(false), 5.0));
        assert_eq!(map.state().multi_touch_scale(), 1.0);
        let back = map.projection().to_screen(&geo);
        assert!((back.x - focus.x).abs() < 1e-6);
        assert!((back.y - focus.y).abs() < 1e-6);
    }

    #[test]
    fn test_pinch_rejected_during_zoom_animation() {
        let mut map = map();
        map.zoom_in(true);
        assert!(!map.handle_gesture(
            &GestureEvent::PinchStart {
                focus: Point::new(10.0, 10.0)
            },
            Instant::now()
        ));
    }

    #[test]
    fn test_fling_after_zoom_is_suppressed_once() {
        let mut map = map();
        let now = Instant::now();
        map.set_zoom_level(6.0);
        let fling = GestureEvent::Fling {
            velocity: Point::new(800.0, 0.0),
        };
        assert!(!map.handle_gesture(&fling, now));
        assert!(map.handle_gesture(&fling, now));
        assert!(map.is_flinging());
    }

    #[test]
    fn test_fling_moves_against_velocity_and_down_stops_it() {
        let mut map = map();
        let t0 = Instant::now();
        let before = map.scroll_offset();
        map.handle_gesture(
            &GestureEvent::Fling {
                velocity: Point::new(600.0, 0.0),
            },
            t0,
        );
        map.tick(t0);
        map.tick(t0 + Duration::from_millis(100));
        assert!(map.scroll_offset().x < before.x);

        map.handle_gesture(
            &GestureEvent::Down {
                position: Point::new(5.0, 5.0),
            },
            t0 + Duration::from_millis(120),
        );
        assert!(!map.is_flinging());
        let stopped = map.scroll_offset();
        map.tick(t0 + Duration::from_millis(300));
        assert_eq!(map.scroll_offset(), stopped);
    }

    #[test]
    fn test_scroll_gesture_cancels_zoom_animation() {
        let mut map = map();
        let t0 = Instant::now();
        map.zoom_in(true);
        map.tick(t0);
        map.tick(t0 + Duration::from_millis(100));
        assert!(map.state().multi_touch_scale() > 1.0);

        map.handle_gesture(
            &GestureEvent::Scroll {
                distance: Point::new(10.0, 0.0),
            },
            t0 + Duration::from_millis(110),
        );
        assert!(!map.is_animating());
        assert_eq!(map.zoom_level(true), 4.0);
        assert_eq!(map.zoom_target().get(), None);
        assert_eq!(map.state().multi_touch_scale(), 1.0);
    }

    #[test]
    fn test_first_fling_on_new_map_is_accepted() {
        let mut map = MapViewBuilder::new()
            .zoom(5.0)
            .size(256.0, 256.0)
            .build()
            .unwrap();
        let t0 = Instant::now();
        assert!(map.handle_gesture(
            &GestureEvent::Fling {
                velocity: Point::new(0.0, 500.0),
            },
            t0
        ));
        assert!(map.is_flinging());
    }

    #[test]
    fn test_non_finite_fling_is_rejected() {
        let mut map = map();
        let now = Instant::now();
        for velocity in [
            Point::new(f64::NAN, 0.0),
            Point::new(0.0, f64::INFINITY),
        ] {
            assert!(!map.handle_gesture(&GestureEvent::Fling { velocity }, now));
            assert!(!map.is_flinging());
        }
    }

    #[test]
    fn test_huge_fling_stays_within_a_world() {
        let mut map = map();
        let t0 = Instant::now();
        let world = map.projection().world_size();
        let before = map.scroll_offset();
        assert!(map.handle_gesture(
            &GestureEvent::Fling {
                velocity: Point::new(0.0, 1e25),
            },
            t0
        ));
        let mut now = t0;
        while map.tick(now) {
            now += Duration::from_millis(16);
        }
        let after = map.scroll_offset();
        assert!(after.y.is_finite());
        assert!((after.y - before.y).abs() <= world);
    }
}
