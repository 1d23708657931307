use crate::animation::interpolation::EasingType;
use crate::animation::scroller::elapsed_since;
use crate::core::geo::GeoPoint;
use crate::core::tile_system::zoom_factor;
use crate::traits::Lerp;
use instant::{Duration, Instant};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// One sampled frame of a [`ZoomAnimation`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFrame {
    /// Interpolated zoom level
    pub zoom: f64,
    /// Preview scale relative to the starting zoom
    pub scale: f64,
    pub finished: bool,
}

/// Animated zoom change.
///
/// While running, the map shows a scaled preview of the starting zoom; the
/// target level is only committed when the animation finishes. The clock
/// starts at the first sampled frame.
#[derive(Debug, Clone)]
pub struct ZoomAnimation {
    start_time: Option<Instant>,
    duration: Duration,
    easing: EasingType,
    from_zoom: f64,
    to_zoom: f64,
    /// Zoom the preview scale is relative to
    base_zoom: f64,
    current_zoom: f64,
}

impl ZoomAnimation {
    pub fn new(from_zoom: f64, to_zoom: f64, duration: Duration, easing: EasingType) -> Self {
        Self {
            start_time: None,
            duration,
            easing,
            from_zoom,
            to_zoom,
            base_zoom: from_zoom,
            current_zoom: from_zoom,
        }
    }

    /// Measures the preview scale against `base_zoom` instead of the
    /// starting zoom
    pub fn relative_to(mut self, base_zoom: f64) -> Self {
        self.base_zoom = base_zoom;
        self
    }

    pub fn from_zoom(&self) -> f64 {
        self.from_zoom
    }

    pub fn to_zoom(&self) -> f64 {
        self.to_zoom
    }

    /// Zoom of the latest sampled frame
    pub fn current_zoom(&self) -> f64 {
        self.current_zoom
    }

    pub fn sample(&mut self, now: Instant) -> ZoomFrame {
        let start = *self.start_time.get_or_insert(now);
        let progress = progress(start, self.duration, now);
        let zoom = self.from_zoom.lerp(&self.to_zoom, self.easing.apply(progress));
        self.current_zoom = zoom;
        ZoomFrame {
            zoom,
            scale: zoom_factor(zoom - self.base_zoom),
            finished: progress >= 1.0,
        }
    }
}

/// Animated re-center between two geographic points
#[derive(Debug, Clone)]
pub struct CenterAnimation {
    start_time: Option<Instant>,
    duration: Duration,
    easing: EasingType,
    from: GeoPoint,
    to: GeoPoint,
}

impl CenterAnimation {
    pub fn new(from: GeoPoint, to: GeoPoint, duration: Duration, easing: EasingType) -> Self {
        Self {
            start_time: None,
            duration,
            easing,
            from,
            to,
        }
    }

    pub fn target(&self) -> GeoPoint {
        self.to
    }

    /// Center at `now` and whether the animation is over
    pub fn sample(&mut self, now: Instant) -> (GeoPoint, bool) {
        let start = *self.start_time.get_or_insert(now);
        let progress = progress(start, self.duration, now);
        if progress >= 1.0 {
            return (self.to, true);
        }
        (self.from.lerp(&self.to, self.easing.apply(progress)), false)
    }
}

fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed_since(start, now).as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

/// Single-slot, lock-free cell holding the target of a running zoom
/// animation.
///
/// Writers publish with release ordering and readers load with acquire
/// ordering, so an animation driver on another thread can read the target
/// without a lock. Clones share the same slot.
#[derive(Debug, Clone)]
pub struct ZoomTarget {
    bits: Arc<AtomicU64>,
}

const EMPTY: u64 = 0x7ff8_0000_0000_0000;

impl ZoomTarget {
    pub fn new() -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(EMPTY)),
        }
    }

    pub fn publish(&self, zoom: f64) {
        self.bits.store(zoom.to_bits(), Ordering::Release);
    }

    pub fn clear(&self) {
        self.bits.store(EMPTY, Ordering::Release);
    }

    /// The published target, if an animation is running
    pub fn get(&self) -> Option<f64> {
        let value = f64::from_bits(self.bits.load(Ordering::Acquire));
        if value.is_nan() {
            None
        } else {
            Some(value)
        }
    }
}

impl Default for ZoomTarget {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_animation_frames() {
        let t0 = Instant::now();
        let mut anim = ZoomAnimation::new(3.0, 5.0, Duration::from_millis(200), EasingType::Linear);

        let start = anim.sample(t0);
        assert_eq!(start.zoom, 3.0);
        assert_eq!(start.scale, 1.0);
        assert!(!start.finished);

        let half = anim.sample(t0 + Duration::from_millis(100));
        assert!((half.zoom - 4.0).abs() < 1e-9);
        assert!((half.scale - 2.0).abs() < 1e-9);

        let end = anim.sample(t0 + Duration::from_millis(500));
        assert!(end.finished);
        assert_eq!(end.zoom, 5.0);
        assert!((end.scale - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_relative_to_base() {
        let t0 = Instant::now();
        let mut anim = ZoomAnimation::new(4.5, 6.5, Duration::from_millis(100), EasingType::Linear)
            .relative_to(4.0);
        let first = anim.sample(t0);
        assert!((first.scale - 2f64.powf(0.5)).abs() < 1e-9);
        anim.sample(t0 + Duration::from_millis(50));
        assert!((anim.current_zoom() - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_center_animation() {
        let t0 = Instant::now();
        let mut anim = CenterAnimation::new(
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(10.0, 20.0),
            Duration::from_millis(100),
            EasingType::Linear,
        );
        let (start, _) = anim.sample(t0);
        assert_eq!(start, GeoPoint::new(0.0, 0.0));
        let (mid, done) = anim.sample(t0 + Duration::from_millis(50));
        assert!(!done);
        assert!((mid.lat - 5.0).abs() < 1e-9);
        assert!((mid.lon - 10.0).abs() < 1e-9);

        let (end, done) = anim.sample(t0 + Duration::from_millis(100));
        assert!(done);
        assert_eq!(end, anim.target());
    }

    #[test]
    fn test_zoom_target_shared_across_threads() {
        let target = ZoomTarget::new();
        assert_eq!(target.get(), None);

        let writer = target.clone();
        std::thread::spawn(move || writer.publish(7.5))
            .join()
            .unwrap();
        assert_eq!(target.get(), Some(7.5));

        target.clear();
        assert_eq!(target.get(), None);
    }
}
