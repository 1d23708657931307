use crate::core::bounds::Bounds;
use crate::core::geo::Point;
use instant::{Duration, Instant};

/// Momentum model for fling gestures.
///
/// The position decelerates at a constant rate along the initial velocity
/// direction and is clamped to the bounds given at `fling` time. Time is
/// passed in explicitly so callers decide the clock.
#[derive(Debug, Clone)]
pub struct Scroller {
    start: Point,
    direction: Point,
    speed: f64,
    deceleration: f64,
    duration: Duration,
    start_time: Instant,
    bounds: Bounds,
    current: Point,
    final_position: Point,
    finished: bool,
}

impl Scroller {
    /// Creates an idle scroller; `deceleration` is in pixels per second squared
    pub fn new(deceleration: f64) -> Self {
        Self {
            start: Point::default(),
            direction: Point::default(),
            speed: 0.0,
            deceleration,
            duration: Duration::ZERO,
            start_time: Instant::now(),
            bounds: Bounds::default(),
            current: Point::default(),
            final_position: Point::default(),
            finished: true,
        }
    }

    /// Starts a fling from `start` with `velocity` in pixels per second
    pub fn fling(&mut self, start: Point, velocity: Point, bounds: Bounds, now: Instant) {
        let speed = velocity.x.hypot(velocity.y);
        self.start = start;
        self.current = start;
        self.bounds = bounds;
        self.start_time = now;
        self.finished = false;
        if !speed.is_finite() || speed == 0.0 || self.deceleration <= 0.0 {
            self.speed = 0.0;
            self.direction = Point::default();
            self.duration = Duration::ZERO;
            self.final_position = self.clamp(start);
            return;
        }
        self.direction = velocity.multiply(1.0 / speed);
        // Never faster than what crosses the bounds diagonal
        let max_speed = (2.0 * self.deceleration * bounds.width().hypot(bounds.height())).sqrt();
        let speed = if max_speed.is_finite() { speed.min(max_speed) } else { speed };
        self.speed = speed;
        self.duration =
            Duration::try_from_secs_f64(speed / self.deceleration).unwrap_or(Duration::ZERO);
        let distance = speed * speed / (2.0 * self.deceleration);
        self.final_position = self.clamp(start.add(&self.direction.multiply(distance)));
    }

    /// Advances to `now`. Returns true while the fling produced a new
    /// position, including the final one; false once it is over.
    pub fn compute_scroll_offset(&mut self, now: Instant) -> bool {
        if self.finished {
            return false;
        }
        let elapsed = elapsed_since(self.start_time, now);
        if elapsed >= self.duration {
            self.current = self.final_position;
            self.finished = true;
            return true;
        }
        let t = elapsed.as_secs_f64();
        let distance = self.speed * t - 0.5 * self.deceleration * t * t;
        self.current = self.clamp(self.start.add(&self.direction.multiply(distance)));
        true
    }

    /// Stops the fling where it is
    pub fn force_finished(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn final_position(&self) -> Point {
        self.final_position
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    fn clamp(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(self.bounds.min.x, self.bounds.max.x),
            point.y.clamp(self.bounds.min.y, self.bounds.max.y),
        )
    }
}

/// Time from `start` to `now`, zero if `now` is earlier
pub(crate) fn elapsed_since(start: Instant, now: Instant) -> Duration {
    if now > start {
        now.duration_since(start)
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide() -> Bounds {
        Bounds::from_coords(-10_000.0, -10_000.0, 10_000.0, 10_000.0)
    }

    #[test]
    fn test_fling_decelerates_to_final() {
        let mut scroller = Scroller::new(1000.0);
        let t0 = Instant::now();
        scroller.fling(Point::default(), Point::new(500.0, 0.0), wide(), t0);

        // 500 px/s at 1000 px/s^2 stops after 0.5s having moved 125px
        assert_eq!(scroller.duration(), Duration::from_millis(500));
        assert!((scroller.final_position().x - 125.0).abs() < 1e-9);

        assert!(scroller.compute_scroll_offset(t0 + Duration::from_millis(250)));
        let mid = scroller.current().x;
        assert!(mid > 62.5 && mid < 125.0);

        assert!(scroller.compute_scroll_offset(t0 + Duration::from_secs(1)));
        assert!((scroller.current().x - 125.0).abs() < 1e-9);
        assert!(scroller.is_finished());
        assert!(!scroller.compute_scroll_offset(t0 + Duration::from_secs(2)));
    }

    #[test]
    fn test_fling_respects_bounds() {
        let mut scroller = Scroller::new(100.0);
        let t0 = Instant::now();
        let bounds = Bounds::from_coords(-50.0, -50.0, 50.0, 50.0);
        scroller.fling(Point::default(), Point::new(0.0, -1000.0), bounds, t0);
        assert_eq!(scroller.final_position().y, -50.0);

        scroller.compute_scroll_offset(t0 + Duration::from_secs(5));
        assert!(scroller.current().y >= -50.0);
    }

    #[test]
    fn test_huge_velocity_is_capped() {
        let mut scroller = Scroller::new(1000.0);
        let t0 = Instant::now();
        let bounds = Bounds::from_coords(-512.0, -512.0, 512.0, 512.0);
        scroller.fling(Point::default(), Point::new(1e25, 1e300), bounds, t0);
        assert!(scroller.duration() < Duration::from_secs(5));
        assert!(scroller.final_position().y <= 512.0);
        assert!(scroller.final_position().x.abs() <= 512.0);

        scroller.compute_scroll_offset(t0 + Duration::from_millis(50));
        assert!(scroller.current().y.is_finite());
    }

    #[test]
    fn test_non_finite_velocity_stays_put() {
        let mut scroller = Scroller::new(1000.0);
        let t0 = Instant::now();
        scroller.fling(Point::default(), Point::new(f64::NAN, 1.0), wide(), t0);
        assert_eq!(scroller.duration(), Duration::ZERO);
        assert_eq!(scroller.final_position(), Point::default());
    }

    #[test]
    fn test_force_finished() {
        let mut scroller = Scroller::new(1000.0);
        let t0 = Instant::now();
        scroller.fling(Point::default(), Point::new(300.0, 400.0), wide(), t0);
        scroller.force_finished();
        assert!(scroller.is_finished());
        assert!(!scroller.compute_scroll_offset(t0 + Duration::from_millis(10)));
    }
}
