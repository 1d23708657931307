//! Shared trait abstractions

use crate::core::geo::{GeoPoint, Point};

/// Linear interpolation between two values of the same type
pub trait Lerp {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Point {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Point::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }
}

impl Lerp for GeoPoint {
    /// Interpolates along the shorter way around the antimeridian
    fn lerp(&self, other: &Self, t: f64) -> Self {
        let mut to_lon = other.lon;
        if to_lon - self.lon > 180.0 {
            to_lon -= 360.0;
        } else if to_lon - self.lon < -180.0 {
            to_lon += 360.0;
        }
        GeoPoint::new(self.lat.lerp(&other.lat, t), self.lon.lerp(&to_lon, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_f64_and_point() {
        assert_eq!(2.0_f64.lerp(&4.0, 0.5), 3.0);
        let p = Point::new(0.0, 10.0).lerp(&Point::new(10.0, 20.0), 0.25);
        assert_eq!(p, Point::new(2.5, 12.5));
    }

    #[test]
    fn test_geo_lerp_short_way() {
        let a = GeoPoint::new(0.0, 170.0);
        let b = GeoPoint::new(10.0, -170.0);
        let mid = a.lerp(&b, 0.5);
        assert!((mid.lat - 5.0).abs() < 1e-9);
        assert!((mid.lon - 180.0).abs() < 1e-9);
    }
}
