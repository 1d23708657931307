use crate::core::constants::{MAX_LATITUDE, MIN_LATITUDE};
use serde::{Deserialize, Serialize};

/// A geographical coordinate in degrees.
///
/// Latitude is kept in `[-90, 90]` and longitude normalized to `(-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a new point, clamping latitude and wrapping longitude
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat: lat.clamp(-90.0, 90.0),
            lon: Self::wrap_lon(lon),
        }
    }

    /// Validates that the coordinates are finite and within range
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && self.lon > -180.0
            && self.lon <= 180.0
    }

    /// Wraps longitude to the `(-180, 180]` range
    pub fn wrap_lon(lon: f64) -> f64 {
        if !lon.is_finite() {
            return lon;
        }
        let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
        if wrapped <= -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }

    /// Clamps latitude to the range the Mercator projection can represent
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(MIN_LATITUDE, MAX_LATITUDE)
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A point in screen or world-pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    /// Rotates this point around `origin` by `degrees` (clockwise on a y-down screen)
    pub fn rotate_around(&self, origin: &Point, degrees: f64) -> Point {
        if degrees == 0.0 {
            return *self;
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;
        Point::new(
            origin.x + dx * cos - dy * sin,
            origin.y + dx * sin + dy * cos,
        )
    }

    /// Scales this point's distance from `origin` by `factor`
    pub fn scale_around(&self, origin: &Point, factor: f64) -> Point {
        Point::new(
            origin.x + (self.x - origin.x) * factor,
            origin.y + (self.y - origin.y) * factor,
        )
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A geographical bounding box in degrees.
///
/// When `east < west` the box crosses the antimeridian. A box may have zero
/// span on either axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Smallest box containing all `points`, or `None` when empty
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a GeoPoint>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self::new(first.lat, first.lat, first.lon, first.lon);
        for point in iter {
            bbox.north = bbox.north.max(point.lat);
            bbox.south = bbox.south.min(point.lat);
            bbox.east = bbox.east.max(point.lon);
            bbox.west = bbox.west.min(point.lon);
        }
        Some(bbox)
    }

    pub fn north_west(&self) -> GeoPoint {
        GeoPoint::new(self.north, self.west)
    }

    pub fn south_east(&self) -> GeoPoint {
        GeoPoint::new(self.south, self.east)
    }

    pub fn crosses_date_line(&self) -> bool {
        self.east < self.west
    }

    pub fn latitude_span(&self) -> f64 {
        (self.north - self.south).abs()
    }

    /// Longitude span in degrees, accounting for antimeridian crossing
    pub fn longitude_span(&self) -> f64 {
        if self.crosses_date_line() {
            self.east - self.west + 360.0
        } else {
            self.east - self.west
        }
    }

    /// Returns true when both spans are zero
    pub fn is_degenerate(&self) -> bool {
        self.latitude_span() == 0.0 && self.longitude_span() == 0.0
    }

    /// Arithmetic center, ignoring the antimeridian
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.north + self.south) / 2.0,
            (self.east + self.west) / 2.0,
        )
    }

    /// Center that stays on the box when it crosses the antimeridian
    pub fn center_with_date_line(&self) -> GeoPoint {
        let lat = (self.north + self.south) / 2.0;
        let mut lon = (self.east + self.west) / 2.0;
        if self.crosses_date_line() {
            lon += 180.0;
        }
        GeoPoint::new(lat, lon)
    }

    /// Checks if the box contains a point
    pub fn contains(&self, point: &GeoPoint) -> bool {
        let in_lat = point.lat >= self.south && point.lat <= self.north;
        let in_lon = if self.crosses_date_line() {
            point.lon >= self.west || point.lon <= self.east
        } else {
            point.lon >= self.west && point.lon <= self.east
        };
        in_lat && in_lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_normalizes() {
        let point = GeoPoint::new(95.0, 190.0);
        assert_eq!(point.lat, 90.0);
        assert!((point.lon - -170.0).abs() < 1e-9);
        assert!(point.is_valid());

        assert_eq!(GeoPoint::new(0.0, -180.0).lon, 180.0);
        assert_eq!(GeoPoint::new(0.0, 180.0).lon, 180.0);
        assert!((GeoPoint::new(0.0, -540.0).lon - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_around() {
        let origin = Point::new(100.0, 100.0);
        let rotated = Point::new(150.0, 100.0).rotate_around(&origin, 90.0);
        assert!((rotated.x - 100.0).abs() < 1e-9);
        assert!((rotated.y - 150.0).abs() < 1e-9);

        let back = rotated.rotate_around(&origin, -90.0);
        assert!((back.x - 150.0).abs() < 1e-9);
        assert!((back.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounding_box_center_with_date_line() {
        let pacific = BoundingBox::new(10.0, -10.0, -170.0, 170.0);
        assert!(pacific.crosses_date_line());
        assert!((pacific.longitude_span() - 20.0).abs() < 1e-9);

        let center = pacific.center_with_date_line();
        assert!((center.lat - 0.0).abs() < 1e-9);
        assert!((center.lon - 180.0).abs() < 1e-9);
        assert!(pacific.contains(&GeoPoint::new(0.0, 175.0)));
        assert!(pacific.contains(&GeoPoint::new(0.0, -175.0)));
        assert!(!pacific.contains(&GeoPoint::new(0.0, 0.0)));
    }

    #[test]
    fn test_bounding_box_degenerate() {
        let point_box = BoundingBox::new(5.0, 5.0, 7.0, 7.0);
        assert!(point_box.is_degenerate());

        let line_box = BoundingBox::new(5.0, 5.0, 8.0, 7.0);
        assert!(!line_box.is_degenerate());
    }

    #[test]
    fn test_bounding_box_from_points() {
        let points = [
            GeoPoint::new(1.0, 2.0),
            GeoPoint::new(-3.0, 4.0),
            GeoPoint::new(2.0, -1.0),
        ];
        let bbox = BoundingBox::from_points(points.iter()).unwrap();
        assert_eq!(bbox, BoundingBox::new(2.0, -3.0, 4.0, -1.0));
        assert!(BoundingBox::from_points(std::iter::empty::<&GeoPoint>()).is_none());
    }
}
