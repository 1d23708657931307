//! Core constants derived from slippy-map conventions and touch-platform defaults.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Highest zoom level the projection math supports. Scrollable-area limits are
/// stored in world pixels at this level.
pub const MAX_ZOOM_LEVEL: f64 = 29.0;

/// Northern edge of the Web Mercator square.
pub const MAX_LATITUDE: f64 = 85.05112877980659;

/// Southern edge of the Web Mercator square.
pub const MIN_LATITUDE: f64 = -MAX_LATITUDE;

pub const MAX_LONGITUDE: f64 = 180.0;
pub const MIN_LONGITUDE: f64 = -180.0;

/// WGS84 equatorial radius in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Default pinch sensitivity (1.0 maps a 2x pinch to one zoom level).
pub const ZOOM_SENSITIVITY: f64 = 1.0;

/// Programmatic +/- zoom step when calling `zoom_in/zoom_out`.
pub const DEFAULT_ZOOM_DELTA: f64 = 1.0;

/// Fling deceleration in pixels per second squared.
pub const FLING_DECELERATION: f64 = 1_500.0;

/// Duration of an animated zoom.
pub const ZOOM_ANIMATION_DURATION_MS: u64 = 350;

/// Duration of an animated re-center.
pub const CENTER_ANIMATION_DURATION_MS: u64 = 500;
