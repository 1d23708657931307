//! Behavior tuning for a map view.
//!
//! Everything here has a sensible default; hosts usually only override the
//! zoom range or turn gestures off. The struct deserializes from any serde
//! format, missing fields falling back to the defaults.

use crate::animation::interpolation::EasingType;
use crate::core::constants::{
    CENTER_ANIMATION_DURATION_MS, FLING_DECELERATION, MAX_ZOOM_LEVEL, ZOOM_ANIMATION_DURATION_MS,
    ZOOM_SENSITIVITY,
};
use crate::{MapError, Result};
use instant::Duration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapViewConfig {
    /// Lowest zoom level; `None` defers to the tile provider
    pub min_zoom_level: Option<f64>,
    /// Highest zoom level; `None` defers to the tile provider
    pub max_zoom_level: Option<f64>,
    pub fling_enabled: bool,
    pub multi_touch_enabled: bool,
    /// Pinch responsiveness; 1.0 maps a 2x spread to one zoom level
    pub zoom_sensitivity: f64,
    /// Fling deceleration in pixels per second squared
    pub fling_deceleration: f64,
    pub zoom_animation_duration_ms: u64,
    pub center_animation_duration_ms: u64,
    pub zoom_easing: EasingType,
    /// Scale tiles by `display_density`
    pub tiles_scaled_to_dpi: bool,
    pub display_density: f64,
    /// Trace every gesture at debug level
    pub debug: bool,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            min_zoom_level: None,
            max_zoom_level: None,
            fling_enabled: true,
            multi_touch_enabled: true,
            zoom_sensitivity: ZOOM_SENSITIVITY,
            fling_deceleration: FLING_DECELERATION,
            zoom_animation_duration_ms: ZOOM_ANIMATION_DURATION_MS,
            center_animation_duration_ms: CENTER_ANIMATION_DURATION_MS,
            zoom_easing: EasingType::default(),
            tiles_scaled_to_dpi: false,
            display_density: 1.0,
            debug: false,
        }
    }
}

impl MapViewConfig {
    pub fn validate(&self) -> Result<()> {
        for zoom in [self.min_zoom_level, self.max_zoom_level].into_iter().flatten() {
            if !zoom.is_finite() || !(0.0..=MAX_ZOOM_LEVEL).contains(&zoom) {
                return Err(MapError::InvalidConfig(format!(
                    "zoom level {} outside 0..={}",
                    zoom, MAX_ZOOM_LEVEL
                ))
                .into());
            }
        }
        if let (Some(min), Some(max)) = (self.min_zoom_level, self.max_zoom_level) {
            if min > max {
                return Err(MapError::InvalidZoomRange { min, max }.into());
            }
        }
        if !(self.zoom_sensitivity > 0.0 && self.zoom_sensitivity < 2.0) {
            return Err(MapError::InvalidConfig(format!(
                "zoom_sensitivity must be in (0, 2), got {}",
                self.zoom_sensitivity
            ))
            .into());
        }
        if !(self.fling_deceleration > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "fling_deceleration must be positive, got {}",
                self.fling_deceleration
            ))
            .into());
        }
        if !(self.display_density > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "display_density must be positive, got {}",
                self.display_density
            ))
            .into());
        }
        Ok(())
    }

    pub fn zoom_animation_duration(&self) -> Duration {
        Duration::from_millis(self.zoom_animation_duration_ms)
    }

    pub fn center_animation_duration(&self) -> Duration {
        Duration::from_millis(self.center_animation_duration_ms)
    }
}
