use serde::{Deserialize, Serialize};

/// Easing curves applied to normalized animation progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    #[default]
    Smooth,
}

impl EasingType {
    /// Apply easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::EaseIn => t * t * t,
            EasingType::EaseOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            EasingType::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            // Smooth step (3t^2 - 2t^3)
            EasingType::Smooth => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            EasingType::Linear,
            EasingType::EaseIn,
            EasingType::EaseOut,
            EasingType::EaseInOut,
            EasingType::Smooth,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-12, "{:?}", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{:?}", easing);
            assert!((easing.apply(2.0) - 1.0).abs() < 1e-12, "{:?}", easing);
        }
    }

    #[test]
    fn test_easing_shapes() {
        assert!(EasingType::EaseIn.apply(0.5) < 0.5);
        assert!(EasingType::EaseOut.apply(0.5) > 0.5);
        assert!((EasingType::Smooth.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_easing_serde_names() {
        let json = serde_json::to_string(&EasingType::EaseInOut).unwrap();
        assert_eq!(json, "\"ease_in_out\"");
        let parsed: EasingType = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(parsed, EasingType::Linear);
    }
}
