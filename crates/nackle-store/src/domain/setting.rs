//! Settings
//!
//! Free-form key/value preferences. A handful of keys drive the window
//! chrome and theme; unknown keys are stored and returned untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const KEY_FRAMELESS: &str = "frameless";
pub const KEY_BACKGROUND_OPACITY: &str = "background-opacity";
pub const KEY_BACKGROUND_BLUR: &str = "background-blur";
pub const KEY_BACKGROUND_BLUR_RADIUS: &str = "background-blur-radius";
pub const KEY_THEME: &str = "theme";

pub const DEFAULT_THEME: &str = "aura";

/// Values seeded on first run (never overwrite existing keys)
pub const DEFAULT_SETTINGS: &[(&str, &str)] = &[
    (KEY_FRAMELESS, "false"),
    (KEY_BACKGROUND_OPACITY, "0.6"),
    (KEY_BACKGROUND_BLUR, "true"),
    (KEY_BACKGROUND_BLUR_RADIUS, "20"),
    (KEY_THEME, DEFAULT_THEME),
];

/// Lowest opacity handed to the native window; fully transparent
/// windows stop receiving clicks on some platforms.
const MIN_WINDOW_OPACITY: f64 = 0.001;

pub type SettingsMap = BTreeMap<String, String>;

/// Effective window chrome derived from the settings map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowAppearance {
    pub frameless: bool,
    /// Clamped to [0.001, 1.0]
    pub opacity: f64,
    pub transparent: bool,
    pub blur: bool,
    pub blur_radius: u32,
}

impl Default for WindowAppearance {
    fn default() -> Self {
        Self {
            frameless: false,
            opacity: 1.0,
            transparent: false,
            blur: false,
            blur_radius: 0,
        }
    }
}

impl WindowAppearance {
    pub fn from_settings(settings: &SettingsMap) -> Self {
        let get = |key: &str| settings.get(key).map(String::as_str);

        let opacity = get(KEY_BACKGROUND_OPACITY)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| !v.is_nan())
            .map(|v| v.clamp(MIN_WINDOW_OPACITY, 1.0))
            .unwrap_or(1.0);

        let blur_radius = get(KEY_BACKGROUND_BLUR_RADIUS)
            .and_then(parse_leading_int)
            .map(|v| v.max(0) as u32)
            .unwrap_or(0);

        let blur_enabled = get(KEY_BACKGROUND_BLUR) != Some("false");

        Self {
            frameless: get(KEY_FRAMELESS) == Some("true"),
            opacity,
            transparent: opacity < 1.0,
            blur: blur_enabled && blur_radius > 0,
            blur_radius,
        }
    }
}

/// Integer prefix of a string ("20px" -> 20), like a lenient number input
fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim();
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> SettingsMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults_produce_blurred_translucent_window() {
        let appearance = WindowAppearance::from_settings(&map(DEFAULT_SETTINGS));
        assert!(!appearance.frameless);
        assert!((appearance.opacity - 0.6).abs() < f64::EPSILON);
        assert!(appearance.transparent);
        assert!(appearance.blur);
        assert_eq!(appearance.blur_radius, 20);
    }

    #[test]
    fn test_opacity_is_clamped() {
        let high = WindowAppearance::from_settings(&map(&[(KEY_BACKGROUND_OPACITY, "3.5")]));
        assert_eq!(high.opacity, 1.0);
        assert!(!high.transparent);

        let low = WindowAppearance::from_settings(&map(&[(KEY_BACKGROUND_OPACITY, "-1")]));
        assert_eq!(low.opacity, MIN_WINDOW_OPACITY);
    }

    #[test]
    fn test_garbage_values_fall_back() {
        let appearance = WindowAppearance::from_settings(&map(&[
            (KEY_BACKGROUND_OPACITY, "abc"),
            (KEY_BACKGROUND_BLUR_RADIUS, "lots"),
        ]));
        assert_eq!(appearance.opacity, 1.0);
        assert_eq!(appearance.blur_radius, 0);
        assert!(!appearance.blur);
    }

    #[test]
    fn test_blur_radius_accepts_unit_suffix() {
        let appearance = WindowAppearance::from_settings(&map(&[(KEY_BACKGROUND_BLUR_RADIUS, "12px")]));
        assert_eq!(appearance.blur_radius, 12);
    }

    #[test]
    fn test_blur_switch_off_disables_blur() {
        let appearance = WindowAppearance::from_settings(&map(&[
            (KEY_BACKGROUND_BLUR, "false"),
            (KEY_BACKGROUND_BLUR_RADIUS, "20"),
        ]));
        assert!(!appearance.blur);
    }

    #[test]
    fn test_frameless_flag() {
        let appearance = WindowAppearance::from_settings(&map(&[(KEY_FRAMELESS, "true")]));
        assert!(appearance.frameless);
    }
}
