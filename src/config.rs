//! Game configuration
//!
//! Immutable after a session is built. Loaded from LocalStorage on web and
//! from `data/config.json` on native; the game itself never writes it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{GAP_HEIGHT_MAX, GAP_HEIGHT_MIN, GROUND_HEIGHT};

const DEFAULT_OBSTACLE_GAP: i32 = 200;

// Tallest possible top segment must not start further above the screen than
// the shortest gap line sits below it.
const _: () = assert!(GAP_HEIGHT_MIN - DEFAULT_OBSTACLE_GAP >= -GAP_HEIGHT_MIN);
const _: () = assert!(GAP_HEIGHT_MIN < GAP_HEIGHT_MAX);

/// Why a configuration was rejected
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config is not valid JSON: {e}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Screen size in logical pixels
    pub width: u32,
    pub height: u32,
    /// Quadratic term of the per-tick displacement curve
    pub gravity: f32,
    /// Impulse set on flap (negative = upward)
    pub flap_strength: f32,
    /// Terminal per-tick displacement
    pub max_fall_speed: f32,
    /// Vertical size of each obstacle's passable band
    pub obstacle_gap: i32,
    /// Minimum horizontal distance between consecutive obstacles
    pub obstacle_spacing: f32,
    /// Scroll speed at score 0 (pixels per tick)
    pub base_speed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 800,
            gravity: 0.15,
            flap_strength: -2.0,
            max_fall_speed: 9.0,
            obstacle_gap: DEFAULT_OBSTACLE_GAP,
            obstacle_spacing: 500.0,
            base_speed: 8,
        }
    }
}

impl GameConfig {
    /// Native config file, relative to the working directory
    pub const DATA_DIR: &'static str = "data";
    #[cfg(not(target_arch = "wasm32"))]
    const FILE_NAME: &'static str = "config.json";
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "flying_adventure_config";

    pub fn screen_width(&self) -> f32 {
        self.width as f32
    }

    pub fn screen_height(&self) -> f32 {
        self.height as f32
    }

    /// Top edge of the ground strip
    pub fn ground_y(&self) -> f32 {
        self.screen_height() - GROUND_HEIGHT
    }

    /// Check the parameters produce a playable world
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid("screen dimensions must be positive"));
        }
        if (self.height as f32) <= GAP_HEIGHT_MAX as f32 + GROUND_HEIGHT {
            return Err(ConfigError::Invalid(
                "screen must be taller than the lowest gap line plus the ground",
            ));
        }
        if self.gravity.is_nan() || self.gravity <= 0.0 {
            return Err(ConfigError::Invalid("gravity must be positive"));
        }
        if self.flap_strength.is_nan() || self.flap_strength >= 0.0 {
            return Err(ConfigError::Invalid("flap_strength must be negative (upward)"));
        }
        if self.max_fall_speed.is_nan() || self.max_fall_speed <= 0.0 {
            return Err(ConfigError::Invalid("max_fall_speed must be positive"));
        }
        if self.obstacle_gap <= 0 || self.obstacle_gap >= GAP_HEIGHT_MAX {
            return Err(ConfigError::Invalid("obstacle_gap must be within (0, 400)"));
        }
        if self.obstacle_spacing.is_nan() || self.obstacle_spacing < 0.0 {
            return Err(ConfigError::Invalid("obstacle_spacing must not be negative"));
        }
        if self.base_speed == 0 {
            return Err(ConfigError::Invalid("base_speed must be at least 1"));
        }
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve a raw config source, falling back to defaults on any problem
    fn from_source(source: Option<String>) -> Self {
        match source {
            Some(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config: {:?}", config);
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring config ({}), using defaults", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default config");
                Self::default()
            }
        }
    }

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let source = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok())
            .flatten();
        Self::from_source(source)
    }

    /// Load config from `data/config.json` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::from_source(std::fs::read_to_string(Self::path()).ok())
    }

    /// Native config file location
    #[cfg(not(target_arch = "wasm32"))]
    pub fn path() -> std::path::PathBuf {
        std::path::Path::new(Self::DATA_DIR).join(Self::FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ground_y(), 730.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "base_speed": 5, "gravity": 0.2 }"#).unwrap();
        assert_eq!(config.base_speed, 5);
        assert!((config.gravity - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.width, 900);
        assert_eq!(config.obstacle_gap, 200);
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_downward_flap() {
        let err = GameConfig::from_json(r#"{ "flap_strength": 3.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_gap_outside_band() {
        assert!(GameConfig::from_json(r#"{ "obstacle_gap": 0 }"#).is_err());
        assert!(GameConfig::from_json(r#"{ "obstacle_gap": 400 }"#).is_err());
        assert!(GameConfig::from_json(r#"{ "obstacle_gap": 150 }"#).is_ok());
    }

    #[test]
    fn test_rejects_short_screen() {
        let err = GameConfig::from_json(r#"{ "height": 450 }"#).unwrap_err();
        assert!(err.to_string().contains("taller"));
    }

    #[test]
    fn test_invalid_source_falls_back_to_default() {
        let config = GameConfig::from_source(Some(r#"{ "base_speed": 0 }"#.to_string()));
        assert_eq!(config, GameConfig::default());
        assert_eq!(GameConfig::from_source(None), GameConfig::default());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_source_is_data_file() {
        assert_eq!(
            GameConfig::path(),
            std::path::Path::new("data").join("config.json")
        );
    }

    #[cfg(target_arch = "wasm32")]
    #[test]
    fn test_storage_key() {
        assert_eq!(GameConfig::STORAGE_KEY, "flying_adventure_config");
    }
}
