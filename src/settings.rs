//! Game settings
//!
//! Every option comes from a fixed set of choices; free-form numbers are
//! rejected at deserialization time.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::language::LanguageCode;
use crate::sim::PowerUpWeights;

/// A numeric option outside its allowed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidOption {
    pub option: &'static str,
    pub value: u32,
}

impl fmt::Display for InvalidOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not a valid {}", self.value, self.option)
    }
}

impl std::error::Error for InvalidOption {}

/// Round length in seconds: 60, 90 or 120
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct RoundDuration(u32);

impl RoundDuration {
    pub const OPTIONS: [u32; 3] = [60, 90, 120];

    pub fn seconds(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for RoundDuration {
    type Error = InvalidOption;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if Self::OPTIONS.contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidOption {
                option: "round duration",
                value,
            })
        }
    }
}

impl From<RoundDuration> for u32 {
    fn from(value: RoundDuration) -> Self {
        value.0
    }
}

/// Tiles kept on the field: 6, 8, 10 or 12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TileCount(u32);

impl TileCount {
    pub const OPTIONS: [u32; 4] = [6, 8, 10, 12];

    pub fn count(&self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u32> for TileCount {
    type Error = InvalidOption;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if Self::OPTIONS.contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidOption {
                option: "tile count",
                value,
            })
        }
    }
}

impl From<TileCount> for u32 {
    fn from(value: TileCount) -> Self {
        value.0
    }
}

/// Wall bounces before a tile leaves: 2 to 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MaxBounces(u32);

impl MaxBounces {
    pub const OPTIONS: [u32; 4] = [2, 3, 4, 5];

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for MaxBounces {
    type Error = InvalidOption;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if Self::OPTIONS.contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidOption {
                option: "bounce limit",
                value,
            })
        }
    }
}

impl From<MaxBounces> for u32 {
    fn from(value: MaxBounces) -> Self {
        value.0
    }
}

/// Power-up respawn interval in milliseconds: 1200, 1800 or 2400
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct RespawnInterval(u32);

impl RespawnInterval {
    pub const OPTIONS: [u32; 3] = [1200, 1800, 2400];

    pub fn millis(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for RespawnInterval {
    type Error = InvalidOption;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if Self::OPTIONS.contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidOption {
                option: "power-up respawn interval",
                value,
            })
        }
    }
}

impl From<RespawnInterval> for u32 {
    fn from(value: RespawnInterval) -> Self {
        value.0
    }
}

/// Tile speed multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedSetting {
    Relaxed,
    #[default]
    Normal,
    Fast,
}

impl SpeedSetting {
    pub fn multiplier(&self) -> f32 {
        match self {
            SpeedSetting::Relaxed => 0.8,
            SpeedSetting::Normal => 1.0,
            SpeedSetting::Fast => 1.25,
        }
    }
}

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Casual,
    #[default]
    Standard,
    Chaos,
    /// Values that match no preset
    Custom,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Casual => "Casual",
            DifficultyPreset::Standard => "Standard",
            DifficultyPreset::Chaos => "Chaos",
            DifficultyPreset::Custom => "Custom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "casual" | "easy" => Some(DifficultyPreset::Casual),
            "standard" | "normal" => Some(DifficultyPreset::Standard),
            "chaos" | "hard" => Some(DifficultyPreset::Chaos),
            "custom" => Some(DifficultyPreset::Custom),
            _ => None,
        }
    }

    /// Option values for a preset; `Custom` has none
    fn values(&self) -> Option<(u32, u32, SpeedSetting, u32, u32)> {
        match self {
            DifficultyPreset::Casual => Some((120, 6, SpeedSetting::Relaxed, 5, 2400)),
            DifficultyPreset::Standard => Some((90, 8, SpeedSetting::Normal, 3, 1800)),
            DifficultyPreset::Chaos => Some((60, 12, SpeedSetting::Fast, 2, 1200)),
            DifficultyPreset::Custom => None,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: LanguageCode,
    pub round_duration: RoundDuration,
    pub tile_count: TileCount,
    pub speed: SpeedSetting,
    pub max_bounces: MaxBounces,
    pub power_up_respawn: RespawnInterval,
    /// Spawn weights for the power-up catalog
    pub power_up_weights: PowerUpWeights,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(DifficultyPreset::Standard)
    }
}

impl Settings {
    /// Settings for a preset, in English. `Custom` gives the standard values.
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        let mut settings = Self {
            language: LanguageCode::En,
            round_duration: RoundDuration(90),
            tile_count: TileCount(8),
            speed: SpeedSetting::Normal,
            max_bounces: MaxBounces(3),
            power_up_respawn: RespawnInterval(1800),
            power_up_weights: PowerUpWeights::default(),
        };
        settings.apply_preset(preset);
        settings
    }

    /// Overwrite the preset-controlled options. Language and weights are kept.
    pub fn apply_preset(&mut self, preset: DifficultyPreset) {
        if let Some((duration, tiles, speed, bounces, respawn)) = preset.values() {
            self.round_duration = RoundDuration(duration);
            self.tile_count = TileCount(tiles);
            self.speed = speed;
            self.max_bounces = MaxBounces(bounces);
            self.power_up_respawn = RespawnInterval(respawn);
        }
    }

    /// Which preset the current values correspond to
    pub fn preset(&self) -> DifficultyPreset {
        [
            DifficultyPreset::Casual,
            DifficultyPreset::Standard,
            DifficultyPreset::Chaos,
        ]
        .into_iter()
        .find(|preset| {
            preset.values()
                == Some((
                    self.round_duration.seconds(),
                    self.tile_count.0,
                    self.speed,
                    self.max_bounces.get(),
                    self.power_up_respawn.millis(),
                ))
        })
        .unwrap_or(DifficultyPreset::Custom)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PowerUpKind;

    #[test]
    fn test_defaults_are_standard() {
        let settings = Settings::default();
        assert_eq!(settings.preset(), DifficultyPreset::Standard);
        assert_eq!(settings.round_duration.seconds(), 90);
        assert_eq!(settings.tile_count.count(), 8);
        assert_eq!(settings.max_bounces.get(), 3);
    }

    #[test]
    fn test_preset_detection() {
        let mut settings = Settings::from_preset(DifficultyPreset::Chaos);
        assert_eq!(settings.preset(), DifficultyPreset::Chaos);
        settings.tile_count = TileCount::try_from(10).unwrap();
        assert_eq!(settings.preset(), DifficultyPreset::Custom);
    }

    #[test]
    fn test_rejects_values_outside_option_sets() {
        assert!(RoundDuration::try_from(45).is_err());
        assert!(MaxBounces::try_from(9).is_err());
        let json = r#"{"language":"de","tile_count":7}"#;
        assert!(Settings::from_json(json).is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_weights() {
        let mut settings = Settings::from_preset(DifficultyPreset::Casual);
        settings.language = LanguageCode::It;
        settings.power_up_weights = PowerUpWeights::only(&[PowerUpKind::Wall]);
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"language":"fr","speed":"fast"}"#).unwrap();
        assert_eq!(settings.language, LanguageCode::Fr);
        assert_eq!(settings.speed.multiplier(), 1.25);
        assert_eq!(settings.round_duration.seconds(), 90);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load_from(Path::new("/nonexistent/bounce-words.json"));
        assert_eq!(settings, Settings::default());
    }
}
