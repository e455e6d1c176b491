//! Live-tunable trail settings
//!
//! The settings struct is the surface an external tuning panel binds to: a
//! plain mutable block the field re-reads at the start of every frame, so
//! edits between frames take effect without any synchronization. Presets can
//! be saved to and loaded from JSON files.

use crate::core_types::envelope::MinMax;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunable parameters for the particle trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailSettings {
    /// Gravity in screen orientation: positive y pulls particles down
    /// (negated when converted into a world-space force).
    pub gravity: Vector2<f32>,
    /// World-space pointer travel required between spawns.
    pub spawn_distance: f32,
    /// Scale applied to the spawn impulse derived from pointer velocity.
    pub velocity_modifier: f32,
    /// Lifespan decrement rate per unit delta.
    pub die_speed: f32,
    /// Opacity fade-in/fade-out envelope range.
    pub opacity_range: MinMax,
    /// Depth envelope range.
    pub z_range: MinMax,
    /// Depth envelope amplitude in world units.
    pub max_z: f32,
}

impl Default for TrailSettings {
    fn default() -> Self {
        TrailSettings {
            gravity: Vector2::new(0.0, 0.0010),
            spawn_distance: 3.0,
            velocity_modifier: 0.03,
            die_speed: 0.01,
            opacity_range: MinMax::new(0.2, 0.8),
            z_range: MinMax::new(0.2, 0.8),
            max_z: 2.0,
        }
    }
}

impl TrailSettings {
    /// Near-zero gravity and a slow fade: particles linger and drift.
    pub fn weightless() -> Self {
        TrailSettings {
            gravity: Vector2::new(0.0, 0.0),
            die_speed: 0.005,
            ..TrailSettings::default()
        }
    }

    /// Strong pull and a fast fade: short, falling streaks behind the
    /// pointer.
    pub fn heavy() -> Self {
        TrailSettings {
            gravity: Vector2::new(0.0, 0.004),
            spawn_distance: 2.0,
            die_speed: 0.02,
            ..TrailSettings::default()
        }
    }

    /// Load a settings preset from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let contents =
            fs::read_to_string(path).map_err(|e| SettingsError::LoadFailed(e.to_string()))?;
        let settings: Self = serde_json::from_str(&contents)
            .map_err(|e| SettingsError::ParseFailed(e.to_string()))?;
        Ok(settings)
    }

    /// Save this preset to a JSON file.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SettingsError::SerializeFailed(e.to_string()))?;
        fs::write(path, contents).map_err(|e| SettingsError::SaveFailed(e.to_string()))?;
        Ok(())
    }
}

/// Errors that can occur when loading or saving settings presets.
#[derive(Debug)]
pub enum SettingsError {
    /// Failed to read the preset file
    LoadFailed(String),
    /// Failed to parse the preset contents
    ParseFailed(String),
    /// Failed to serialize the settings
    SerializeFailed(String),
    /// Failed to write the preset file
    SaveFailed(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::LoadFailed(msg) => write!(f, "Failed to load: {msg}"),
            SettingsError::ParseFailed(msg) => write!(f, "Failed to parse: {msg}"),
            SettingsError::SerializeFailed(msg) => write!(f, "Failed to serialize: {msg}"),
            SettingsError::SaveFailed(msg) => write!(f, "Failed to save: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_tuning() {
        let settings = TrailSettings::default();
        assert_relative_eq!(settings.gravity.y, 0.0010);
        assert_relative_eq!(settings.spawn_distance, 3.0);
        assert_relative_eq!(settings.velocity_modifier, 0.03);
        assert_relative_eq!(settings.die_speed, 0.01);
        assert_relative_eq!(settings.opacity_range.min, 0.2);
        assert_relative_eq!(settings.opacity_range.max, 0.8);
    }

    #[test]
    fn test_presets_differ_from_default() {
        assert_relative_eq!(TrailSettings::weightless().gravity.y, 0.0);
        assert!(TrailSettings::heavy().die_speed > TrailSettings::default().die_speed);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = TrailSettings {
            spawn_distance: 1.5,
            opacity_range: MinMax::new(0.1, 0.9),
            ..TrailSettings::default()
        };

        let json = serde_json::to_string(&settings).unwrap();
        let restored: TrailSettings = serde_json::from_str(&json).unwrap();
        assert_relative_eq!(restored.spawn_distance, 1.5);
        assert_relative_eq!(restored.opacity_range.max, 0.9);
        assert_relative_eq!(restored.gravity.y, settings.gravity.y);
    }

    #[test]
    fn test_save_and_load_preset_file() {
        let path = std::env::temp_dir().join("trail-settings-preset-test.json");
        let settings = TrailSettings::heavy();
        settings.save(&path).unwrap();

        let loaded = TrailSettings::load(&path).unwrap();
        assert_relative_eq!(loaded.gravity.y, settings.gravity.y);
        assert_relative_eq!(loaded.spawn_distance, settings.spawn_distance);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = TrailSettings::load("/nonexistent/trail-settings.json");
        assert!(matches!(result, Err(SettingsError::LoadFailed(_))));
    }
}
