//! Startup settings loaded from a RON file.
//!
//! Tuning lives in `assets/settings.ron` so designers can retune the run
//! without a rebuild. A missing or malformed file is not fatal: every
//! section falls back to its compiled-in defaults.

use bevy::prelude::*;
use ron::Options;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::audio::AudioSettings;
use crate::core::LevelConfig;
use crate::movement::LocomotionTuning;

pub const SETTINGS_PATH: &str = "assets/settings.ron";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub level_index: u32,
    pub total_coins: u32,
    pub locomotion: LocomotionTuning,
    pub audio: AudioSettings,
}

impl GameSettings {
    /// Parse settings from `path`. Errors are reported to the caller so the
    /// loading system can decide how loudly to complain.
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents =
            fs::read_to_string(path).map_err(|e| format!("{}: IO error: {e}", path.display()))?;

        Options::default()
            .with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
            .from_str(&contents)
            .map_err(|e| format!("{}: parse error: {e}", path.display()))
    }
}

/// Overwrite the compiled-in tuning resources from the settings file.
/// Runs before any gameplay startup so spawned entities see final values.
pub(crate) fn apply_settings(
    mut level: ResMut<LevelConfig>,
    mut tuning: ResMut<LocomotionTuning>,
    mut audio: ResMut<AudioSettings>,
) {
    match GameSettings::load(Path::new(SETTINGS_PATH)) {
        Ok(settings) => {
            if settings.level_index > 0 {
                level.level_index = settings.level_index;
            }
            if settings.total_coins > 0 {
                level.total_coins = settings.total_coins;
            }
            *tuning = settings.locomotion;
            *audio = settings.audio;
            info!("Settings loaded from {}", SETTINGS_PATH);
        }
        Err(message) => {
            warn!("Using default settings ({message})");
        }
    }
}

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelConfig>()
            .add_systems(PreStartup, apply_settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_settings_file_is_an_error() {
        let result = GameSettings::load(Path::new("assets/does_not_exist.ron"));
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_settings_report_parse_error() {
        let dir = std::env::temp_dir();
        let path = dir.join("melody_run_bad_settings.ron");
        fs::write(&path, "(level_index: \"not a number\")").unwrap();

        let result = GameSettings::load(&path);
        assert!(result.unwrap_err().contains("parse error"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_partial_settings_fill_in_defaults() {
        let dir = std::env::temp_dir();
        let path = dir.join("melody_run_partial_settings.ron");
        fs::write(&path, "(level_index: 2)").unwrap();

        let settings = GameSettings::load(&path).unwrap();
        assert_eq!(settings.level_index, 2);
        assert_eq!(settings.locomotion.move_speed, 5.0);
        assert_eq!(settings.audio.footstep_interval, 0.245);

        let _ = fs::remove_file(&path);
    }
}
