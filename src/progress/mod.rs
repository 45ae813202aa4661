//! Progress domain: persistent attempts / coins / completion counters.
//!
//! The store is a flat key-value file of integers, read once at startup
//! and flushed once at level completion. Nothing else in the game holds a
//! reference into it; run counters are value-copied in and out.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::core::{LevelCompleted, LevelConfig, RestartRequested, RunStats};

pub const PROGRESS_PATH: &str = "progress.json";

#[derive(Resource, Debug)]
pub struct ProgressStore {
    path: PathBuf,
    values: HashMap<String, i32>,
}

impl ProgressStore {
    /// Load the store from `path`. A missing file is a fresh store; a
    /// corrupt one is reported and replaced rather than crashing the game.
    pub fn load(path: PathBuf) -> Self {
        let values = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(values) => values,
                Err(e) => {
                    warn!("Corrupt progress file {}: {e}; starting fresh", path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self { path, values }
    }

    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    pub fn set_int(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_string(), value);
    }

    pub fn flush(&self) -> std::io::Result<()> {
        let contents = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, contents)
    }

    /// Fold a completed run into the store. Attempts and the completion
    /// flag always write; coins only when they beat the stored best.
    pub fn record_completion(&mut self, level: u32, attempts: i32, coins: i32) {
        self.set_int(&attempts_key(level), attempts);
        let previous_coins = self.get_int(&coins_key(level), 0);
        if coins > previous_coins {
            self.set_int(&coins_key(level), coins);
        }
        self.set_int(&completed_key(level), 1);
    }
}

pub fn attempts_key(level: u32) -> String {
    format!("attempts_{level}")
}

pub fn coins_key(level: u32) -> String {
    format!("coins_{level}")
}

pub fn completed_key(level: u32) -> String {
    format!("completed_{level}")
}

/// Load the store and count this launch as an attempt.
fn init_progress(mut commands: Commands, level: Res<LevelConfig>, mut stats: ResMut<RunStats>) {
    let mut store = ProgressStore::load(PathBuf::from(PROGRESS_PATH));

    let attempts = store.get_int(&attempts_key(level.level_index), 0) + 1;
    store.set_int(&attempts_key(level.level_index), attempts);
    stats.attempts = attempts as u32;

    info!(
        "Level {}: attempt {}, best coins {}",
        level.level_index,
        attempts,
        store.get_int(&coins_key(level.level_index), 0)
    );

    commands.insert_resource(store);
}

/// Every restart is another attempt.
fn record_attempt_on_restart(
    mut restart_events: MessageReader<RestartRequested>,
    level: Res<LevelConfig>,
    mut store: ResMut<ProgressStore>,
    mut stats: ResMut<RunStats>,
) {
    if restart_events.read().count() == 0 {
        return;
    }

    let attempts = store.get_int(&attempts_key(level.level_index), 0) + 1;
    store.set_int(&attempts_key(level.level_index), attempts);
    stats.attempts = attempts as u32;
}

/// Fold the finished run into the store and flush it to disk.
fn save_on_completion(
    mut events: MessageReader<LevelCompleted>,
    stats: Res<RunStats>,
    mut store: ResMut<ProgressStore>,
) {
    for event in events.read() {
        store.record_completion(
            event.level_index,
            stats.attempts as i32,
            event.coins_collected as i32,
        );
        if let Err(e) = store.flush() {
            warn!("Could not write progress file: {e}");
        } else {
            info!("Progress saved");
        }
    }
}

pub struct ProgressPlugin;

impl Plugin for ProgressPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, init_progress)
            .add_systems(Update, (record_attempt_on_restart, save_on_completion));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> ProgressStore {
        let path = std::env::temp_dir().join(name);
        let _ = fs::remove_file(&path);
        ProgressStore::load(path)
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let store = temp_store("melody_run_progress_missing.json");
        assert_eq!(store.get_int(&attempts_key(1), 0), 0);
        assert_eq!(store.get_int(&coins_key(1), 7), 7);
    }

    #[test]
    fn test_round_trip_through_flush() {
        let mut store = temp_store("melody_run_progress_roundtrip.json");
        store.set_int(&attempts_key(2), 4);
        store.set_int(&coins_key(2), 3);
        store.flush().unwrap();

        let reloaded = ProgressStore::load(store.path.clone());
        assert_eq!(reloaded.get_int(&attempts_key(2), 0), 4);
        assert_eq!(reloaded.get_int(&coins_key(2), 0), 3);

        let _ = fs::remove_file(&store.path);
    }

    #[test]
    fn test_coins_only_improve() {
        let mut store = temp_store("melody_run_progress_coins.json");
        store.record_completion(1, 3, 2);
        assert_eq!(store.get_int(&coins_key(1), 0), 2);

        // A worse run must not clobber the stored best
        store.record_completion(1, 4, 1);
        assert_eq!(store.get_int(&coins_key(1), 0), 2);
        assert_eq!(store.get_int(&attempts_key(1), 0), 4);
        assert_eq!(store.get_int(&completed_key(1), 0), 1);

        store.record_completion(1, 5, 3);
        assert_eq!(store.get_int(&coins_key(1), 0), 3);

        let _ = fs::remove_file(&store.path);
    }

    #[test]
    fn test_corrupt_file_starts_fresh() {
        let path = std::env::temp_dir().join("melody_run_progress_corrupt.json");
        fs::write(&path, "not json at all").unwrap();

        let store = ProgressStore::load(path.clone());
        assert_eq!(store.get_int(&attempts_key(1), 0), 0);

        let _ = fs::remove_file(&path);
    }
}
