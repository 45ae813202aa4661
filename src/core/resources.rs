//! Core domain: shared resources for the current level run.

use bevy::prelude::*;

/// Static configuration of the loaded level.
#[derive(Resource, Debug, Clone)]
pub struct LevelConfig {
    pub level_index: u32,
    pub total_coins: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            level_index: 1,
            total_coins: 3,
        }
    }
}

/// Counters for the run in progress. Reset on restart, folded into the
/// progress store on completion.
#[derive(Resource, Debug, Default)]
pub struct RunStats {
    pub attempts: u32,
    pub coins_collected: u32,
    pub completed: bool,
}

impl RunStats {
    /// Begin a fresh attempt, keeping the attempt counter.
    pub fn reset_for_attempt(&mut self) {
        self.coins_collected = 0;
        self.completed = false;
    }
}
