//! Core domain: game states, pause lifecycle and run statistics.

mod events;
mod resources;
mod state;
mod systems;

pub use events::{GamePaused, GameResumed, LevelCompleted, RestartRequested};
pub use resources::{LevelConfig, RunStats};
pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{
    freeze_clock_at_boot, handle_level_completed, handle_restart, on_enter_paused, on_enter_run,
    start_on_key, toggle_pause,
};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<RunStats>()
            .add_message::<GamePaused>()
            .add_message::<GameResumed>()
            .add_message::<LevelCompleted>()
            .add_message::<RestartRequested>()
            .add_systems(Startup, freeze_clock_at_boot)
            .add_systems(OnEnter(GameState::Paused), on_enter_paused)
            .add_systems(OnEnter(GameState::Run), on_enter_run)
            .add_systems(
                Update,
                (
                    start_on_key.run_if(in_state(GameState::StartMenu)),
                    toggle_pause,
                    handle_restart,
                    handle_level_completed,
                ),
            );
    }
}
