//! Core domain: pause/resume lifecycle and level flow systems.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::core::events::{GamePaused, GameResumed, LevelCompleted, RestartRequested};
use crate::core::resources::RunStats;
use crate::core::state::GameState;

/// The app boots onto the start overlay with the simulation clock frozen.
pub(crate) fn freeze_clock_at_boot(mut time: ResMut<Time<Virtual>>) {
    time.pause();
    info!("Boot: simulation clock frozen until the run starts");
}

/// Pressing W on the start overlay begins the run.
pub(crate) fn start_on_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::KeyW) {
        next_state.set(GameState::Run);
    }
}

/// Escape toggles between Run and Paused.
pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }

    match state.get() {
        GameState::Run => next_state.set(GameState::Paused),
        GameState::Paused => next_state.set(GameState::Run),
        _ => {}
    }
}

/// Entering Paused: freeze the simulation clock, release the cursor and
/// notify listeners. Gameplay systems are gated on `GameState::Run`, so a
/// paused tick never touches locomotion state.
pub(crate) fn on_enter_paused(
    mut time: ResMut<Time<Virtual>>,
    mut cursor: Query<&mut CursorOptions, With<PrimaryWindow>>,
    mut paused_events: MessageWriter<GamePaused>,
) {
    time.pause();
    release_cursor(&mut cursor);
    paused_events.write(GamePaused);
    info!("Game paused");
}

/// Entering Run (from boot, pause or a restart): restore the clock scale
/// and recapture the cursor.
pub(crate) fn on_enter_run(
    mut time: ResMut<Time<Virtual>>,
    mut cursor: Query<&mut CursorOptions, With<PrimaryWindow>>,
    mut resumed_events: MessageWriter<GameResumed>,
) {
    let was_paused = time.is_paused();
    time.unpause();
    capture_cursor(&mut cursor);
    if was_paused {
        resumed_events.write(GameResumed);
        info!("Game resumed");
    }
}

/// Handle a restart request: force the clock back to running before any
/// teardown so the relaunch is never frozen, then begin a fresh attempt.
pub(crate) fn handle_restart(
    mut restart_events: MessageReader<RestartRequested>,
    mut time: ResMut<Time<Virtual>>,
    mut stats: ResMut<RunStats>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if restart_events.read().count() == 0 {
        return;
    }

    time.unpause();
    stats.reset_for_attempt();
    next_state.set(GameState::Run);
    info!("Restarting level (attempt {})", stats.attempts + 1);
}

/// Crossing the finish line ends the run.
pub(crate) fn handle_level_completed(
    mut events: MessageReader<LevelCompleted>,
    mut stats: ResMut<RunStats>,
    mut cursor: Query<&mut CursorOptions, With<PrimaryWindow>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in events.read() {
        stats.completed = true;
        release_cursor(&mut cursor);
        next_state.set(GameState::Victory);
        info!(
            "Level {} completed with {} coins",
            event.level_index, event.coins_collected
        );
    }
}

fn release_cursor(cursor: &mut Query<&mut CursorOptions, With<PrimaryWindow>>) {
    for mut options in cursor {
        options.grab_mode = CursorGrabMode::None;
        options.visible = true;
    }
}

fn capture_cursor(cursor: &mut Query<&mut CursorOptions, With<PrimaryWindow>>) {
    for mut options in cursor {
        options.grab_mode = CursorGrabMode::Locked;
        options.visible = false;
    }
}
