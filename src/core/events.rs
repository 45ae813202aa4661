//! Core domain: messages for the pause lifecycle and level flow.

use bevy::ecs::message::Message;

/// Fired when the simulation is frozen by the pause controller.
#[derive(Debug)]
pub struct GamePaused;

impl Message for GamePaused {}

/// Fired when the simulation resumes.
#[derive(Debug)]
pub struct GameResumed;

impl Message for GameResumed {}

/// Fired once when the player crosses the finish line.
#[derive(Debug)]
pub struct LevelCompleted {
    pub level_index: u32,
    pub coins_collected: u32,
}

impl Message for LevelCompleted {}

/// Request a full level restart (player reset, fresh attempt).
#[derive(Debug)]
pub struct RestartRequested;

impl Message for RestartRequested {}
