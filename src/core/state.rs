//! Core domain: game state definitions for the level flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Frozen start overlay; virtual time is paused until the player presses W.
    #[default]
    StartMenu,
    Run,
    Paused,
    Victory,
}
