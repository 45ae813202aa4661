//! UI domain: start overlay, pause menu and victory screen.

mod pause_menu;
mod start;
mod victory;

use bevy::prelude::*;

use crate::core::GameState;
use crate::ui::pause_menu::{
    despawn_pause_menu, handle_pause_buttons, spawn_pause_menu, style_menu_buttons,
};
use crate::ui::start::{despawn_start_overlay, spawn_start_overlay};
use crate::ui::victory::{despawn_victory_screen, handle_victory_buttons, spawn_victory_screen};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::StartMenu), spawn_start_overlay)
            .add_systems(OnExit(GameState::StartMenu), despawn_start_overlay)
            .add_systems(OnEnter(GameState::Paused), spawn_pause_menu)
            .add_systems(OnExit(GameState::Paused), despawn_pause_menu)
            .add_systems(OnEnter(GameState::Victory), spawn_victory_screen)
            .add_systems(OnExit(GameState::Victory), despawn_victory_screen)
            .add_systems(
                Update,
                (
                    handle_pause_buttons.run_if(in_state(GameState::Paused)),
                    handle_victory_buttons.run_if(in_state(GameState::Victory)),
                    style_menu_buttons,
                ),
            );
    }
}
