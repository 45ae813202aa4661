mod animation;
mod audio;
mod camera;
mod config;
mod core;
mod level;
mod movement;
mod progress;
mod ui;

use avian3d::prelude::*;
use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Run to the Melody".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins((
            config::SettingsPlugin,
            core::CorePlugin,
            movement::MovementPlugin,
            level::LevelPlugin,
            camera::CameraPlugin,
            animation::AnimationPlugin,
            audio::AudioPlugin,
            progress::ProgressPlugin,
            ui::UiPlugin,
        ))
        .run();
}
