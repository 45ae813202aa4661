//! UI domain: victory screen shown after crossing the finish line.

use bevy::app::AppExit;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::core::{LevelConfig, RestartRequested, RunStats};

/// Marker for the victory screen root
#[derive(Component)]
pub struct VictoryScreenUI;

#[derive(Component)]
pub struct RetryButton;

#[derive(Component)]
pub struct VictoryExitButton;

pub(crate) fn spawn_victory_screen(
    mut commands: Commands,
    stats: Res<RunStats>,
    level: Res<LevelConfig>,
) {
    commands
        .spawn((
            VictoryScreenUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("LEVEL COMPLETE"),
                TextFont {
                    font_size: 52.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.85, 0.3)),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new(format!("Attempts: {}", stats.attempts)),
                TextFont {
                    font_size: 26.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.85)),
                Node {
                    margin: UiRect::bottom(Val::Px(10.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new(format!(
                    "Coins: {} / {}",
                    stats.coins_collected, level.total_coins
                )),
                TextFont {
                    font_size: 26.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.8, 0.2)),
                Node {
                    margin: UiRect::bottom(Val::Px(50.0)),
                    ..default()
                },
            ));

            spawn_victory_button(parent, RetryButton, "RUN AGAIN");
            spawn_victory_button(parent, VictoryExitButton, "EXIT");
        });
}

fn spawn_victory_button(parent: &mut ChildSpawnerCommands, marker: impl Component, label: &str) {
    parent
        .spawn((
            marker,
            Button,
            Node {
                width: Val::Px(220.0),
                padding: UiRect::axes(Val::Px(0.0), Val::Px(12.0)),
                margin: UiRect::bottom(Val::Px(14.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.17, 0.17, 0.2)),
        ))
        .with_child((
            Text::new(label),
            TextFont {
                font_size: 20.0,
                ..default()
            },
            TextColor(Color::srgb(0.9, 0.9, 0.9)),
        ));
}

pub(crate) fn despawn_victory_screen(
    mut commands: Commands,
    screens: Query<Entity, With<VictoryScreenUI>>,
) {
    for entity in &screens {
        commands.entity(entity).despawn();
    }
}

pub(crate) fn handle_victory_buttons(
    keyboard: Res<ButtonInput<KeyCode>>,
    retry_query: Query<&Interaction, (With<RetryButton>, Changed<Interaction>)>,
    exit_query: Query<&Interaction, (With<VictoryExitButton>, Changed<Interaction>)>,
    mut restart_events: MessageWriter<RestartRequested>,
    mut exit_events: MessageWriter<AppExit>,
) {
    let retry = keyboard.just_pressed(KeyCode::Enter)
        || retry_query.iter().any(|i| *i == Interaction::Pressed);

    if retry {
        restart_events.write(RestartRequested);
    }

    if exit_query.iter().any(|i| *i == Interaction::Pressed) {
        exit_events.write(AppExit::Success);
    }
}
