//! UI domain: pause menu and its death-aware Continue routing.

use bevy::app::AppExit;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::core::{GameState, RestartRequested};
use crate::movement::{Locomotion, Player};

/// Marker for the pause menu root
#[derive(Component)]
pub struct PauseMenuUI;

#[derive(Component)]
pub struct ContinueButton;

#[derive(Component)]
pub struct RestartButton;

#[derive(Component)]
pub struct ExitButton;

const NORMAL_BUTTON: Color = Color::srgb(0.17, 0.17, 0.2);
const HOVERED_BUTTON: Color = Color::srgb(0.27, 0.27, 0.32);
const PRESSED_BUTTON: Color = Color::srgb(0.6, 0.2, 0.2);

pub(crate) fn spawn_pause_menu(mut commands: Commands) {
    commands
        .spawn((
            PauseMenuUI,
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
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("PAUSED"),
                TextFont {
                    font_size: 44.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.95, 0.95)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            spawn_menu_button(parent, ContinueButton, "CONTINUE");
            spawn_menu_button(parent, RestartButton, "RESTART LEVEL");
            spawn_menu_button(parent, ExitButton, "EXIT");
        });
}

fn spawn_menu_button(parent: &mut ChildSpawnerCommands, marker: impl Component, label: &str) {
    parent
        .spawn((
            marker,
            Button,
            Node {
                width: Val::Px(240.0),
                padding: UiRect::axes(Val::Px(0.0), Val::Px(12.0)),
                margin: UiRect::bottom(Val::Px(14.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(NORMAL_BUTTON),
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

pub(crate) fn despawn_pause_menu(mut commands: Commands, menus: Query<Entity, With<PauseMenuUI>>) {
    for entity in &menus {
        commands.entity(entity).despawn();
    }
}

/// Continue resumes the run, unless the player is in a death pose: there
/// is nothing to resume from one, so the level restarts instead.
pub(crate) fn handle_pause_buttons(
    continue_query: Query<&Interaction, (With<ContinueButton>, Changed<Interaction>)>,
    restart_query: Query<&Interaction, (With<RestartButton>, Changed<Interaction>)>,
    exit_query: Query<&Interaction, (With<ExitButton>, Changed<Interaction>)>,
    players: Query<&Locomotion, With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut restart_events: MessageWriter<RestartRequested>,
    mut exit_events: MessageWriter<AppExit>,
) {
    if continue_query.iter().any(|i| *i == Interaction::Pressed) {
        let dead = players.single().map(Locomotion::is_dead).unwrap_or(false);
        if dead {
            info!("Continue requested from a death pose, restarting instead");
            restart_events.write(RestartRequested);
        } else {
            next_state.set(GameState::Run);
        }
    }

    if restart_query.iter().any(|i| *i == Interaction::Pressed) {
        restart_events.write(RestartRequested);
    }

    if exit_query.iter().any(|i| *i == Interaction::Pressed) {
        exit_events.write(AppExit::Success);
    }
}

/// Hover/press feedback for every menu button.
pub(crate) fn style_menu_buttons(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
) {
    for (interaction, mut color) in &mut buttons {
        *color = match *interaction {
            Interaction::Pressed => PRESSED_BUTTON.into(),
            Interaction::Hovered => HOVERED_BUTTON.into(),
            Interaction::None => NORMAL_BUTTON.into(),
        };
    }
}
