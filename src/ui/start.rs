//! UI domain: start overlay shown before the run begins.

use bevy::prelude::*;

/// Marker for the start overlay root
#[derive(Component)]
pub struct StartOverlayUI;

pub(crate) fn spawn_start_overlay(mut commands: Commands) {
    commands
        .spawn((
            StartOverlayUI,
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
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.92)),
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Run to the Melody"),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.95, 0.95)),
                Node {
                    margin: UiRect::bottom(Val::Px(12.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new("Press W to begin"),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.75, 0.75, 0.75)),
                Node {
                    margin: UiRect::bottom(Val::Px(48.0)),
                    ..default()
                },
            ));

            for line in [
                "A / D or arrows: steer",
                "SPACE: jump",
                "S / CTRL: slide",
                "ESC: pause    M: mute",
            ] {
                parent.spawn((
                    Text::new(line),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.55, 0.55, 0.6)),
                    Node {
                        margin: UiRect::bottom(Val::Px(6.0)),
                        ..default()
                    },
                ));
            }
        });
}

pub(crate) fn despawn_start_overlay(
    mut commands: Commands,
    overlays: Query<Entity, With<StartOverlayUI>>,
) {
    for entity in &overlays {
        commands.entity(entity).despawn();
    }
}
