//! Third-person follow camera.
//!
//! Deliberately thin: it trails the body heading with a smoothed offset
//! and never feeds back into the locomotion core.

use bevy::prelude::*;

use crate::movement::Player;

const FOLLOW_SPEED: f32 = 3.0;
const EYE_OFFSET: Vec3 = Vec3::new(0.0, 2.6, 6.5);
const LOOK_HEIGHT: f32 = 1.4;

#[derive(Component, Debug)]
pub struct FollowCamera;

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        FollowCamera,
        Camera3d::default(),
        Transform::from_translation(EYE_OFFSET).looking_at(Vec3::Y * LOOK_HEIGHT, Vec3::Y),
    ));
}

fn follow_player(
    time: Res<Time>,
    players: Query<&Transform, (With<Player>, Without<FollowCamera>)>,
    mut cameras: Query<&mut Transform, With<FollowCamera>>,
) {
    let Ok(player) = players.single() else {
        return;
    };

    let desired = player.translation + player.rotation * EYE_OFFSET;
    let blend = (time.delta_secs() * FOLLOW_SPEED).min(1.0);

    for mut camera in &mut cameras {
        camera.translation = camera.translation.lerp(desired, blend);
        let look_target = player.translation + Vec3::Y * LOOK_HEIGHT;
        camera.look_at(look_target, Vec3::Y);
    }
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, follow_player);
    }
}
