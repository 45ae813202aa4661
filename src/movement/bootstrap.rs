//! Movement domain: player bootstrap.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::animation::AnimatorParams;
use crate::movement::components::{GameLayer, Locomotion, Player, PlayerCapsule};
use crate::movement::resources::{LocomotionTuning, PlayerSpawn};

/// Spawn the player body: a dynamic rigid body with rotation locked and
/// gravity disabled (the state machine integrates gravity itself), plus a
/// capsule collider child that slide can reshape.
pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<LocomotionTuning>,
    spawn: Res<PlayerSpawn>,
    existing_player: Query<Entity, With<Player>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let cylinder = (tuning.standing_height - 2.0 * tuning.capsule_radius).max(0.0);

    info!(
        "Spawning player at {:?} (speed {}, jump impulse {:.2})",
        spawn.0,
        tuning.move_speed,
        tuning.jump_impulse()
    );

    commands
        .spawn((
            Player,
            Locomotion::new(&tuning),
            AnimatorParams::default(),
            Transform::from_translation(spawn.0),
            Visibility::default(),
            (
                RigidBody::Dynamic,
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(0.0), // gravity is integrated by the state machine
                Friction::new(0.0),
            ),
        ))
        .with_children(|parent| {
            parent.spawn((
                PlayerCapsule {
                    height: tuning.standing_height,
                    center_y: tuning.standing_center_y,
                },
                Transform::from_xyz(0.0, tuning.standing_center_y, 0.0),
                Collider::capsule(tuning.capsule_radius, cylinder),
                CollisionEventsEnabled,
                CollisionLayers::new(
                    GameLayer::Player,
                    [
                        GameLayer::Ground,
                        GameLayer::Wall,
                        GameLayer::Obstacle,
                        GameLayer::Sensor,
                    ],
                ),
                Mesh3d(meshes.add(Capsule3d::new(tuning.capsule_radius, cylinder))),
                MeshMaterial3d(materials.add(Color::srgb(0.9, 0.9, 0.9))),
            ));
        });
}
