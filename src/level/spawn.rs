//! Level domain: course layout.
//!
//! The run heads along -Z: a slide bar, a head-height shelf, then a
//! wall-run section that bends the course 90 degrees onto a second leg
//! along -X, where the finish line waits. Coins sit along both legs.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::level::{Coin, CoinLayout, FinishLine};
use crate::movement::{GameLayer, Surface};

pub(crate) fn spawn_level(
    mut commands: Commands,
    mut layout: ResMut<CoinLayout>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground_material = materials.add(Color::srgb(0.25, 0.25, 0.3));
    let obstacle_material = materials.add(Color::srgb(0.6, 0.2, 0.2));
    let wall_material = materials.add(Color::srgb(0.3, 0.45, 0.6));
    let finish_material = materials.add(Color::srgba(0.3, 0.9, 0.3, 0.4));

    // First leg, straight out along -Z
    commands.spawn((
        Name::new("Ground leg 1"),
        RigidBody::Static,
        Collider::cuboid(12.0, 0.2, 120.0),
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
        Transform::from_xyz(0.0, -0.1, -55.0),
        Mesh3d(meshes.add(Cuboid::new(12.0, 0.2, 120.0))),
        MeshMaterial3d(ground_material.clone()),
    ));

    // Second leg, along -X after the wall-run turn
    commands.spawn((
        Name::new("Ground leg 2"),
        RigidBody::Static,
        Collider::cuboid(120.0, 0.2, 12.0),
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
        Transform::from_xyz(-52.0, -0.1, -100.0),
        Mesh3d(meshes.add(Cuboid::new(120.0, 0.2, 12.0))),
        MeshMaterial3d(ground_material),
    ));

    // Slide bar: leg height, clears a sliding capsule
    commands.spawn((
        Name::new("Leg bar"),
        Surface::HitLegs,
        RigidBody::Static,
        Collider::cuboid(6.0, 0.5, 0.4),
        CollisionLayers::new(GameLayer::Obstacle, [GameLayer::Player]),
        Transform::from_xyz(0.0, 0.85, -30.0),
        Mesh3d(meshes.add(Cuboid::new(6.0, 0.5, 0.4))),
        MeshMaterial3d(obstacle_material.clone()),
    ));

    // Shelf: head height, slide under or die
    commands.spawn((
        Name::new("Shelf"),
        Surface::HitShelf,
        RigidBody::Static,
        Collider::cuboid(6.0, 0.5, 0.6),
        CollisionLayers::new(GameLayer::Obstacle, [GameLayer::Player]),
        Transform::from_xyz(0.0, 1.55, -60.0),
        Mesh3d(meshes.add(Cuboid::new(6.0, 0.5, 0.6))),
        MeshMaterial3d(obstacle_material),
    ));

    // Wall-run section: the solid wall and its trigger zone
    commands.spawn((
        Name::new("Wall run wall"),
        Surface::WallRun,
        RigidBody::Static,
        Collider::cuboid(0.4, 3.0, 16.0),
        CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]),
        Transform::from_xyz(3.2, 1.5, -90.0),
        Mesh3d(meshes.add(Cuboid::new(0.4, 3.0, 16.0))),
        MeshMaterial3d(wall_material),
    ));
    commands.spawn((
        Name::new("Wall run zone"),
        Surface::WallRun,
        RigidBody::Static,
        Sensor,
        Collider::cuboid(1.6, 3.0, 16.0),
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        Transform::from_xyz(2.2, 1.5, -90.0),
    ));

    // Coins
    layout.positions = vec![
        Vec3::new(1.5, 1.0, -20.0),
        Vec3::new(-1.5, 1.0, -45.0),
        Vec3::new(-20.0, 1.0, -100.0),
    ];
    layout.mesh = meshes.add(Sphere::new(0.3));
    layout.material = materials.add(Color::srgb(1.0, 0.8, 0.2));

    for position in layout.positions.clone() {
        spawn_coin(&mut commands, &layout, position);
    }

    // Finish line across the second leg
    commands.spawn((
        Name::new("Finish line"),
        FinishLine,
        RigidBody::Static,
        Sensor,
        Collider::cuboid(0.5, 4.0, 12.0),
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        Transform::from_xyz(-70.0, 2.0, -100.0),
        Mesh3d(meshes.add(Cuboid::new(0.2, 4.0, 12.0))),
        MeshMaterial3d(finish_material),
    ));

    // Light
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    info!("Level geometry spawned");
}

pub(crate) fn spawn_coin(commands: &mut Commands, layout: &CoinLayout, position: Vec3) {
    commands.spawn((
        Name::new("Coin"),
        Coin,
        RigidBody::Static,
        Sensor,
        Collider::sphere(0.4),
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        Transform::from_translation(position),
        Mesh3d(layout.mesh.clone()),
        MeshMaterial3d(layout.material.clone()),
    ));
}
